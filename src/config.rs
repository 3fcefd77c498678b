//! Broker connection parameters.
//!
//! The only runtime-tunable settings in the system.  Timing constants are
//! fixed policy and live in [`crate::timing`].
//!
//! Values come from four options, `--host`, `--port`, `--user` and
//! `--pass`, accepted as `--opt value` or `--opt=value`.  The host build
//! reads them from the command line; on ESP32 the same string is baked in
//! at build time and parsed with [`BrokerConfig::from_arg_str`].

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::timing::KEEP_ALIVE_SECS;

/// `argv[0]` used when parsing an option string that has no program name.
const PROGRAM: &str = "doorlights";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 1883;
const DEFAULT_USER: &str = "rtl_433";
const DEFAULT_PASSWORD: &str = "334_ltr";

/// Door status lights driven by rtl_433 contact-sensor reports.
#[derive(Debug, Clone, PartialEq, Eq, Parser, Serialize, Deserialize)]
#[command(name = PROGRAM, version)]
pub struct BrokerConfig {
    /// MQTT broker host
    #[arg(long, default_value_t = DEFAULT_HOST.to_owned())]
    pub host: String,

    /// MQTT broker port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// MQTT username
    #[arg(long, default_value_t = DEFAULT_USER.to_owned())]
    pub user: String,

    /// MQTT password
    #[arg(long = "pass", default_value_t = DEFAULT_PASSWORD.to_owned())]
    pub password: String,

    /// MQTT keep-alive (seconds)
    #[arg(skip = KEEP_ALIVE_SECS)]
    pub keep_alive_secs: u16,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.into(),
            password: DEFAULT_PASSWORD.into(),
            keep_alive_secs: KEEP_ALIVE_SECS,
        }
    }
}

impl BrokerConfig {
    /// Parse a whitespace-separated option string, without program name.
    pub fn from_arg_str(args: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(core::iter::once(PROGRAM).chain(args.split_whitespace()))
    }

    /// Broker URL in the form the ESP-IDF MQTT client expects.
    pub fn url(&self) -> String {
        format!("mqtt://{}:{}", self.host, self.port)
    }
}

//! Unified error types for the door-light firmware.
//!
//! A single `Error` enum that every subsystem converts into, so startup in
//! `main` can propagate with `?` and abort before serving.  Runtime
//! conditions (irrelevant notifications, unknown doors, failed pin writes)
//! never reach this type; they are handled where they occur.

use core::fmt;

use crate::pins::LineId;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The door table is invalid.
    Config(ConfigError),
    /// An output line could not be claimed or driven.
    Hardware(HardwareError),
    /// WiFi or MQTT bring-up failed.
    Comms(CommsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Two doors share one output line.
    DuplicateLine(LineId),
    /// Two doors share one sensor id.
    DuplicateId(u64),
    /// No fallback row for unrecognised sensor ids.
    MissingFallback,
    /// More than one fallback row.
    MultipleFallbacks,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLine(line) => write!(f, "{line} assigned to more than one door"),
            Self::DuplicateId(id) => write!(f, "sensor id {id} registered twice"),
            Self::MissingFallback => write!(f, "no fallback door for unknown sensor ids"),
            Self::MultipleFallbacks => write!(f, "more than one fallback door"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// GPIO could not be configured as a push-pull output.
    LineConfigFailed(LineId),
    /// Setting the output level failed.
    LineWriteFailed(LineId),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineConfigFailed(line) => write!(f, "{line} output config failed"),
            Self::LineWriteFailed(line) => write!(f, "{line} write failed"),
        }
    }
}

impl std::error::Error for HardwareError {}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    InvalidSsid,
    InvalidPassword,
    WifiConnectFailed,
    MqttConnectFailed,
    SubscribeFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::MqttConnectFailed => write!(f, "MQTT connect failed"),
            Self::SubscribeFailed => write!(f, "MQTT subscribe failed"),
        }
    }
}

impl std::error::Error for CommsError {}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Door-lights firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  MQTT client task            Main task                       │
//! │  (rtl_433/#)                 (10 Hz refresh loop)            │
//! │       │                            │                         │
//! │       │ ingest()                   │ refresh(now)            │
//! │       ▼                            ▼                         │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │ ShowController: Registry + Indicator per line      │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                 │ OutputPin (one mutex per line)             │
//! │                 ▼                                            │
//! │        GPIO 18 · 17 · 21 · 14                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Off-target the MQTT client is replaced by a stdin feed and the GPIOs
//! by in-memory lines.  The process runs until Ctrl-C, then releases every
//! line and exits 0.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use doorlights::adapters::log_sink::LogEventSink;
use doorlights::adapters::time::MonotonicClock;
use doorlights::app::ports::Clock;
use doorlights::config::BrokerConfig;
use doorlights::drivers::output_line::OutputLine;
use doorlights::pins::DOORS;
use doorlights::refresh::{RefreshLoop, ShutdownSignal};
use doorlights::show::ShowController;

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    use std::sync::Arc;

    use doorlights::adapters::mqtt::MqttFeed;
    use doorlights::adapters::wifi::{self, WifiCredentials};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("doorlights v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Build-time settings (no command line on the board) ─
    let broker =
        BrokerConfig::from_arg_str(option_env!("DOORLIGHTS_BROKER_ARGS").unwrap_or_default())?;
    let creds = WifiCredentials::new(
        option_env!("DOORLIGHTS_WIFI_SSID").unwrap_or_default(),
        option_env!("DOORLIGHTS_WIFI_PASS").unwrap_or_default(),
    )?;

    // ── 3. Indicators: every line output + LOW, all blinking ──
    let clock = MonotonicClock::new();
    let show = Arc::new(ShowController::from_table(&DOORS, clock.now(), OutputLine::open)?);

    // ── 4. Network ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let _wifi = wifi::connect(peripherals.modem, sysloop, nvs, &creds)?;
    let _feed = MqttFeed::start(&broker, "doorlights", Arc::clone(&show), clock)?;

    // ── 5. Refresh loop ───────────────────────────────────────
    // Nothing on the board requests shutdown; this runs until reset.
    let shutdown = ShutdownSignal::new();
    RefreshLoop::new().run(&show, &clock, &shutdown, &mut LogEventSink::new());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() -> Result<()> {
    use std::sync::Arc;

    use clap::Parser;
    use doorlights::adapters::interrupt;
    use doorlights::adapters::line_feed::LineFeed;
    use log::warn;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let broker = BrokerConfig::parse();
    info!("doorlights v{} (simulation)", env!("CARGO_PKG_VERSION"));
    info!(
        "Broker {} (user '{}') not contacted off-target; reading '<topic> <payload>' from stdin",
        broker.url(),
        broker.user
    );

    let clock = MonotonicClock::new();
    let show = Arc::new(ShowController::from_table(&DOORS, clock.now(), OutputLine::open)?);
    let shutdown = ShutdownSignal::new();
    interrupt::on_ctrl_c(shutdown.clone())?;

    // Detached: a read parked on stdin must not hold up shutdown.
    let feed_show = Arc::clone(&show);
    std::thread::Builder::new()
        .name("feed".into())
        .spawn(move || {
            if let Err(e) = LineFeed::new(std::io::stdin().lock()).run(
                &feed_show,
                &clock,
                &mut LogEventSink::new(),
            ) {
                warn!("Feed: read failed: {}", e);
            }
        })?;

    RefreshLoop::new().run(&show, &clock, &shutdown, &mut LogEventSink::new());

    let stats = show.stats();
    info!(
        "Done: {} applied, {} ignored, {} unknown sensor",
        stats.accepted, stats.discarded, stats.fallback
    );
    Ok(())
}

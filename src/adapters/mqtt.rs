//! MQTT feed adapter (ESP-IDF only).
//!
//! Connects to the broker with the ESP-IDF MQTT client and hands every
//! received message to [`ShowController::ingest`] from the client's own
//! task.  Reconnection is the client's business; the session is kept on
//! the broker (`disable_clean_session`) so the subscription survives it.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use embedded_hal::digital::OutputPin;
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use log::{debug, error, info, warn};

use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::MonotonicClock;
use crate::app::ports::Clock;
use crate::config::BrokerConfig;
use crate::error::CommsError;
use crate::notification::{Notification, TOPIC_FILTER};
use crate::show::ShowController;

/// How long to wait for the first CONNACK before giving up on startup.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Live subscription.  Dropping it disconnects from the broker.
pub struct MqttFeed {
    _client: EspMqttClient<'static>,
}

impl MqttFeed {
    /// Connect, wait for the session, and subscribe to the rtl_433 feed.
    pub fn start<P>(
        cfg: &BrokerConfig,
        client_id: &str,
        show: Arc<ShowController<P>>,
        clock: MonotonicClock,
    ) -> Result<Self, CommsError>
    where
        P: OutputPin + Send + 'static,
    {
        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            username: Some(cfg.user.as_str()),
            password: Some(cfg.password.as_str()),
            keep_alive_interval: Some(Duration::from_secs(u64::from(cfg.keep_alive_secs))),
            disable_clean_session: true,
            ..Default::default()
        };

        let (connected_tx, connected_rx) = mpsc::channel();
        let mut sink = LogEventSink::new();

        let url = cfg.url();
        info!("MQTT: connecting to {} as '{}'", url, cfg.user);
        let mut client = EspMqttClient::new_cb(&url, &conf, move |event| match event.payload() {
            EventPayload::Connected(session_present) => {
                info!("MQTT: connected (session_present={})", session_present);
                // Receiver is gone after startup; later reconnects need no signal.
                let _ = connected_tx.send(());
            }
            EventPayload::Disconnected => warn!("MQTT: disconnected"),
            EventPayload::Received {
                topic: Some(topic),
                data,
                ..
            } => {
                show.ingest(&Notification::new(topic, data), clock.now(), &mut sink);
            }
            EventPayload::Error(e) => warn!("MQTT: {:?}", e),
            other => debug!("MQTT: {:?}", other),
        })
        .map_err(|e| {
            error!("MQTT: client init failed: {}", e);
            CommsError::MqttConnectFailed
        })?;

        connected_rx.recv_timeout(CONNECT_TIMEOUT).map_err(|_| {
            error!("MQTT: no connection after {}s", CONNECT_TIMEOUT.as_secs());
            CommsError::MqttConnectFailed
        })?;

        client.subscribe(TOPIC_FILTER, QoS::AtMostOnce).map_err(|e| {
            error!("MQTT: subscribe failed: {}", e);
            CommsError::SubscribeFailed
        })?;
        info!("MQTT: subscribed to '{}'", TOPIC_FILTER);

        Ok(Self { _client: client })
    }
}

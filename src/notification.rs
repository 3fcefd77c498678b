//! rtl_433 door-sensor reports carried over MQTT.
//!
//! rtl_433 publishes one topic per decoded field, e.g.
//! `rtl_433/host/devices/Generic-Remote/2898343/closed` with payload `0`
//! or `1`.  Only the `closed` field matters here; everything else on the
//! shared feed is ignored.

/// Subscription filter covering everything rtl_433 publishes.
pub const TOPIC_FILTER: &str = "rtl_433/#";

/// Last topic segment of a closed-state report.
pub const CLOSED_SUFFIX: &str = "/closed";

/// Payload meaning "not closed".
const OPEN_PAYLOAD: &[u8] = b"0";

/// Raw message as delivered by the MQTT client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification<'a> {
    pub topic: &'a str,
    pub payload: &'a [u8],
}

impl<'a> Notification<'a> {
    pub fn new(topic: &'a str, payload: &'a [u8]) -> Self {
        Self { topic, payload }
    }
}

/// A parsed closed-state report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorReport {
    /// Sensor id from the topic; `None` if missing or not a number.
    pub entity_id: Option<u64>,
    pub is_open: bool,
}

impl DoorReport {
    pub fn label(&self) -> &'static str {
        if self.is_open { "open" } else { "closed" }
    }
}

/// Extract a [`DoorReport`], or `None` for unrelated traffic.
pub fn parse_report(n: &Notification<'_>) -> Option<DoorReport> {
    let head = n.topic.strip_suffix(CLOSED_SUFFIX)?;
    let entity_id = head.rsplit('/').next().and_then(|seg| seg.parse().ok());
    Some(DoorReport {
        entity_id,
        is_open: n.payload == OPEN_PAYLOAD,
    })
}

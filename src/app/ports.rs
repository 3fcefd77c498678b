//! Port traits: the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ShowController (domain)
//! ```
//!
//! Output lines are not wrapped in a port of our own: the core drives any
//! `embedded_hal::digital::OutputPin`, which both the ESP-IDF `PinDriver`
//! and the host simulation implement.

use crate::timing::Timestamp;

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`ShowEvent`](super::events::ShowEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ShowEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: system timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source shared by the notification and refresh paths.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

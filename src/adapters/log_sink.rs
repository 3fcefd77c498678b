//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing show events to the logger (UART /
//! USB-CDC on ESP32, stderr on the host).

use log::info;

use crate::app::events::ShowEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ShowEvent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ShowEvent) {
        match event {
            ShowEvent::DoorReported {
                name,
                report,
                line,
                state,
            } => {
                let id = report
                    .entity_id
                    .map_or_else(|| "?".to_owned(), |id| id.to_string());
                info!(
                    "DOOR | {} (id={}) is {} | {} -> {:?}",
                    name,
                    id,
                    report.label(),
                    line,
                    state,
                );
            }
            ShowEvent::Released => {
                info!("SHOW | all lines released");
            }
        }
    }
}

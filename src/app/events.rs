//! Outbound application events.
//!
//! The [`ShowController`](crate::show::ShowController) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.  Purely informational: nothing in the
//! core waits on or reacts to an emitted event.

use crate::indicator::IndicatorState;
use crate::notification::DoorReport;
use crate::pins::LineId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowEvent {
    /// A closed-state report was applied.
    DoorReported {
        name: &'static str,
        /// The report as parsed, before fallback resolution.
        report: DoorReport,
        line: LineId,
        state: IndicatorState,
    },

    /// Every line has been driven low for shutdown.
    Released,
}

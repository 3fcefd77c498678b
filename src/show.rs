//! Show controller, the composition root of the indicator bank.
//!
//! [`ShowController`] owns the door [`Registry`] and one [`Indicator`] per
//! registered line.  It has two entry points, each driven by its own
//! thread:
//!
//! ```text
//!  MQTT client ──ingest()──▶ ┌──────────────────┐
//!                            │  ShowController  │──▶ OutputPin (per line)
//!  refresh loop ─refresh()─▶ └──────────────────┘
//! ```
//!
//! Both take `&self`; mutual exclusion is per indicator, so a burst of
//! notifications for one door never stalls the refresh of another.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use embedded_hal::digital::OutputPin;
use log::{debug, info};

use crate::app::events::ShowEvent;
use crate::app::ports::EventSink;
use crate::error::{self, HardwareError};
use crate::indicator::{Indicator, IndicatorState, TickOutcome};
use crate::notification::{Notification, parse_report};
use crate::pins::LineId;
use crate::registry::{MonitoredEntity, Registry};
use crate::timing::Timestamp;

/// Notification counters, for logging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowStats {
    /// Closed-state reports applied to an indicator.
    pub accepted: u64,
    /// Messages on the feed that were not closed-state reports.
    pub discarded: u64,
    /// Accepted reports that resolved to the fallback door.
    pub fallback: u64,
}

#[derive(Default)]
struct Counters {
    accepted: AtomicU64,
    discarded: AtomicU64,
    fallback: AtomicU64,
}

pub struct ShowController<P> {
    registry: Registry,
    indicators: BTreeMap<LineId, Indicator<P>>,
    counters: Counters,
}

impl<P: OutputPin> ShowController<P> {
    /// Build one blinking indicator per registered line.
    ///
    /// `open_line` is called exactly once per line and must hand back a pin
    /// already configured as an output at LOW.
    pub fn new<E>(
        registry: Registry,
        at: Timestamp,
        mut open_line: impl FnMut(LineId) -> Result<P, E>,
    ) -> Result<Self, E> {
        let mut indicators = BTreeMap::new();
        for line in registry.lines() {
            let pin = open_line(line)?;
            indicators.insert(line, Indicator::new(line, pin, IndicatorState::Blinking, at));
        }
        info!("ShowController: {} indicators, all blinking", indicators.len());
        Ok(Self {
            registry,
            indicators,
            counters: Counters::default(),
        })
    }

    /// Validate a door table and open its lines.  Startup wrapper around
    /// [`Registry::new`] and [`ShowController::new`].
    pub fn from_table(
        doors: &[MonitoredEntity],
        at: Timestamp,
        open_line: impl FnMut(LineId) -> Result<P, HardwareError>,
    ) -> error::Result<Self> {
        let registry = Registry::new(doors)?;
        Ok(Self::new(registry, at, open_line)?)
    }

    /// Apply one message from the feed.
    ///
    /// Returns the requested state, or `None` if the message was not a
    /// closed-state report and was dropped.
    pub fn ingest(
        &self,
        notification: &Notification<'_>,
        at: Timestamp,
        sink: &mut impl EventSink,
    ) -> Option<IndicatorState> {
        let Some(report) = parse_report(notification) else {
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
            debug!("ignored topic '{}'", notification.topic);
            return None;
        };

        let door = self.registry.resolve(report.entity_id);
        if door.is_fallback() {
            self.counters.fallback.fetch_add(1, Ordering::Relaxed);
        }
        let state = if report.is_open {
            IndicatorState::On
        } else {
            IndicatorState::Blinking
        };

        let indicator = self.indicators.get(&door.line)?;
        indicator.set_state(state, at);
        self.counters.accepted.fetch_add(1, Ordering::Relaxed);

        sink.emit(&ShowEvent::DoorReported {
            name: door.display_name,
            report,
            line: door.line,
            state,
        });
        Some(state)
    }

    /// One refresh tick: advance every indicator to `at`.
    /// Returns the number of line writes issued.
    pub fn refresh(&self, at: Timestamp) -> usize {
        self.indicators
            .values()
            .filter(|ind| matches!(ind.advance(at), TickOutcome::Wrote(_)))
            .count()
    }

    /// Drive every line LOW.
    pub fn release(&self, sink: &mut impl EventSink) {
        for indicator in self.indicators.values() {
            indicator.release();
        }
        sink.emit(&ShowEvent::Released);
    }

    pub fn indicator(&self, line: LineId) -> Option<&Indicator<P>> {
        self.indicators.get(&line)
    }

    pub fn indicators(&self) -> impl Iterator<Item = &Indicator<P>> {
        self.indicators.values()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> ShowStats {
        ShowStats {
            accepted: self.counters.accepted.load(Ordering::Relaxed),
            discarded: self.counters.discarded.load(Ordering::Relaxed),
            fallback: self.counters.fallback.load(Ordering::Relaxed),
        }
    }
}

//! Single status indicator bound to one output line.
//!
//! Two callers touch an indicator: the notification path calls
//! [`Indicator::set_state`] and the refresh loop calls
//! [`Indicator::advance`].  They run on different threads, so every field
//! and the pin itself sit behind one mutex per indicator.
//!
//! ## Ordering
//!
//! Mutations are linearised by lock acquisition order.  `advance` reads
//! the state, applies the blink timeout, and writes the pin inside a single
//! critical section, so its self-triggered `Blinking → Off` can never
//! overwrite a `set_state` that arrived while it was deciding: that call
//! either lands before (and `advance` sees it) or after (and wins).
//!
//! ## State machine
//!
//! ```text
//!   Off ◀──────────── set_state ───────────▶ On
//!    ▲  ╲                                  ╱  ▲
//!    │   set_state                set_state   │
//!    │          ╲                  ╱          │
//!    │           ▶   Blinking   ◀            │
//!    └── elapsed ≥ 30 s ──┘   └── set_state ──┘
//! ```
//!
//! ## Write failures
//!
//! A failed pin write is logged and the new level is not committed, so the
//! next tick retries it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::digital::{OutputPin, PinState};
use log::{debug, warn};

use crate::pins::LineId;
use crate::timing::{self, Timestamp};

/// Logical behaviour of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorState {
    Off,
    On,
    Blinking,
}

/// Consistent copy of an indicator's fields, taken under its lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorSnapshot {
    pub state: IndicatorState,
    pub state_entered_at: Timestamp,
    /// `true` = line driven HIGH.
    pub level: bool,
    pub level_changed_at: Timestamp,
}

/// What a call to [`Indicator::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Output already matches the state; nothing written.
    Idle,
    /// `at` was not after the previous tick; ignored.
    Stale,
    /// One write to the line, at the given level.
    Wrote(bool),
    /// Blink timed out and the indicator switched itself off.
    Expired,
    /// The pin write failed; retried next tick.
    WriteFailed,
}

struct Inner<P> {
    pin: P,
    state: IndicatorState,
    state_entered_at: Timestamp,
    level: bool,
    level_changed_at: Timestamp,
    last_tick: Option<Timestamp>,
}

impl<P: OutputPin> Inner<P> {
    fn set_state(&mut self, state: IndicatorState, at: Timestamp) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        self.state_entered_at = at;
        true
    }

    fn drive(&mut self, line: LineId, level: bool, at: Timestamp) -> TickOutcome {
        if self.level == level {
            return TickOutcome::Idle;
        }
        self.write(line, level, at)
    }

    fn write(&mut self, line: LineId, level: bool, at: Timestamp) -> TickOutcome {
        match self.pin.set_state(PinState::from(level)) {
            Ok(()) => {
                self.level = level;
                self.level_changed_at = at;
                TickOutcome::Wrote(level)
            }
            Err(e) => {
                warn!("{line}: write {} failed: {:?}", if level { "HIGH" } else { "LOW" }, e);
                TickOutcome::WriteFailed
            }
        }
    }

    fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            state: self.state,
            state_entered_at: self.state_entered_at,
            level: self.level,
            level_changed_at: self.level_changed_at,
        }
    }
}

/// One status light.  Safe to share between the notification and refresh
/// threads (`Sync` whenever the pin is `Send`).
pub struct Indicator<P> {
    line: LineId,
    inner: Mutex<Inner<P>>,
}

impl<P: OutputPin> Indicator<P> {
    /// Wrap a pin that has already been configured as an output and driven
    /// LOW.
    pub fn new(line: LineId, pin: P, initial: IndicatorState, at: Timestamp) -> Self {
        Self {
            line,
            inner: Mutex::new(Inner {
                pin,
                state: initial,
                state_entered_at: at,
                level: false,
                level_changed_at: at,
                last_tick: None,
            }),
        }
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    // A panic while the lock is held cannot leave the fields torn: every
    // mutation above completes field assignment after the pin call returns.
    fn lock(&self) -> MutexGuard<'_, Inner<P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Request `state`.  Setting the current state is a no-op that keeps
    /// the existing entry time.  Returns `true` if the state changed.
    pub fn set_state(&self, state: IndicatorState, at: Timestamp) -> bool {
        let mut inner = self.lock();
        let from = inner.state;
        let changed = inner.set_state(state, at);
        if changed {
            debug!("{}: {:?} -> {:?} at {}", self.line, from, state, at);
        }
        changed
    }

    /// Bring the output in line with the state at time `at`.
    ///
    /// Issues at most one write to the line.  Calls whose `at` is not
    /// strictly after the previous call do nothing.
    pub fn advance(&self, at: Timestamp) -> TickOutcome {
        let mut inner = self.lock();
        if inner.last_tick.is_some_and(|prev| at <= prev) {
            return TickOutcome::Stale;
        }
        inner.last_tick = Some(at);

        match inner.state {
            IndicatorState::Off => inner.drive(self.line, false, at),
            IndicatorState::On => inner.drive(self.line, true, at),
            IndicatorState::Blinking => {
                // Timeout wins over a pending toggle.
                if timing::blink_expired(inner.state_entered_at, at) {
                    inner.set_state(IndicatorState::Off, at);
                    debug!("{}: blink expired at {}", self.line, at);
                    return TickOutcome::Expired;
                }
                if timing::toggle_due(inner.level_changed_at, at) {
                    let next = !inner.level;
                    inner.write(self.line, next, at)
                } else {
                    TickOutcome::Idle
                }
            }
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.lock().state
    }

    pub fn snapshot(&self) -> IndicatorSnapshot {
        self.lock().snapshot()
    }

    /// Drive the line LOW unconditionally.  Used on shutdown.
    pub fn release(&self) {
        let mut inner = self.lock();
        match inner.pin.set_low() {
            Ok(()) => inner.level = false,
            Err(e) => warn!("{}: release failed: {:?}", self.line, e),
        }
    }
}

//! Timing policy for the indicator bank.
//!
//! Fixed constants plus the pure predicates the refresh path uses to decide
//! when a blinking indicator toggles or gives up.  Nothing here reads a
//! clock; callers pass [`Timestamp`]s in.
//!
//! | Constant             | Value   | Meaning                                 |
//! |----------------------|---------|-----------------------------------------|
//! | `BLINK_DURATION_MS`  | 30 s    | Blinking reverts to Off after this long |
//! | `BLINK_FREQ_MS`      | 200 ms  | Minimum time between blink toggles      |
//! | `REFRESH_INTERVAL_MS`| 100 ms  | Refresh loop cadence (10 Hz)            |

use core::fmt;

/// How long an indicator may blink before it switches itself off.
pub const BLINK_DURATION_MS: u64 = 30_000;

/// Half-period of the blink square wave.
pub const BLINK_FREQ_MS: u64 = 200;

/// Period of the refresh loop.
pub const REFRESH_INTERVAL_MS: u64 = 100;

/// MQTT keep-alive interval requested from the broker.
pub const KEEP_ALIVE_SECS: u16 = 60;

/// Monotonic point in time, in milliseconds since boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1000)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Shift forward by `ms`, saturating at the end of time.
    #[must_use]
    pub const fn plus_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1000, self.0 % 1000)
    }
}

/// Milliseconds from `from` to `to`.  Zero when `to` is not after `from`,
/// so a clock that steps backwards never crosses a threshold.
pub const fn elapsed(from: Timestamp, to: Timestamp) -> u64 {
    to.0.saturating_sub(from.0)
}

/// A blink entered at `entered` has run its course by `now`.
pub const fn blink_expired(entered: Timestamp, now: Timestamp) -> bool {
    elapsed(entered, now) >= BLINK_DURATION_MS
}

/// The output last changed at `changed` is due for a blink toggle at `now`.
pub const fn toggle_due(changed: Timestamp, now: Timestamp) -> bool {
    elapsed(changed, now) >= BLINK_FREQ_MS
}

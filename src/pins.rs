//! GPIO assignments and the door table for the indicator board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

use core::fmt;

use crate::registry::{EntityId, MonitoredEntity};

/// A digital output line, identified by its GPIO number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(u8);

impl LineId {
    pub const fn new(gpio: u8) -> Self {
        Self(gpio)
    }

    pub const fn gpio(self) -> u8 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH, series resistor to GND)
// ---------------------------------------------------------------------------

pub const GARAGE_DOOR_LED: LineId = LineId::new(18);
pub const FRONT_DOOR_LED: LineId = LineId::new(17);
pub const BACK_DOOR_LED: LineId = LineId::new(21);
/// Lit for reports from sensors that are not in the table.
pub const UNKNOWN_DOOR_LED: LineId = LineId::new(14);

// ---------------------------------------------------------------------------
// Door table
// ---------------------------------------------------------------------------

/// Every monitored door, keyed by the rtl_433 sensor id.
pub const DOORS: [MonitoredEntity; 4] = [
    MonitoredEntity::new(EntityId::Known(2_651_912), "Garage Door", GARAGE_DOOR_LED),
    MonitoredEntity::new(EntityId::Known(2_898_343), "Front Door", FRONT_DOOR_LED),
    MonitoredEntity::new(EntityId::Known(2_959_527), "Back Door", BACK_DOOR_LED),
    MonitoredEntity::new(EntityId::Fallback, "Unknown", UNKNOWN_DOOR_LED),
];

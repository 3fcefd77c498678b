//! Application core: pure domain logic, zero I/O.
//!
//! The port traits in [`ports`] are the only way the core reaches the
//! outside world; the structured [`events`] are the only thing it says.

pub mod events;
pub mod ports;

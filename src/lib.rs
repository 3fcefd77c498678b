//! Door-lights firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host
//! simulation.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod indicator;
pub mod notification;
pub mod pins;
pub mod refresh;
pub mod registry;
pub mod show;
pub mod timing;

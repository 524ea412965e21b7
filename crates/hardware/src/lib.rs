//! Selector control unit model and verification harness.
//!
//! This crate implements a cycle-accurate model of a small synchronous
//! selector peripheral with the following:
//! 1. **Core:** the selector control unit state machine, its power-on-reset
//!    detector, and the pin-level input/output types.
//! 2. **Config:** pin layout and timing, deserialized from JSON.
//! 3. **Simulation:** cycle stepping, conformance monitors, stimulus scripts,
//!    the reference scenario and per-cycle report lines.
//! 4. **Statistics:** strobe, commit and connection counters.

/// Common types (constants, logic values, errors).
pub mod common;
/// Configuration (pin layout, timing, harness options).
pub mod config;
/// The modeled hardware (pins, power-on reset, control unit).
pub mod core;
/// Simulation harness (simulator, checker, stimulus, scenario, report).
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json_str`.
pub use crate::config::Config;
/// The selector control unit.
pub use crate::core::Scu;
/// Clock-stepping simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;

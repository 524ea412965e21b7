//! Simulation harness around the control unit.
//!
//! 1. **Simulator:** clocks the unit and notifies observers.
//! 2. **Checker:** continuous monitors and point expectations.
//! 3. **Stimulus:** JSON scripts and the runner that plays them.
//! 4. **Scenario:** the reference bring-up and selector sweep.
//! 5. **Report:** per-cycle log lines.

/// Conformance monitors and expectations.
pub mod checker;

/// Per-cycle report formatting.
pub mod report;

/// Reference stimulus.
pub mod scenario;

/// Clock stepping and observers.
pub mod simulator;

/// Stimulus scripts and the runner.
pub mod stimulus;

pub use checker::Checker;
pub use simulator::{CycleRecord, Observer, Simulator};
pub use stimulus::{Flag, RunSummary, Runner, Script, Step};

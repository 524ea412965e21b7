//! # Unit Components
//!
//! Groups the tests per crate module, plus property tests that drive the
//! unit with random stimulus.





/// Unit tests for the simulation harness.
pub mod sim;

/// Unit tests for [`SimStats`](selsim_core::stats::SimStats) counters.
pub mod stats;

//! Simulator: owns the control unit and steps it one clock edge at a time.
//!
//! Observers receive a read-only [`CycleRecord`] after every edge; they never
//! get a mutable handle on the unit.

use std::fmt;

use serde::Serialize;

use crate::config::Config;
use crate::core::pins::{PinInputs, PinOutputs};
use crate::core::scu::Scu;

/// What happened on one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    /// 1-based cycle index (0 is the power-up snapshot).
    pub cycle: u64,
    /// Pins driven before the edge.
    pub inputs: PinInputs,
    /// Pins observed after the edge.
    pub outputs: PinOutputs,
}

/// Per-cycle observation callback.
pub trait Observer: Send {
    /// Called once after every clock edge.
    fn on_cycle(&mut self, record: &CycleRecord);
}

/// Top-level simulator: the control unit plus its observers.
pub struct Simulator {
    scu: Scu,
    cycle: u64,
    observers: Vec<Box<dyn Observer>>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("scu", &self.scu)
            .field("cycle", &self.cycle)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Simulator {
    /// Creates a simulator with a freshly powered-up unit.
    pub fn new(config: &Config) -> Self {
        Self {
            scu: Scu::new(config),
            cycle: 0,
            observers: Vec::new(),
        }
    }

    /// Registers an observer called after every clock edge.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self, inputs: &PinInputs) -> CycleRecord {
        let outputs = self.scu.tick(inputs);
        self.cycle += 1;
        let record = CycleRecord {
            cycle: self.cycle,
            inputs: *inputs,
            outputs,
        };
        for observer in &mut self.observers {
            observer.on_cycle(&record);
        }
        record
    }

    /// Holds `inputs` for `cycles` edges and returns the last record.
    ///
    /// With `cycles == 0` nothing is clocked and the current snapshot is
    /// returned.
    pub fn run(&mut self, inputs: &PinInputs, cycles: u64) -> CycleRecord {
        let mut last = self.snapshot(inputs);
        for _ in 0..cycles {
            last = self.tick(inputs);
        }
        last
    }

    /// Record describing the current outputs without clocking.
    pub const fn snapshot(&self, inputs: &PinInputs) -> CycleRecord {
        CycleRecord {
            cycle: self.cycle,
            inputs: *inputs,
            outputs: self.scu.outputs(),
        }
    }

    /// Number of clock edges applied so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Read-only view of the unit.
    pub const fn scu(&self) -> &Scu {
        &self.scu
    }
}

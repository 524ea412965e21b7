//! Stimulus scripts and the runner that plays them.
//!
//! A script is a flat list of [`Step`]s: drive pins, clock, expect. Scripts
//! are plain JSON so they can live next to the configuration:
//!
//! ```json
//! { "name": "commit 3", "steps": [
//!     { "op": "drive", "ena": true, "rst_n": true },
//!     { "op": "compose", "flags": ["SEL_EN", "STROBE", "ENABLE"], "sel": 3 },
//!     { "op": "clock", "cycles": 3 },
//!     { "op": "expect_ready", "value": "1" },
//!     { "op": "expect_ctrl", "sel": 3 }
//! ] }
//! ```
//!
//! Every clock edge is fed through the [`Checker`] monitors; point
//! expectations are checked against the most recent edge.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::error::{ConfigError, VerifyError};
use crate::common::logic::{Bits, Logic};
use crate::config::{Config, PinLayout};
use crate::core::pins::{InputVector, PinInputs};
use crate::sim::checker::Checker;
use crate::sim::simulator::{CycleRecord, Observer, Simulator};
use crate::stats::SimStats;

/// A named control flag of `ui_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    /// Selector latch write-enable.
    SelEn,
    /// Master enable gate.
    Enable,
    /// Commit strobe.
    Strobe,
}

impl Flag {
    /// Bit of this flag in `layout`.
    pub const fn mask(self, layout: &PinLayout) -> u8 {
        match self {
            Self::SelEn => layout.sel_en,
            Self::Enable => layout.enable,
            Self::Strobe => layout.strobe,
        }
    }

    /// OR of several flags.
    pub fn combine(flags: &[Self], layout: &PinLayout) -> u8 {
        flags.iter().fold(0, |acc, f| acc | f.mask(layout))
    }
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Set pins; absent fields keep their value.
    Drive {
        /// Master enable.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ena: Option<bool>,
        /// Active-low reset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rst_n: Option<bool>,
        /// Raw `ui_in`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ui_in: Option<u8>,
        /// Raw `uio_in`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uio_in: Option<u8>,
    },
    /// Rewrite `ui_in` from the current value: replace the control flags
    /// and/or the selector.
    Compose {
        /// New control flags; absent keeps the current ones.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags: Option<Vec<Flag>>,
        /// New selector; absent keeps the current one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sel: Option<u8>,
    },
    /// Apply clock edges with the current pins.
    Clock {
        /// Number of rising edges.
        cycles: u64,
    },
    /// Check READY on the latest edge.
    ExpectReady {
        /// Expected level.
        value: Logic,
    },
    /// Check the indicator on the latest edge.
    ExpectCtrl {
        /// Expected selector.
        sel: u8,
    },
    /// Check `oa_por` on the latest edge.
    ExpectPor {
        /// Expected pattern, e.g. `"1X"`.
        value: Bits,
    },
    /// Emit a log line.
    Log {
        /// Message text.
        message: String,
    },
}

impl Step {
    /// `Drive` helper for the reset/enable pins only.
    pub const fn pins(ena: Option<bool>, rst_n: Option<bool>) -> Self {
        Self::Drive {
            ena,
            rst_n,
            ui_in: None,
            uio_in: None,
        }
    }

    /// `Compose` helper.
    pub fn compose(flags: &[Flag], sel: Option<u8>) -> Self {
        Self::Compose {
            flags: Some(flags.to_vec()),
            sel,
        }
    }

    /// `Clock` helper.
    pub const fn clock(cycles: u64) -> Self {
        Self::Clock { cycles }
    }

    /// `Log` helper.
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }
}

/// A named sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Steps in order.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a JSON script.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON script file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read, [`ConfigError::Parse`]
    /// on malformed JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Outcome of a passing run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Script name.
    pub name: String,
    /// Clock edges applied.
    pub cycles: u64,
    /// Records that went through the monitors.
    pub checked: u64,
    /// Point expectations that passed.
    pub expectations: u64,
    /// Unit statistics.
    pub stats: SimStats,
}

/// Plays scripts against a simulator and checks every edge.
#[derive(Debug)]
pub struct Runner {
    sim: Simulator,
    checker: Checker,
    layout: PinLayout,
    pins: PinInputs,
    last: Option<CycleRecord>,
    max_cycles: u64,
    expectations: u64,
}

impl Runner {
    /// Creates a runner around a freshly powered-up unit.
    pub fn new(config: &Config) -> Self {
        Self {
            sim: Simulator::new(config),
            checker: Checker::new(config),
            layout: config.pins,
            pins: PinInputs::default(),
            last: None,
            max_cycles: config.general.max_cycles,
            expectations: 0,
        }
    }

    /// Registers an observer on the underlying simulator.
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.sim.add_observer(observer);
        self
    }

    /// Runs every step of `script`.
    ///
    /// # Errors
    ///
    /// The first [`VerifyError`] raised by a step or a monitor.
    pub fn run(&mut self, script: &Script) -> Result<RunSummary, VerifyError> {
        info!(name = %script.name, steps = script.steps.len(), "running script");
        for step in &script.steps {
            self.step(step)?;
        }
        Ok(self.summary(&script.name))
    }

    /// Executes a single step.
    ///
    /// # Errors
    ///
    /// [`VerifyError::InvalidStimulus`] for out-of-range pin values,
    /// [`VerifyError::AssertionMismatch`] from monitors and expectations,
    /// [`VerifyError::CycleLimit`] past the cycle budget.
    pub fn step(&mut self, step: &Step) -> Result<(), VerifyError> {
        let cycle = self.sim.cycle();
        match step {
            Step::Drive {
                ena,
                rst_n,
                ui_in,
                uio_in,
            } => {
                if let Some(ena) = ena {
                    self.pins.ena = *ena;
                }
                if let Some(rst_n) = rst_n {
                    self.pins.rst_n = *rst_n;
                }
                if let Some(raw) = ui_in {
                    self.pins.ui_in =
                        InputVector::new(*raw, &self.layout).map_err(|e| e.at_cycle(cycle))?;
                }
                if let Some(raw) = uio_in {
                    self.pins.uio_in = *raw;
                }
            }
            Step::Compose { flags, sel } => {
                let flags = flags.as_deref().map(|f| Flag::combine(f, &self.layout));
                self.pins.ui_in = InputVector::compose(self.pins.ui_in, flags, *sel, &self.layout)
                    .map_err(|e| e.at_cycle(cycle))?;
            }
            Step::Clock { cycles } => self.clock(*cycles)?,
            Step::ExpectReady { value } => {
                self.checker.expect_ready(&self.current(), *value)?;
                self.expectations += 1;
            }
            Step::ExpectCtrl { sel } => {
                self.checker.expect_ctrl(&self.current(), *sel)?;
                self.expectations += 1;
            }
            Step::ExpectPor { value } => {
                self.checker.expect_por(&self.current(), *value)?;
                self.expectations += 1;
            }
            Step::Log { message } => info!(cycle, "{message}"),
        }
        Ok(())
    }

    fn clock(&mut self, cycles: u64) -> Result<(), VerifyError> {
        for _ in 0..cycles {
            if self.sim.cycle() >= self.max_cycles {
                return Err(VerifyError::CycleLimit {
                    limit: self.max_cycles,
                });
            }
            let record = self.sim.tick(&self.pins);
            self.checker.observe(&record)?;
            self.last = Some(record);
        }
        Ok(())
    }

    /// Latest edge, or the power-up snapshot before the first edge.
    pub fn current(&self) -> CycleRecord {
        self.last.unwrap_or_else(|| self.sim.snapshot(&self.pins))
    }

    /// Pins that the next edge will sample.
    pub const fn pins(&self) -> &PinInputs {
        &self.pins
    }

    /// Read-only view of the simulator.
    pub const fn simulator(&self) -> &Simulator {
        &self.sim
    }

    /// Summary of everything run so far.
    pub fn summary(&self, name: &str) -> RunSummary {
        RunSummary {
            name: name.to_string(),
            cycles: self.sim.cycle(),
            checked: self.checker.checked(),
            expectations: self.expectations,
            stats: self.sim.scu().stats().clone(),
        }
    }
}

//! Conformance checker.
//!
//! Watches the pins cycle by cycle and reports the first observation the
//! control unit's contract forbids. It only sees what a testbench sees
//! (driven inputs, observed outputs) and keeps its own scoreboard of what
//! the outputs must be, so it can be pointed at any implementation of the
//! unit, not just [`Scu`](crate::core::Scu).
//!
//! # Continuous monitors
//!
//! * `oa_por` only ever reads `XX`, `1X`, `11`, in that order.
//! * `oa_ctrl` mirrors the `uio_out`/`uo_out` split of the indicator.
//! * Reset drives READY low.
//! * A strobe edge with `ENABLE` holds READY low for the disconnect window.
//! * Once connected, the indicator is one-hot and matches the last selector
//!   written with `SEL_EN`.
//! * With `ENABLE` low the outputs do not change.
//!
//! # Point expectations
//!
//! [`Checker::expect_ready`], [`Checker::expect_ctrl`] and
//! [`Checker::expect_por`] check a single record on request.

use crate::common::constants::{CTRL_WIDTH, SEL_COUNT};
use crate::common::error::VerifyError;
use crate::common::logic::{Bits, Logic};
use crate::config::{Config, PinLayout};
use crate::core::pins::{PinOutputs, indicator_for};
use crate::core::por::PorState;
use crate::sim::simulator::CycleRecord;

/// Scoreboard for the continuous monitors.
#[derive(Debug, Clone)]
pub struct Checker {
    layout: PinLayout,
    disconnect_cycles: u8,
    release_cycles: u8,

    por: PorState,
    release_run: u8,
    active: bool,
    strobe_prev: bool,
    expected_sel: Option<u8>,
    window_left: u8,
    last_outputs: Option<PinOutputs>,
    checked: u64,
}

impl Checker {
    /// Creates a checker for a unit built from `config`.
    pub const fn new(config: &Config) -> Self {
        Self {
            layout: config.pins,
            disconnect_cycles: config.scu.disconnect_cycles,
            release_cycles: config.scu.release_cycles,
            por: PorState::Unknown,
            release_run: 0,
            active: false,
            strobe_prev: false,
            expected_sel: None,
            window_left: 0,
            last_outputs: None,
            checked: 0,
        }
    }

    /// Feeds one clock edge through every monitor.
    ///
    /// # Errors
    ///
    /// [`VerifyError::AssertionMismatch`] for the first violated monitor.
    pub fn observe(&mut self, record: &CycleRecord) -> Result<(), VerifyError> {
        let cycle = record.cycle;
        let out = &record.outputs;

        self.check_por(cycle, out)?;
        self.check_bus(cycle, out)?;

        if !record.inputs.rst_n {
            self.clear();
            if self.por != PorState::Unknown {
                self.expect_level(cycle, "READY (reset)", out, Logic::Zero)?;
            }
        } else if self.active {
            self.check_active(record)?;
        } else if self.por != PorState::Unknown {
            // Release sampling starts on the second edge, as in the unit.
            self.strobe_prev = record.inputs.ui_in.fields(&self.layout).strobe;
            if record.inputs.ena {
                self.release_run = self.release_run.saturating_add(1);
                self.active = self.release_run >= self.release_cycles;
            } else {
                self.release_run = 0;
            }
        }

        self.last_outputs = Some(*out);
        self.checked += 1;
        Ok(())
    }

    /// Number of records that passed every monitor.
    pub const fn checked(&self) -> u64 {
        self.checked
    }

    /// Selector the scoreboard expects on the indicator bus.
    pub const fn expected_sel(&self) -> Option<u8> {
        self.expected_sel
    }

    fn clear(&mut self) {
        self.active = false;
        self.release_run = 0;
        self.strobe_prev = false;
        self.expected_sel = None;
        self.window_left = 0;
    }

    fn check_por(&mut self, cycle: u64, out: &PinOutputs) -> Result<(), VerifyError> {
        match PorState::from_bits(out.oa_por) {
            None => Err(VerifyError::mismatch(
                cycle,
                "oa_por",
                "XX|1X|11",
                out.oa_por,
            )),
            Some(state) if state < self.por => Err(VerifyError::mismatch(
                cycle,
                "oa_por (regressed)",
                self.por.bits(),
                out.oa_por,
            )),
            Some(state) => {
                self.por = state;
                Ok(())
            }
        }
    }

    fn check_bus(&self, cycle: u64, out: &PinOutputs) -> Result<(), VerifyError> {
        let pins = out.pin_indicator(&self.layout);
        if pins == out.indicator() {
            return Ok(());
        }
        Err(VerifyError::mismatch(
            cycle,
            "indicator bus",
            format!("oa_ctrl={}", out.oa_ctrl),
            format!("uo_out={} uio_out={}", out.uo_out, out.uio_out),
        ))
    }

    fn check_active(&mut self, record: &CycleRecord) -> Result<(), VerifyError> {
        let cycle = record.cycle;
        let out = &record.outputs;
        let input = record.inputs.ui_in.fields(&self.layout);
        let edge = input.strobe && !self.strobe_prev;
        self.strobe_prev = input.strobe;

        if !input.enable {
            if let Some(prev) = self.last_outputs
                && (prev.uo_out != out.uo_out || prev.oa_ctrl != out.oa_ctrl)
            {
                return Err(VerifyError::mismatch(
                    cycle,
                    "enable gating",
                    format!("uo_out={} ctrl={}", prev.uo_out, prev.oa_ctrl),
                    format!("uo_out={} ctrl={}", out.uo_out, out.oa_ctrl),
                ));
            }
            return Ok(());
        }

        if edge {
            if input.sel_en {
                self.expected_sel = Some(input.sel);
            }
            self.window_left = self.disconnect_cycles;
        }

        if self.window_left > 0 {
            self.window_left -= 1;
            return self.expect_level(cycle, "READY (disconnect window)", out, Logic::Zero);
        }

        match self.expected_sel {
            None => self.expect_level(cycle, "READY (nothing committed)", out, Logic::Zero),
            Some(sel) => {
                self.expect_level(cycle, "READY", out, Logic::One)?;
                self.check_indicator(cycle, out, sel)
            }
        }
    }

    /// Selector 15 has no indicator line, so it is exempt from the one-hot
    /// monitor and must read 0.
    fn check_indicator(&self, cycle: u64, out: &PinOutputs, sel: u8) -> Result<(), VerifyError> {
        let expected = indicator_for(sel);
        let Some(actual) = out.indicator() else {
            return Err(VerifyError::mismatch(
                cycle,
                "oa_ctrl",
                format!("{expected:04x}"),
                out.oa_ctrl,
            ));
        };
        if u32::from(sel) < CTRL_WIDTH && actual.count_ones() != 1 {
            return Err(VerifyError::mismatch(
                cycle,
                "one-hot",
                "exactly one indicator line",
                format!("{actual:04x}"),
            ));
        }
        if actual != expected {
            return Err(VerifyError::mismatch(
                cycle,
                "oa_ctrl",
                format!("{expected:04x}"),
                format!("{actual:04x}"),
            ));
        }
        Ok(())
    }

    fn expect_level(
        &self,
        cycle: u64,
        signal: &'static str,
        out: &PinOutputs,
        expected: Logic,
    ) -> Result<(), VerifyError> {
        let actual = out.ready(&self.layout);
        if actual == expected {
            Ok(())
        } else {
            Err(VerifyError::mismatch(cycle, signal, expected, actual))
        }
    }

    /// Checks READY on one record. `Logic::X` expects an unresolved pin.
    ///
    /// # Errors
    ///
    /// [`VerifyError::AssertionMismatch`] on a different level.
    pub fn expect_ready(&self, record: &CycleRecord, expected: Logic) -> Result<(), VerifyError> {
        self.expect_level(record.cycle, "O_READY", &record.outputs, expected)
    }

    /// Checks the indicator for selector `sel` on both the pins and `oa_ctrl`.
    ///
    /// The pin check looks at the bus that carries the selected line:
    /// `uio_out` for 0..=7, the non-READY bits of `uo_out` for 8..=14.
    /// Selector 15 has no line, so only `oa_ctrl == 0` is checked.
    ///
    /// # Errors
    ///
    /// [`VerifyError::InvalidStimulus`] for `sel > 15`,
    /// [`VerifyError::AssertionMismatch`] when a bus disagrees.
    pub fn expect_ctrl(&self, record: &CycleRecord, sel: u8) -> Result<(), VerifyError> {
        let cycle = record.cycle;
        let out = &record.outputs;
        if u32::from(sel) >= SEL_COUNT {
            return Err(
                VerifyError::invalid("expect_ctrl", format!("0..={}", SEL_COUNT - 1), u32::from(sel))
                    .at_cycle(cycle),
            );
        }
        let bit = indicator_for(sel);

        if u32::from(sel) < CTRL_WIDTH {
            let (bus, on_pins) = if sel <= 7 {
                ("uio_out", out.uio_out.to_u16())
            } else {
                let high = out
                    .uo_out
                    .to_u16()
                    .map(|uo| u16::from(self.layout.unpack_high(uo as u8)) << 8);
                ("uo_out", high)
            };
            if on_pins != Some(bit) {
                return Err(VerifyError::mismatch(
                    cycle,
                    bus,
                    format!("{bit:04x}"),
                    on_pins.map_or_else(|| "X".to_string(), |v| format!("{v:04x}")),
                ));
            }
        }

        match out.indicator() {
            Some(ctrl) if ctrl == bit => Ok(()),
            Some(ctrl) => Err(VerifyError::mismatch(
                cycle,
                "oa_ctrl",
                format!("{bit:04x}"),
                format!("{ctrl:04x}"),
            )),
            None => Err(VerifyError::mismatch(
                cycle,
                "oa_ctrl",
                format!("{bit:04x}"),
                out.oa_ctrl,
            )),
        }
    }

    /// Checks the power-on-reset diagnostic bus.
    ///
    /// # Errors
    ///
    /// [`VerifyError::AssertionMismatch`] on a different pattern.
    pub fn expect_por(&self, record: &CycleRecord, expected: Bits) -> Result<(), VerifyError> {
        if record.outputs.oa_por == expected {
            Ok(())
        } else {
            Err(VerifyError::mismatch(
                record.cycle,
                "oa_por",
                expected,
                record.outputs.oa_por,
            ))
        }
    }
}

//! Pin-level stimulus and observation types.
//!
//! The unit talks to the outside world through the TinyTapeout user pins:
//! `ena`, `rst_n`, `ui_in`, `uio_in` in; `uo_out`, `uio_out` out, plus two
//! debug-only diagnostic buses (`oa_por`, `oa_ctrl`).

use serde::Serialize;

use crate::common::constants::{CTRL_MASK, CTRL_WIDTH, PIN_WIDTH, SEL_COUNT};
use crate::common::error::VerifyError;
use crate::common::logic::{Bits, Logic};
use crate::config::{InputFields, PinLayout};

/// Indicator pattern for a committed selector.
///
/// One-hot for selectors 0..=14; selector 15 has no indicator line and
/// yields an empty pattern.
pub const fn indicator_for(sel: u8) -> u16 {
    if (sel as u32) < CTRL_WIDTH {
        1 << sel
    } else {
        0
    }
}

/// A validated `ui_in` vector.
///
/// Reserved bits are guaranteed clear; everything else is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct InputVector(u8);

impl InputVector {
    /// All inputs low.
    pub const ZERO: Self = Self(0);

    /// Validates a raw `ui_in` value against the pin layout.
    ///
    /// # Errors
    ///
    /// [`VerifyError::InvalidStimulus`] when a reserved bit is set.
    pub fn new(raw: u8, layout: &PinLayout) -> Result<Self, VerifyError> {
        let reserved = layout.reserved_mask();
        if (raw & reserved) != 0 {
            return Err(VerifyError::invalid(
                "ui_in",
                format!("reserved bits {reserved:#04x} clear"),
                u32::from(raw),
            ));
        }
        Ok(Self(raw))
    }

    /// Derives the next vector from `prev`.
    ///
    /// `flags` replaces the control flags (`SEL_EN | ENABLE | STROBE`) and
    /// `sel` replaces the selector field; `None` keeps the value from `prev`.
    ///
    /// # Errors
    ///
    /// [`VerifyError::InvalidStimulus`] when `flags` has bits outside the
    /// control mask or `sel` does not fit the selector field.
    pub fn compose(
        prev: Self,
        flags: Option<u8>,
        sel: Option<u8>,
        layout: &PinLayout,
    ) -> Result<Self, VerifyError> {
        let control = layout.control_mask();
        let claimed = control | layout.sel_mask;

        let mut next = match flags {
            Some(f) if (f & !control) != 0 => {
                return Err(VerifyError::invalid(
                    "flags",
                    format!("subset of {control:#04x}"),
                    u32::from(f),
                ));
            }
            Some(f) => f,
            None => prev.0 & control,
        };
        next |= match sel {
            Some(s) if u32::from(s) >= SEL_COUNT => {
                return Err(VerifyError::invalid(
                    "sel",
                    format!("0..={}", SEL_COUNT - 1),
                    u32::from(s),
                ));
            }
            Some(s) => layout.encode_sel(s),
            None => prev.0 & layout.sel_mask,
        };
        Ok(Self((prev.0 & !claimed) | next))
    }

    /// Raw pin value.
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Decoded fields.
    pub const fn fields(self, layout: &PinLayout) -> InputFields {
        layout.decode(self.0)
    }
}

/// Everything the harness drives before one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PinInputs {
    /// Master power/enable gate.
    pub ena: bool,
    /// Active-low reset.
    pub rst_n: bool,
    /// Selector and control flags.
    pub ui_in: InputVector,
    /// Bidirectional inputs; unused by the unit.
    pub uio_in: u8,
}

impl PinInputs {
    /// Builds a stimulus with `uio_in` held low.
    pub const fn new(ena: bool, rst_n: bool, ui_in: InputVector) -> Self {
        Self {
            ena,
            rst_n,
            ui_in,
            uio_in: 0,
        }
    }
}

/// Everything the harness can observe after one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinOutputs {
    /// READY plus indicator lines 8..=14.
    pub uo_out: Bits,
    /// Indicator lines 0..=7.
    pub uio_out: Bits,
    /// Power-on-reset diagnostic.
    pub oa_por: Bits,
    /// Full indicator mirror.
    pub oa_ctrl: Bits,
}

impl PinOutputs {
    /// Outputs of a unit that has not been reset yet.
    pub const fn undriven(por: Bits) -> Self {
        Self {
            uo_out: Bits::unknown(PIN_WIDTH),
            uio_out: Bits::unknown(PIN_WIDTH),
            oa_por: por,
            oa_ctrl: Bits::unknown(CTRL_WIDTH),
        }
    }

    /// Drives READY and the indicator onto the pins.
    pub fn drive(layout: &PinLayout, ready: bool, indicator: u16, por: Bits) -> Self {
        let indicator = indicator & CTRL_MASK;
        let high = layout.pack_high((indicator >> 8) as u8);
        let ready_bits = if ready { layout.ready } else { 0 };
        Self {
            uo_out: Bits::known(PIN_WIDTH, u16::from(high | ready_bits)),
            uio_out: Bits::known(PIN_WIDTH, indicator & 0xff),
            oa_por: por,
            oa_ctrl: Bits::known(CTRL_WIDTH, indicator),
        }
    }

    /// READY level.
    pub const fn ready(&self, layout: &PinLayout) -> Logic {
        self.uo_out.bit(layout.ready_bit())
    }

    /// Indicator value from the diagnostic mirror.
    pub const fn indicator(&self) -> Option<u16> {
        self.oa_ctrl.to_u16()
    }

    /// Indicator value reassembled from `uio_out` and `uo_out`.
    pub fn pin_indicator(&self, layout: &PinLayout) -> Option<u16> {
        let low = self.uio_out.to_u16()?;
        let uo_out = self.uo_out.to_u16()? as u8;
        Some(low | (u16::from(layout.unpack_high(uo_out)) << 8))
    }
}

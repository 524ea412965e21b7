//! Pin-level constants for the selector control unit.
//!
//! Bit positions follow the TinyTapeout user pinout: `ui_in` carries the
//! selector value and its control strobes, `uo_out` and `uio_out` carry
//! READY and the control indicator lines.

/// Width of the selector field in bits.
pub const SEL_WIDTH: u32 = 4;

/// Number of encodable selector values.
pub const SEL_COUNT: u32 = 1 << SEL_WIDTH;

/// Number of control indicator lines.
///
/// One line per selector value except the last: selector 15 has no line.
pub const CTRL_WIDTH: u32 = 15;

/// Mask covering every control indicator line.
pub const CTRL_MASK: u16 = (1 << CTRL_WIDTH) - 1;

/// Width of the dedicated and bidirectional pin buses.
pub const PIN_WIDTH: u32 = 8;

/// Width of the power-on-reset diagnostic bus.
pub const POR_WIDTH: u32 = 2;

/// `ui_in[3:0]`: selector value.
pub const I_SEL_MASK: u8 = 0x0f;

/// `ui_in[4]`: selector latch write-enable.
pub const I_SEL_EN: u8 = 0x10;

/// `ui_in[6]`: master enable gate.
pub const I_ENABLE: u8 = 0x40;

/// `ui_in[7]`: edge-triggered commit strobe.
pub const I_STROBE: u8 = 0x80;

/// `uo_out[7]`: READY (indicator bus output-enable).
pub const O_READY: u8 = 0x80;

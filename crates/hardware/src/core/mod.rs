//! The modeled hardware.
//!
//! 1. **Pins:** validated input vectors and the observable output buses.
//! 2. **Power-on reset:** the `oa_por` settling detector.
//! 3. **SCU:** the selector control unit state machine.

/// Pin-level stimulus and observation types.
pub mod pins;

/// Power-on-reset detector.
pub mod por;

/// Selector control unit state machine.
pub mod scu;

pub use pins::{InputVector, PinInputs, PinOutputs};
pub use por::PorState;
pub use scu::{Phase, Scu};

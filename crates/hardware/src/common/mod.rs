//! Common types shared by the model, the checker and the harness.
//!
//! 1. **Constants:** pin bit positions and bus widths.
//! 2. **Logic values:** resolvable/unresolvable bits and bit vectors.
//! 3. **Errors:** verification failures and load errors.

/// Pin bit positions and bus widths.
pub mod constants;

/// Error types.
pub mod error;

/// `0`/`1`/`X` logic levels and bit vectors.
pub mod logic;

pub use error::{ConfigError, VerifyError};
pub use logic::{Bits, Logic};

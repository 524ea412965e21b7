//! Power-on-reset detector.
//!
//! Tracks how far reset has propagated through the clock domain. The state
//! is exported on the 2-bit `oa_por` diagnostic bus and only ever moves
//! forward: `XX` until the second clock edge, `1X` once the detector has
//! settled, `11` after reset has been sampled with the unit disabled.

use serde::Serialize;

use crate::common::constants::POR_WIDTH;
use crate::common::logic::{Bits, Logic};

/// Settling stage of the power-on-reset detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum PorState {
    /// `XX`: nothing known yet.
    #[default]
    Unknown,
    /// `1X`: detector running, reset not yet seen.
    Settling,
    /// `11`: reset propagated; stable for the rest of the run.
    Settled,
}

impl PorState {
    /// Diagnostic bus encoding.
    pub const fn bits(self) -> Bits {
        match self {
            Self::Unknown => Bits::unknown(POR_WIDTH),
            Self::Settling => Bits::unknown(POR_WIDTH).with_bit(1, Logic::One),
            Self::Settled => Bits::known(POR_WIDTH, 0b11),
        }
    }

    /// Inverse of [`PorState::bits`]; `None` for patterns the detector never drives.
    pub fn from_bits(bits: Bits) -> Option<Self> {
        [Self::Unknown, Self::Settling, Self::Settled]
            .into_iter()
            .find(|state| state.bits() == bits)
    }
}

/// The detector itself.
#[derive(Debug, Clone, Default)]
pub struct PowerOnReset {
    state: PorState,
    edges: u64,
}

impl PowerOnReset {
    /// A detector straight out of power-up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    pub const fn state(&self) -> PorState {
        self.state
    }

    /// `true` once the detector reads `11`.
    pub fn is_settled(&self) -> bool {
        self.state == PorState::Settled
    }

    /// Samples one rising clock edge and returns the new stage.
    pub fn clock(&mut self, ena: bool, rst_n: bool) -> PorState {
        self.edges = self.edges.saturating_add(1);
        self.state = match self.state {
            PorState::Unknown if self.edges >= 2 => PorState::Settling,
            PorState::Settling if !rst_n && !ena => PorState::Settled,
            unchanged => unchanged,
        };
        self.state
    }
}

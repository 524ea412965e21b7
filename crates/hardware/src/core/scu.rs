//! Selector Control Unit.
//!
//! A single synchronous state machine clocked once per rising edge. The unit
//! latches a 4-bit selector on a strobe rising edge, drops READY for a short
//! disconnect window, then reconnects with a one-hot control indicator for
//! the committed selector.
//!
//! # Phases
//!
//! * `PowerUp`: first clock edge; nothing is sampled.
//! * `ResetHold`: reset applied, or waiting for `ena && rst_n` to hold for
//!   `release_cycles` edges.
//! * `Active`: normal operation, disconnected or connected.
//!
//! # Active cycle
//!
//! 1. Detect a strobe rising edge against the edge register.
//! 2. With `ENABLE` low nothing but the edge register changes.
//! 3. An edge with `ENABLE` (re)starts the disconnect window and, with
//!    `SEL_EN`, latches the selector.
//! 4. While the window counts down READY is low and the indicator bus reads 0.
//! 5. Afterwards READY is high and the indicator is `1 << committed_sel`.

use serde::Serialize;
use tracing::{debug, trace};

use crate::common::logic::Bits;
use crate::config::{Config, PinLayout};
use crate::core::pins::{InputVector, PinInputs, PinOutputs, indicator_for};
use crate::core::por::{PorState, PowerOnReset};
use crate::stats::SimStats;

/// Top-level state of the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// No clock edge seen yet.
    PowerUp,
    /// Reset applied or not yet released.
    ResetHold,
    /// Normal operation.
    Active,
}

/// The Selector Control Unit model.
#[derive(Debug, Clone)]
pub struct Scu {
    layout: PinLayout,
    disconnect_cycles: u8,
    release_cycles: u8,

    phase: Phase,
    por: PowerOnReset,
    /// Latched selector; `None` until the first commit after reset.
    committed_sel: Option<u8>,
    ready: bool,
    indicator: u16,
    strobe_prev: bool,
    delay_counter: u8,
    release_count: u8,
    /// Set by the first synchronous reset or release; outputs read `X` before that.
    initialized: bool,

    outputs: PinOutputs,
    stats: SimStats,
}

impl Scu {
    /// Creates a unit in the power-up state.
    pub fn new(config: &Config) -> Self {
        let por = PowerOnReset::new();
        Self {
            layout: config.pins,
            disconnect_cycles: config.scu.disconnect_cycles,
            release_cycles: config.scu.release_cycles,
            phase: Phase::PowerUp,
            outputs: PinOutputs::undriven(por.state().bits()),
            por,
            committed_sel: None,
            ready: false,
            indicator: 0,
            strobe_prev: false,
            delay_counter: 0,
            release_count: 0,
            initialized: false,
            stats: SimStats::default(),
        }
    }

    /// Applies one rising clock edge and returns the new pin outputs.
    pub fn tick(&mut self, pins: &PinInputs) -> PinOutputs {
        self.stats.cycles += 1;
        let por = self.por.clock(pins.ena, pins.rst_n);

        match self.phase {
            Phase::PowerUp => {
                debug!("first clock edge, holding reset");
                self.phase = Phase::ResetHold;
            }
            Phase::ResetHold => self.reset_hold(pins, por),
            Phase::Active => self.active(pins),
        }

        self.outputs = self.drive();
        trace!(
            cycle = self.stats.cycles,
            phase = ?self.phase,
            ready = self.ready,
            indicator = self.indicator,
            delay = self.delay_counter,
            "tick"
        );
        self.outputs
    }

    /// Cycle-level contract: one clock edge, returning `uo_out` and the
    /// full indicator (`oa_ctrl`). `uio_in` is held low.
    pub fn step(&mut self, ena: bool, rst_n: bool, ui_in: InputVector) -> (Bits, Bits) {
        let out = self.tick(&PinInputs::new(ena, rst_n, ui_in));
        (out.uo_out, out.oa_ctrl)
    }

    fn reset_hold(&mut self, pins: &PinInputs, por: PorState) {
        if por == PorState::Unknown {
            return;
        }
        if !pins.rst_n {
            self.apply_reset();
            return;
        }

        // POR is diagnostic only; release depends on `ena` and `rst_n` alone.
        self.strobe_prev = pins.ui_in.fields(&self.layout).strobe;
        if pins.ena {
            self.release_count = self.release_count.saturating_add(1);
            if self.release_count >= self.release_cycles {
                debug!(cycle = self.stats.cycles, ?por, "reset released, unit active");
                self.phase = Phase::Active;
                self.initialized = true;
            }
        } else {
            self.release_count = 0;
        }
    }

    fn apply_reset(&mut self) {
        if self.phase == Phase::Active {
            debug!(cycle = self.stats.cycles, "reset asserted while active");
        }
        self.stats.reset_cycles += 1;
        self.phase = Phase::ResetHold;
        self.committed_sel = None;
        self.ready = false;
        self.indicator = 0;
        self.strobe_prev = false;
        self.delay_counter = 0;
        self.release_count = 0;
        self.initialized = true;
    }

    fn active(&mut self, pins: &PinInputs) {
        if !pins.rst_n {
            self.apply_reset();
            return;
        }

        let input = pins.ui_in.fields(&self.layout);
        let edge = input.strobe && !self.strobe_prev;
        self.strobe_prev = input.strobe;

        // ENABLE gates every output update; only the edge register moves.
        if !input.enable {
            self.stats.gated_cycles += 1;
            if edge {
                self.stats.lost_edges += 1;
                trace!(cycle = self.stats.cycles, "strobe edge with ENABLE low");
            }
            return;
        }
        self.stats.enabled_cycles += 1;

        if edge {
            self.stats.strobe_edges += 1;
            if input.sel_en {
                self.stats.commits += 1;
                self.committed_sel = Some(input.sel);
                debug!(cycle = self.stats.cycles, sel = input.sel, "selector committed");
            } else {
                self.stats.restrobes += 1;
                debug!(cycle = self.stats.cycles, "strobe without SEL_EN");
            }
            self.delay_counter = self.disconnect_cycles;
        }

        if self.delay_counter > 0 {
            self.delay_counter -= 1;
            self.ready = false;
            self.indicator = 0;
            self.stats.disconnected_cycles += 1;
            return;
        }

        if let Some(sel) = self.committed_sel {
            self.ready = true;
            self.indicator = indicator_for(sel);
            self.stats.connected_cycles += 1;
        } else {
            self.ready = false;
            self.indicator = 0;
        }
    }

    fn drive(&self) -> PinOutputs {
        let por = self.por.state().bits();
        if self.initialized {
            PinOutputs::drive(&self.layout, self.ready, self.indicator, por)
        } else {
            PinOutputs::undriven(por)
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Latched selector, if any commit happened since the last reset.
    pub const fn committed_sel(&self) -> Option<u8> {
        self.committed_sel
    }

    /// Remaining disconnect-window cycles.
    pub const fn delay_counter(&self) -> u8 {
        self.delay_counter
    }

    /// READY as last driven (meaningless before the first reset).
    pub const fn ready(&self) -> bool {
        self.ready
    }

    /// Power-on-reset stage.
    pub const fn por_state(&self) -> PorState {
        self.por.state()
    }

    /// Outputs of the most recent clock edge.
    pub const fn outputs(&self) -> PinOutputs {
        self.outputs
    }

    /// Pin layout the unit decodes with.
    pub const fn layout(&self) -> &PinLayout {
        &self.layout
    }

    /// Statistics since power-up.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}

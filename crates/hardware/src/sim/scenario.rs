//! The reference bring-up and selector sweep.
//!
//! Powers the unit up, walks it through reset, runs it with `ENABLE` low,
//! loses a strobe edge on purpose, then commits every selector value in turn
//! and finishes with a re-strobe that keeps the last selector.
//!
//! The closing re-strobe drives `STROBE | ENABLE`. The bench this sweep was
//! taken from raised `STROBE` alone with `ENABLE` low and expected READY to
//! drop; under enable gating that edge is lost and READY holds, so the sweep
//! keeps `ENABLE` high for it.

use crate::common::constants::SEL_COUNT;
use crate::common::logic::Logic;
use crate::core::por::PorState;
use crate::sim::stimulus::{Flag, Script, Step};

/// Cycles READY is watched after each commit once `STROBE` is released.
pub const HOLD_CYCLES: u64 = 7;

/// Script name of [`reference`].
pub const REFERENCE_NAME: &str = "reference";

fn expect_ready(value: Logic) -> Step {
    Step::ExpectReady { value }
}

fn expect_por(state: PorState) -> Step {
    Step::ExpectPor {
        value: state.bits(),
    }
}

/// Commits `sel` and checks the disconnect window and the reconnect.
fn commit_and_hold(steps: &mut Vec<Step>, sel: u8) {
    steps.push(Step::log(format!("x_sel={sel}")));
    steps.push(Step::compose(
        &[Flag::SelEn, Flag::Strobe, Flag::Enable],
        Some(sel),
    ));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::Zero));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::Zero));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::One));
    steps.push(Step::ExpectCtrl { sel });

    // Release every flag; with ENABLE low the outputs must hold.
    steps.push(Step::compose(&[], None));
    for _ in 0..HOLD_CYCLES {
        steps.push(Step::clock(1));
        steps.push(expect_ready(Logic::One));
        steps.push(Step::ExpectCtrl { sel });
    }
}

/// Builds the reference scenario.
pub fn reference() -> Script {
    let mut steps = vec![
        // Power-on reset signals work before anything is driven.
        expect_por(PorState::Unknown),
        expect_ready(Logic::X),
        Step::clock(1),
        expect_por(PorState::Unknown),
        expect_ready(Logic::X),
        Step::clock(1),
        expect_por(PorState::Settling),
        Step::log("RESET"),
        Step::Drive {
            ena: Some(false),
            rst_n: Some(false),
            ui_in: Some(0),
            uio_in: Some(0),
        },
        Step::clock(2),
        expect_por(PorState::Settled),
        expect_ready(Logic::Zero),
        Step::log("ena (active)"),
        Step::pins(Some(true), None),
        Step::clock(2),
        expect_ready(Logic::Zero),
        Step::log("reset (inactive)"),
        Step::pins(None, Some(true)),
        Step::clock(2),
        Step::log("START"),
        Step::clock(1),
        expect_ready(Logic::Zero),
        // First commit of selector 0, interrupted by a gated cycle.
        Step::compose(&[Flag::SelEn, Flag::Strobe, Flag::Enable], Some(0)),
        Step::clock(1),
        expect_ready(Logic::Zero),
        Step::compose(&[], None),
        Step::clock(1),
        expect_ready(Logic::Zero),
        Step::compose(&[Flag::Enable], None),
        Step::clock(1),
        expect_ready(Logic::Zero),
        Step::clock(HOLD_CYCLES),
        expect_ready(Logic::One),
        Step::ExpectCtrl { sel: 0 },
    ];

    for _ in 0..3 {
        steps.push(Step::compose(&[Flag::Enable], None));
        steps.push(Step::clock(1));
        steps.push(expect_ready(Logic::One));
        steps.push(Step::ExpectCtrl { sel: 0 });
    }

    // STROBE rises while ENABLE is low: the edge is lost, and holding STROBE
    // into the next cycle must not produce a second edge.
    steps.push(Step::log("lost strobe edge"));
    for _ in 0..2 {
        steps.push(Step::compose(&[Flag::Strobe], None));
        steps.push(Step::clock(1));
        steps.push(expect_ready(Logic::One));
        steps.push(Step::ExpectCtrl { sel: 0 });
    }
    steps.push(Step::compose(&[Flag::Enable], None));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::One));
    steps.push(Step::ExpectCtrl { sel: 0 });

    for sel in 0..SEL_COUNT as u8 {
        commit_and_hold(&mut steps, sel);
    }

    // Re-strobe without SEL_EN: disconnect, then reconnect on the same selector.
    let last = (SEL_COUNT - 1) as u8;
    steps.push(expect_ready(Logic::One));
    steps.push(Step::log("re-strobe"));
    steps.push(Step::compose(&[Flag::Strobe, Flag::Enable], None));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::Zero));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::Zero));
    steps.push(Step::clock(1));
    steps.push(expect_ready(Logic::One));
    steps.push(Step::ExpectCtrl { sel: last });

    steps.push(Step::log("DONE"));
    steps.push(Step::clock(10));
    steps.push(expect_por(PorState::Settled));

    Script {
        name: REFERENCE_NAME.to_string(),
        steps,
    }
}

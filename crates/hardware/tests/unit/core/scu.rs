//! # Control Unit Tests
//!
//! Phase transitions, selector commits, the disconnect window, `ENABLE`
//! gating and reset while active.

use crate::common::harness::{COMMIT, RESTROBE, TestContext};
use rstest::rstest;
use selsim_core::common::Logic;
use selsim_core::common::constants::{I_ENABLE, I_SEL_EN, I_STROBE};
use selsim_core::config::Config;
use selsim_core::core::pins::indicator_for;
use selsim_core::core::{InputVector, PinInputs, Phase, PorState, Scu};

#[test]
fn test_outputs_unknown_before_reset() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.scu().phase(), Phase::PowerUp);
    let record = ctx.step(0);
    assert_eq!(ctx.scu().phase(), Phase::ResetHold);
    assert_eq!(ctx.ready(&record), Logic::X);
    assert_eq!(record.outputs.oa_ctrl.to_u16(), None);
    assert_eq!(record.outputs.oa_por, PorState::Unknown.bits());
}

#[test]
fn test_reset_drives_outputs_low() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(0);
    let record = ctx.step(0);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    assert_eq!(record.outputs.indicator(), Some(0));
    assert_eq!(ctx.scu().committed_sel(), None);
}

#[test]
fn test_release_needs_ena() {
    let mut ctx = TestContext::new();
    let _ = ctx.hold(0, 3);
    ctx.pins.rst_n = true;
    let _ = ctx.hold(0, 10);
    assert_eq!(ctx.scu().phase(), Phase::ResetHold);

    ctx.pins.ena = true;
    let _ = ctx.step(0);
    assert_eq!(ctx.scu().phase(), Phase::ResetHold);
    let _ = ctx.step(0);
    assert_eq!(ctx.scu().phase(), Phase::Active);
}

#[test]
fn test_release_after_reset_pulse_with_ena_high() {
    let mut ctx = TestContext::new();
    ctx.pins.ena = true;
    let _ = ctx.hold(0, 3);
    assert_eq!(ctx.scu().phase(), Phase::ResetHold);
    assert_eq!(ctx.scu().por_state(), PorState::Settling);

    ctx.pins.rst_n = true;
    let _ = ctx.hold(I_ENABLE, 2);
    assert_eq!(ctx.scu().phase(), Phase::Active);
    assert_eq!(ctx.scu().por_state(), PorState::Settling);

    let record = ctx.commit(3);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(record.outputs.indicator(), Some(1 << 3));
    assert_eq!(ctx.scu().committed_sel(), Some(3));
}

#[test]
fn test_power_up_with_ena_and_rst_n_high() {
    let mut ctx = TestContext::new();
    ctx.pins.ena = true;
    ctx.pins.rst_n = true;
    let _ = ctx.step(I_ENABLE);
    let _ = ctx.step(I_ENABLE);
    assert_eq!(ctx.scu().phase(), Phase::ResetHold);
    let record = ctx.step(I_ENABLE);
    assert_eq!(ctx.scu().phase(), Phase::Active);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    assert_eq!(record.outputs.indicator(), Some(0));

    let record = ctx.commit(7);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(record.outputs.indicator(), Some(1 << 7));
}

#[test]
fn test_not_ready_until_first_commit() {
    let mut ctx = TestContext::new().released();
    let record = ctx.hold(I_ENABLE, 20);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    assert_eq!(record.outputs.indicator(), Some(0));
}

#[rstest]
fn test_commit_every_selector(#[values(0, 1, 5, 7, 8, 13, 14, 15)] sel: u8) {
    let mut ctx = TestContext::new().released();
    let record = ctx.commit(sel);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(record.outputs.indicator(), Some(indicator_for(sel)));
    assert_eq!(ctx.scu().committed_sel(), Some(sel));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn test_disconnect_window_length(#[case] cycles: u8) {
    let mut config = Config::default();
    config.scu.disconnect_cycles = cycles;
    let mut ctx = TestContext::with_config(&config).released();

    let record = ctx.step(COMMIT | 4);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    for _ in 1..cycles {
        let record = ctx.step(I_ENABLE | 4);
        assert_eq!(ctx.ready(&record), Logic::Zero);
        assert_eq!(record.outputs.indicator(), Some(0));
    }
    let record = ctx.step(I_ENABLE | 4);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(record.outputs.indicator(), Some(1 << 4));
}

#[test]
fn test_restrobe_keeps_selector() {
    let mut ctx = TestContext::new().released();
    let _ = ctx.commit(6);

    let record = ctx.step(RESTROBE | 2);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    let _ = ctx.step(I_ENABLE);
    let record = ctx.step(I_ENABLE);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(record.outputs.indicator(), Some(1 << 6));
    assert_eq!(ctx.scu().stats().restrobes, 1);
}

#[test]
fn test_sel_en_without_strobe_does_nothing() {
    let mut ctx = TestContext::new().released();
    let _ = ctx.commit(1);
    let record = ctx.hold(I_SEL_EN | I_ENABLE | 9, 5);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(record.outputs.indicator(), Some(1 << 1));
}

#[test]
fn test_held_strobe_is_one_edge() {
    let mut ctx = TestContext::new().released();
    let record = ctx.hold(COMMIT | 3, 10);
    assert_eq!(ctx.ready(&record), Logic::One);
    assert_eq!(ctx.scu().stats().strobe_edges, 1);
}

#[test]
fn test_edge_with_enable_low_is_lost() {
    let mut ctx = TestContext::new().released();
    let before = ctx.commit(2);

    let record = ctx.step(I_SEL_EN | I_STROBE | 11);
    assert_eq!(record.outputs, before.outputs);
    let record = ctx.step(COMMIT | 11);
    assert_eq!(record.outputs, before.outputs);
    assert_eq!(ctx.scu().committed_sel(), Some(2));
    assert_eq!(ctx.scu().stats().lost_edges, 1);
}

#[test]
fn test_window_frozen_while_gated() {
    let mut ctx = TestContext::new().released();
    let _ = ctx.step(COMMIT | 5);
    assert_eq!(ctx.scu().delay_counter(), 1);

    let record = ctx.hold(5, 6);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    assert_eq!(ctx.scu().delay_counter(), 1);

    let record = ctx.step(I_ENABLE | 5);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    let record = ctx.step(I_ENABLE | 5);
    assert_eq!(ctx.ready(&record), Logic::One);
}

#[test]
fn test_reset_while_active() {
    let mut ctx = TestContext::new().released();
    let _ = ctx.commit(9);

    ctx.pins.rst_n = false;
    let record = ctx.step(I_ENABLE | 9);
    assert_eq!(ctx.scu().phase(), Phase::ResetHold);
    assert_eq!(ctx.ready(&record), Logic::Zero);
    assert_eq!(record.outputs.indicator(), Some(0));
    assert_eq!(ctx.scu().committed_sel(), None);

    ctx.pins.rst_n = true;
    let _ = ctx.hold(I_ENABLE, 2);
    assert_eq!(ctx.scu().phase(), Phase::Active);
    let record = ctx.step(I_ENABLE);
    assert_eq!(ctx.ready(&record), Logic::Zero);
}

#[test]
fn test_step_contract() {
    let mut scu = Scu::new(&Config::default());
    for _ in 0..3 {
        let _ = scu.step(false, false, InputVector::ZERO);
    }
    let _ = scu.tick(&PinInputs::new(true, true, InputVector::ZERO));
    let _ = scu.tick(&PinInputs::new(true, true, InputVector::ZERO));

    let ui = |raw| InputVector::new(raw, scu.layout()).unwrap();
    let commit = ui(COMMIT | 12);
    let idle = ui(I_ENABLE | 12);
    let (uo_out, ctrl) = scu.step(true, true, commit);
    assert_eq!(uo_out.to_u16(), Some(0));
    assert_eq!(ctrl.to_u16(), Some(0));
    let _ = scu.step(true, true, idle);
    let (uo_out, ctrl) = scu.step(true, true, idle);
    assert_eq!(uo_out.to_u16(), Some(0x80 | (1 << (12 - 8))));
    assert_eq!(ctrl.to_u16(), Some(1 << 12));
}

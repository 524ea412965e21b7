//! # Statistics Tests
//!
//! Counter bookkeeping over short runs, and the derived ratio.

use crate::common::harness::{COMMIT, RESTROBE, TestContext};
use selsim_core::common::constants::{I_ENABLE, I_STROBE};
use selsim_core::stats::SimStats;

#[test]
fn test_default_is_zeroed() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.commits, 0);
    assert!(stats.connected_ratio().abs() < f64::EPSILON);
    assert!(stats.elapsed_secs() >= 0.0);
}

#[test]
fn test_reset_and_cycle_counts() {
    let ctx = TestContext::new().released();
    let stats = ctx.scu().stats();
    assert_eq!(stats.cycles, 5);
    assert_eq!(stats.reset_cycles, 2);
    assert_eq!(stats.enabled_cycles, 0);
}

#[test]
fn test_commit_and_window_counts() {
    let mut ctx = TestContext::new().released();
    let _ = ctx.commit(1);
    let _ = ctx.hold(I_ENABLE, 2);
    let stats = ctx.scu().stats();
    assert_eq!(stats.strobe_edges, 1);
    assert_eq!(stats.commits, 1);
    assert_eq!(stats.enabled_cycles, 5);
    assert_eq!(stats.disconnected_cycles, 2);
    assert_eq!(stats.connected_cycles, 3);
    assert!((stats.connected_ratio() - 60.0).abs() < 1e-9);
}

#[test]
fn test_gated_and_lost_counts() {
    let mut ctx = TestContext::new().released();
    let _ = ctx.step(I_STROBE);
    let _ = ctx.step(0);
    let _ = ctx.step(RESTROBE);
    let _ = ctx.step(COMMIT);
    let stats = ctx.scu().stats();
    assert_eq!(stats.gated_cycles, 2);
    assert_eq!(stats.lost_edges, 1);
    assert_eq!(stats.restrobes, 1);
    assert_eq!(stats.commits, 0);
}

#[test]
fn test_stats_serialize_without_start_time() {
    let ctx = TestContext::new().released();
    let value = serde_json::to_value(ctx.scu().stats()).unwrap();
    assert_eq!(value["cycles"], 5);
    assert!(value.get("start_time").is_none());
}

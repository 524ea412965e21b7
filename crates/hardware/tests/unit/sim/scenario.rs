//! # Reference Scenario Tests
//!
//! The built-in bring-up and sweep passes every monitor and expectation.

use pretty_assertions::assert_eq;
use selsim_core::config::Config;
use selsim_core::sim::scenario::{self, REFERENCE_NAME};
use selsim_core::sim::{Flag, Runner, Script, Step};

#[test]
fn test_reference_passes() {
    let mut runner = Runner::new(&Config::default());
    let summary = runner.run(&scenario::reference()).unwrap();
    assert_eq!(summary.name, REFERENCE_NAME);
    assert_eq!(summary.checked, summary.cycles);
    assert_eq!(summary.stats.commits, 17);
    assert_eq!(summary.stats.restrobes, 1);
    assert_eq!(summary.stats.lost_edges, 1);
    assert_eq!(runner.simulator().scu().committed_sel(), Some(15));
}

#[test]
fn test_reference_round_trips_through_json() {
    let script = scenario::reference();
    let json = serde_json::to_string(&script).unwrap();
    assert_eq!(Script::from_json_str(&json).unwrap(), script);
}

#[test]
fn test_reference_fails_with_longer_window() {
    let mut config = Config::default();
    config.scu.disconnect_cycles = 3;
    let mut runner = Runner::new(&config);
    assert!(runner.run(&scenario::reference()).is_err());
}

#[test]
fn test_reference_sweeps_every_selector() {
    let script = scenario::reference();
    let mut swept: Vec<u8> = script
        .steps
        .iter()
        .filter_map(|step| match step {
            Step::ExpectCtrl { sel } => Some(*sel),
            _ => None,
        })
        .collect();
    swept.dedup();
    assert_eq!(swept, (0..16).collect::<Vec<u8>>());
}

#[test]
fn test_reference_restrobe_keeps_enable_high() {
    let script = scenario::reference();
    let restrobe = script
        .steps
        .iter()
        .rev()
        .find_map(|step| match step {
            Step::Compose { flags: Some(flags), sel } if flags.contains(&Flag::Strobe) => {
                Some((flags.clone(), *sel))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(restrobe, (vec![Flag::Strobe, Flag::Enable], None));
}

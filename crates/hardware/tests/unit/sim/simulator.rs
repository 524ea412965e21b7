//! # Simulator Tests
//!
//! Cycle counting, `run` semantics and observer notification.

use crate::common::mocks::{MockCycleObserver, Recorder};
use mockall::predicate::function;
use selsim_core::Simulator;
use selsim_core::config::Config;
use selsim_core::core::PinInputs;
use selsim_core::sim::CycleRecord;

#[test]
fn test_tick_counts_cycles() {
    let mut sim = Simulator::new(&Config::default());
    assert_eq!(sim.cycle(), 0);
    let record = sim.tick(&PinInputs::default());
    assert_eq!(record.cycle, 1);
    assert_eq!(sim.cycle(), 1);
    assert_eq!(sim.scu().stats().cycles, 1);
}

#[test]
fn test_run_zero_cycles_is_snapshot() {
    let mut sim = Simulator::new(&Config::default());
    let record = sim.run(&PinInputs::default(), 0);
    assert_eq!(record.cycle, 0);
    assert_eq!(record, sim.snapshot(&PinInputs::default()));
}

#[test]
fn test_run_returns_last_record() {
    let mut sim = Simulator::new(&Config::default());
    let record = sim.run(&PinInputs::default(), 5);
    assert_eq!(record.cycle, 5);
    assert_eq!(record.outputs, sim.scu().outputs());
}

#[test]
fn test_observer_called_once_per_edge() {
    let mut observer = MockCycleObserver::new();
    let _ = observer
        .expect_on_cycle()
        .with(function(|r: &CycleRecord| r.cycle >= 1 && r.cycle <= 4))
        .times(4)
        .return_const(());

    let mut sim = Simulator::new(&Config::default());
    sim.add_observer(Box::new(observer));
    let _ = sim.run(&PinInputs::default(), 4);
}

#[test]
fn test_observers_see_records_in_order() {
    let recorder = Recorder::default();
    let mut sim = Simulator::new(&Config::default());
    sim.add_observer(Box::new(recorder.clone()));
    sim.add_observer(Box::new(recorder.clone()));

    let _ = sim.run(&PinInputs::default(), 3);
    let cycles: Vec<u64> = recorder.records.lock().unwrap().iter().map(|r| r.cycle).collect();
    assert_eq!(cycles, vec![1, 1, 2, 2, 3, 3]);
}

//! # Report Tests
//!
//! Report line layout, input/output descriptions and the trace writer.

use crate::common::harness::{COMMIT, TestContext};
use pretty_assertions::assert_eq;
use selsim_core::common::constants::{I_ENABLE, I_SEL_EN, I_STROBE};
use selsim_core::common::Bits;
use selsim_core::config::{Config, PinLayout};
use selsim_core::core::{InputVector, PinInputs};
use selsim_core::sim::Simulator;
use selsim_core::sim::report::{self, TraceWriter};

#[test]
fn test_format_connected_line() {
    let mut ctx = TestContext::new().released();
    let record = ctx.commit(3);
    assert_eq!(
        report::format_record(&record, &ctx.layout),
        "ui_in=01000011 uio_in=00000000 uo_out=10000000  uio_out=00001000  \
         ready=True  por=11  ctrl=000000000001000 CONNECTED"
    );
}

#[test]
fn test_format_disconnected_line() {
    let mut ctx = TestContext::new().released();
    let record = ctx.step(COMMIT | 3);
    let line = report::format_record(&record, &ctx.layout);
    assert!(line.contains("ready=False por=11"));
    assert!(line.ends_with(" DISCONNECTED"));
}

#[test]
fn test_format_before_reset() {
    let ctx = TestContext::new();
    let record = ctx.sim.snapshot(&ctx.pins);
    let line = report::format_record(&record, &ctx.layout);
    assert!(line.contains("uo_out=XXXXXXXX"));
    assert!(line.contains("por=XX"));
    assert!(line.ends_with(" UNKNOWN"));
}

#[test]
fn test_describe_inputs() {
    let layout = PinLayout::default();
    let ui = InputVector::new(I_SEL_EN | I_ENABLE | I_STROBE | 5, &layout).unwrap();
    assert_eq!(
        report::describe_inputs(ui, &layout),
        "SEL=5,I_SEL_EN,I_ENABLE,I_STROBE"
    );
    assert_eq!(report::describe_inputs(InputVector::ZERO, &layout), "SEL=0");
}

#[test]
fn test_describe_outputs() {
    let layout = PinLayout::default();
    assert_eq!(report::describe_outputs(Bits::known(8, 0x81), &layout), "O_READY");
    assert_eq!(report::describe_outputs(Bits::known(8, 0x01), &layout), "");
    assert_eq!(report::describe_outputs(Bits::unknown(8), &layout), "");
}

#[test]
fn test_trace_writer_one_line_per_edge() {
    let config = Config::default();
    let mut writer = TraceWriter::new(Vec::new(), config.pins);
    let mut sim = Simulator::new(&config);
    for _ in 0..4 {
        let record = sim.tick(&PinInputs::default());
        selsim_core::sim::Observer::on_cycle(&mut writer, &record);
    }
    let text = String::from_utf8(writer.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("UNKNOWN"));
    assert!(lines[3].ends_with("DISCONNECTED"));
}

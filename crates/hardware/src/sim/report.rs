//! Per-cycle report lines.
//!
//! One line per clock edge in the testbench log format:
//!
//! ```text
//! ui_in=11010011 uio_in=00000000 uo_out=00000000  uio_out=00000000  ready=False por=11  ctrl=000000000000000 DISCONNECTED
//! ```

use std::io::Write;

use tracing::warn;

use crate::common::constants::PIN_WIDTH;
use crate::common::logic::{Bits, Logic};
use crate::config::PinLayout;
use crate::core::pins::InputVector;
use crate::sim::simulator::{CycleRecord, Observer};

/// Pads `s` on the right with spaces up to `width` characters.
fn pad(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

/// Connection status shown at the end of a report line.
pub fn status(record: &CycleRecord, layout: &PinLayout) -> &'static str {
    match record.outputs.ready(layout) {
        Logic::X => "UNKNOWN",
        Logic::One => "CONNECTED",
        Logic::Zero => "DISCONNECTED",
    }
}

/// Formats one report line.
pub fn format_record(record: &CycleRecord, layout: &PinLayout) -> String {
    let out = &record.outputs;
    let ready = match out.ready(layout) {
        Logic::One => "True",
        Logic::Zero | Logic::X => "False",
    };
    format!(
        "ui_in={} uio_in={} uo_out={}  uio_out={}  ready={} por={}  ctrl={} {}",
        Bits::known(PIN_WIDTH, u16::from(record.inputs.ui_in.raw())),
        Bits::known(PIN_WIDTH, u16::from(record.inputs.uio_in)),
        out.uo_out,
        out.uio_out,
        pad(ready, 5),
        out.oa_por,
        out.oa_ctrl,
        status(record, layout),
    )
}

/// Describes the flags and selector carried by `ui_in`, e.g.
/// `SEL=3,I_SEL_EN,I_ENABLE`.
pub fn describe_inputs(ui_in: InputVector, layout: &PinLayout) -> String {
    let fields = ui_in.fields(layout);
    let mut parts = vec![format!("SEL={}", fields.sel)];
    if fields.sel_en {
        parts.push("I_SEL_EN".to_string());
    }
    if fields.enable {
        parts.push("I_ENABLE".to_string());
    }
    if fields.strobe {
        parts.push("I_STROBE".to_string());
    }
    parts.join(",")
}

/// Describes the named output flags set in `uo_out`.
pub fn describe_outputs(uo_out: Bits, layout: &PinLayout) -> String {
    if uo_out.bit(layout.ready_bit()) == Logic::One {
        "O_READY".to_string()
    } else {
        String::new()
    }
}

/// Observer that writes one report line per cycle.
#[derive(Debug)]
pub struct TraceWriter<W: Write + Send> {
    out: W,
    layout: PinLayout,
}

impl<W: Write + Send> TraceWriter<W> {
    /// Writes report lines to `out`.
    pub const fn new(out: W, layout: PinLayout) -> Self {
        Self { out, layout }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Observer for TraceWriter<W> {
    fn on_cycle(&mut self, record: &CycleRecord) {
        let line = format_record(record, &self.layout);
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!(cycle = record.cycle, %err, "failed to write trace line");
        }
    }
}

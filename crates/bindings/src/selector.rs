//! Selector Python binding.
//!
//! Exposes the cycle-stepping simulator to Python: create from an optional
//! config dict, drive pins one clock edge at a time, and read back the
//! observed outputs and statistics.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use selsim_core::Simulator;
use selsim_core::config::PinLayout;
use selsim_core::core::{InputVector, PinInputs};
use selsim_core::sim::{CycleRecord, report};

use crate::conversion::{py_dict_to_config, to_py_object};

/// Python-exposed selector model: wraps the core `Simulator`.
#[pyclass]
#[derive(Debug)]
pub struct PySelector {
    /// Underlying simulator.
    pub inner: Simulator,
    layout: PinLayout,
}

impl PySelector {
    /// Cycle record as a dict, plus `ready` as `True`/`False`/`None`.
    fn record_dict(&self, py: Python<'_>, record: &CycleRecord) -> PyResult<PyObject> {
        let dict = to_py_object(py, record)?;
        let ready = record.outputs.ready(&self.layout).to_bool();
        dict.bind(py).set_item("ready", ready)?;
        Ok(dict)
    }

    fn inputs(&self, ena: bool, rst_n: bool, ui_in: u8, uio_in: u8) -> PyResult<PinInputs> {
        let ui_in = InputVector::new(ui_in, &self.layout)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PinInputs {
            ena,
            rst_n,
            ui_in,
            uio_in,
        })
    }
}

#[pymethods]
impl PySelector {
    /// Creates a powered-up, not yet reset, selector.
    #[new]
    #[pyo3(signature = (config_dict=None))]
    fn new(py: Python<'_>, config_dict: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let config = py_dict_to_config(py, config_dict)?;
        Ok(Self {
            inner: Simulator::new(&config),
            layout: config.pins,
        })
    }

    /// Applies one clock edge and returns the cycle record as a dict.
    ///
    /// Bit vectors are returned as strings, MSB first, with `X` for
    /// unresolved bits; `ready` is `None` before the first reset.
    #[pyo3(signature = (ena, rst_n, ui_in, uio_in=0))]
    fn tick(
        &mut self,
        py: Python<'_>,
        ena: bool,
        rst_n: bool,
        ui_in: u8,
        uio_in: u8,
    ) -> PyResult<PyObject> {
        let inputs = self.inputs(ena, rst_n, ui_in, uio_in)?;
        let record = self.inner.tick(&inputs);
        self.record_dict(py, &record)
    }

    /// Holds the pins for `cycles` edges and returns the last record.
    #[pyo3(signature = (ena, rst_n, ui_in, cycles, uio_in=0))]
    fn run(
        &mut self,
        py: Python<'_>,
        ena: bool,
        rst_n: bool,
        ui_in: u8,
        cycles: u64,
        uio_in: u8,
    ) -> PyResult<PyObject> {
        let inputs = self.inputs(ena, rst_n, ui_in, uio_in)?;
        let record = self.inner.run(&inputs, cycles);
        self.record_dict(py, &record)
    }

    /// Report line for the current outputs.
    fn report(&self) -> String {
        let record = self.inner.snapshot(&PinInputs::default());
        report::format_record(&record, &self.layout)
    }

    /// Clock edges applied so far.
    #[getter]
    fn cycle(&self) -> u64 {
        self.inner.cycle()
    }

    /// Latched selector, or `None` before the first commit.
    #[getter]
    fn committed_sel(&self) -> Option<u8> {
        self.inner.scu().committed_sel()
    }

    /// Current phase name (`PowerUp`, `ResetHold`, `Active`).
    #[getter]
    fn phase(&self) -> String {
        format!("{:?}", self.inner.scu().phase())
    }

    /// READY as last driven.
    #[getter]
    fn ready(&self) -> bool {
        self.inner.scu().ready()
    }

    /// Statistics as a dict.
    fn stats(&self, py: Python<'_>) -> PyResult<PyObject> {
        to_py_object(py, self.inner.scu().stats())
    }

    /// Prints the statistics banner to stdout.
    fn print_stats(&self) {
        self.inner.scu().stats().print();
    }
}

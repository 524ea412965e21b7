//! Testbench Python binding.
//!
//! Exposes the checked stimulus runner: every clock edge goes through the
//! conformance monitors, and `expect_*` calls raise `AssertionError` on a
//! mismatch.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use selsim_core::common::Logic;
use selsim_core::sim::{Flag, Runner, Script, Step};

use crate::conversion::{parse_bits, py_dict_to_config, to_py_object, verify_err};

fn parse_flag(name: &str) -> PyResult<Flag> {
    match name {
        "SEL_EN" => Ok(Flag::SelEn),
        "ENABLE" => Ok(Flag::Enable),
        "STROBE" => Ok(Flag::Strobe),
        other => Err(PyValueError::new_err(format!(
            "Unknown flag {other:?}; expected SEL_EN, ENABLE or STROBE"
        ))),
    }
}

/// Python-exposed testbench: wraps the core script `Runner`.
#[pyclass]
#[derive(Debug)]
pub struct PyTestbench {
    /// Underlying runner.
    pub inner: Runner,
}

impl PyTestbench {
    fn step(&mut self, step: &Step) -> PyResult<()> {
        self.inner.step(step).map_err(verify_err)
    }
}

#[pymethods]
impl PyTestbench {
    /// Creates a testbench around a freshly powered-up unit.
    #[new]
    #[pyo3(signature = (config_dict=None))]
    fn new(py: Python<'_>, config_dict: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let config = py_dict_to_config(py, config_dict)?;
        Ok(Self {
            inner: Runner::new(&config),
        })
    }

    /// Sets pins; `None` keeps the current value.
    #[pyo3(signature = (ena=None, rst_n=None, ui_in=None, uio_in=None))]
    fn drive(
        &mut self,
        ena: Option<bool>,
        rst_n: Option<bool>,
        ui_in: Option<u8>,
        uio_in: Option<u8>,
    ) -> PyResult<()> {
        self.step(&Step::Drive {
            ena,
            rst_n,
            ui_in,
            uio_in,
        })
    }

    /// Replaces the control flags and/or the selector of `ui_in`.
    #[pyo3(signature = (flags=None, sel=None))]
    fn compose(&mut self, flags: Option<Vec<String>>, sel: Option<u8>) -> PyResult<()> {
        let flags = flags
            .map(|names| names.iter().map(|n| parse_flag(n)).collect::<PyResult<Vec<_>>>())
            .transpose()?;
        self.step(&Step::Compose { flags, sel })
    }

    /// Applies `cycles` clock edges.
    #[pyo3(signature = (cycles=1))]
    fn clock(&mut self, cycles: u64) -> PyResult<()> {
        self.step(&Step::clock(cycles))
    }

    /// Checks READY; `None` expects an unresolved pin.
    fn expect_ready(&mut self, value: Option<bool>) -> PyResult<()> {
        let value = value.map_or(Logic::X, Logic::from_bool);
        self.step(&Step::ExpectReady { value })
    }

    /// Checks the indicator for selector `sel`.
    fn expect_ctrl(&mut self, sel: u8) -> PyResult<()> {
        self.step(&Step::ExpectCtrl { sel })
    }

    /// Checks `oa_por` against a pattern such as `"1X"`.
    fn expect_por(&mut self, value: &str) -> PyResult<()> {
        let value = parse_bits(value)?;
        self.step(&Step::ExpectPor { value })
    }

    /// Runs a JSON stimulus script and returns its summary.
    fn run_script(&mut self, py: Python<'_>, json: &str) -> PyResult<PyObject> {
        let script = Script::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let summary = self.inner.run(&script).map_err(verify_err)?;
        to_py_object(py, &summary)
    }

    /// The latest cycle record as a dict.
    fn current(&self, py: Python<'_>) -> PyResult<PyObject> {
        to_py_object(py, &self.inner.current())
    }

    /// Summary of everything run so far.
    fn summary(&self, py: Python<'_>) -> PyResult<PyObject> {
        to_py_object(py, &self.inner.summary("python"))
    }
}

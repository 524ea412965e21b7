//! Utility functions exposed to Python.
//!
//! Provides version, logging setup and the built-in reference run for the
//! `selsim` module.

use pyo3::prelude::*;
use selsim_core::sim::{Runner, scenario};
use tracing_subscriber::EnvFilter;

use crate::conversion::{py_dict_to_config, to_py_object, verify_err};

/// Returns the package version string.
#[pyfunction]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Installs a stderr log subscriber filtered by `filter` (e.g. `"debug"`).
///
/// Returns `False` if a subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (filter="info"))]
pub fn init_logging(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Runs the reference scenario and returns its summary.
///
/// # Errors
///
/// `AssertionError` on the first conformance failure, `ValueError` for an
/// invalid config dict.
#[pyfunction]
#[pyo3(signature = (config_dict=None))]
pub fn run_reference(py: Python<'_>, config_dict: Option<&Bound<'_, PyAny>>) -> PyResult<PyObject> {
    let config = py_dict_to_config(py, config_dict)?;
    let summary = Runner::new(&config)
        .run(&scenario::reference())
        .map_err(verify_err)?;
    to_py_object(py, &summary)
}

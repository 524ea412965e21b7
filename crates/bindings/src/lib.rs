//! Python bindings for the selector control unit model.
//!
//! This crate exposes the model to Python via PyO3. It provides:
//! 1. **Selector:** `PySelector` for configuration and cycle stepping.
//! 2. **Testbench:** `PyTestbench` for driving checked stimulus from Python.
//! 3. **Utilities:** version string, logging setup and the reference run.

use pyo3::prelude::*;

/// Python dict to Rust `Config` conversion.
pub mod conversion;
/// Selector binding (`PySelector`).
pub mod selector;
/// Testbench binding (`PyTestbench`).
pub mod testbench;
/// Utility functions (version, logging, reference scenario).
pub mod utils;

/// Registers all classes and functions onto the given Python module.
///
/// # Errors
///
/// Returns a `PyErr` if registration fails.
pub fn register_selsim_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<selector::PySelector>()?;
    m.add_class::<testbench::PyTestbench>()?;

    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::init_logging, m)?)?;
    m.add_function(wrap_pyfunction!(utils::run_reference, m)?)?;

    Ok(())
}

#[pymodule]
fn selsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_selsim_module(m)
}

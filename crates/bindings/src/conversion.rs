//! Python and Rust value conversion.
//!
//! Dicts travel through JSON in both directions so Python and the CLI share
//! one schema.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use selsim_core::common::{Bits, VerifyError};
use selsim_core::config::Config;
use serde::Serialize;

/// Converts an optional Python dict to a validated `Config`.
///
/// `None` yields the reference configuration.
///
/// # Errors
///
/// `ValueError` if the dict does not describe a valid configuration.
pub fn py_dict_to_config(py: Python<'_>, dict: Option<&Bound<'_, PyAny>>) -> PyResult<Config> {
    let Some(dict) = dict else {
        return Ok(Config::default());
    };
    let json = py.import("json")?;
    let json_str: String = json.getattr("dumps")?.call1((dict,))?.extract()?;

    Config::from_json_str(&json_str)
        .map_err(|e| PyValueError::new_err(format!("Invalid config: {e}")))
}

/// Converts any serializable value to a Python object via `json.loads`.
///
/// # Errors
///
/// `ValueError` if serialization fails.
pub fn to_py_object<T: Serialize>(py: Python<'_>, value: &T) -> PyResult<PyObject> {
    let json_str =
        serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let json = py.import("json")?;
    Ok(json.getattr("loads")?.call1((json_str,))?.unbind())
}

/// Parses a bit-vector string such as `"1X"`.
///
/// # Errors
///
/// `ValueError` on an unknown character or a value wider than 16 bits.
pub fn parse_bits(text: &str) -> PyResult<Bits> {
    text.parse()
        .map_err(|e| PyValueError::new_err(format!("Invalid bit vector {text:?}: {e}")))
}

/// Maps a verification failure to `AssertionError`, and bad stimulus to
/// `ValueError`.
pub fn verify_err(err: VerifyError) -> PyErr {
    match err {
        VerifyError::InvalidStimulus { .. } => PyValueError::new_err(err.to_string()),
        _ => pyo3::exceptions::PyAssertionError::new_err(err.to_string()),
    }
}

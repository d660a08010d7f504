//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::pitch_class::InvalidInputError;

mod spectrum_bindings;

/// Surface invalid input as `ValueError` carrying the same message
fn invalid_input(err: InvalidInputError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python module definition
#[pymodule]
fn pitch_class_dft(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectralAnalyzer>()?;
    m.add_class::<spectrum_bindings::PySpectralBin>()?;
    
    Ok(())
}

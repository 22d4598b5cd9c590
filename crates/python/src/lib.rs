//! Python bindings for mergetrace
//!
//! This module provides a Pythonic interface to the Rust BPE training
//! simulator: train on a text, then step through the merge trajectory.

use pyo3::prelude::*;

mod error;
mod model_variant;
mod tokenizer;
mod trajectory;

use error::{EmptyInputError, TokenizerError};
use model_variant::PyModelVariant;
use tokenizer::PyTokenizer;
use trajectory::{PyStep, PyTrajectory};

/// mergetrace: BPE merge trajectories computed in Rust
#[pymodule]
fn mergetrace(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Forward Rust `log` records to Python's `logging`
    pyo3_log::init();

    m.add_class::<PyTokenizer>()?;
    m.add_class::<PyModelVariant>()?;
    m.add_class::<PyTrajectory>()?;
    m.add_class::<PyStep>()?;
    m.add_function(wrap_pyfunction!(tokenizer::compute, m)?)?;

    m.add("TokenizerError", py.get_type_bound::<TokenizerError>())?;
    m.add("EmptyInputError", py.get_type_bound::<EmptyInputError>())?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

//! Error handling for Python bindings

use mergetrace_tokenizer::TokenizerError as RustTokenizerError;
use pyo3::{create_exception, exceptions::PyRuntimeError, PyErr};

create_exception!(
    mergetrace,
    TokenizerError,
    PyRuntimeError,
    "Error during BPE training or tokenization"
);

create_exception!(
    mergetrace,
    EmptyInputError,
    TokenizerError,
    "The text contains no words to tokenize"
);

/// Convert a Rust TokenizerError to a Python exception
pub trait IntoPyErr {
    fn into_py_err(self) -> PyErr;
}

impl IntoPyErr for RustTokenizerError {
    fn into_py_err(self) -> PyErr {
        match self {
            RustTokenizerError::EmptyInput => EmptyInputError::new_err(self.to_string()),
            other => TokenizerError::new_err(other.to_string()),
        }
    }
}

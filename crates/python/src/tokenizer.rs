//! PyO3 wrapper for the Tokenizer struct

use mergetrace_tokenizer::{MergeRules, Tokenizer, MAX_MERGES};
use pyo3::prelude::*;

use crate::error::IntoPyErr;
use crate::model_variant::ModelArg;
use crate::trajectory::PyTrajectory;

/// Python wrapper for the mergetrace Tokenizer
#[pyclass(name = "Tokenizer", frozen)]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Create a tokenizer for a model variant (object or catalog name)
    #[new]
    #[pyo3(signature = (model=None, vocab_size=None, max_merges=MAX_MERGES))]
    fn new(model: Option<ModelArg>, vocab_size: Option<usize>, max_merges: usize) -> PyResult<Self> {
        let inner = build(model, vocab_size, max_merges)?;
        Ok(PyTokenizer { inner })
    }

    /// Train on text and return the merge trajectory
    fn compute(&self, py: Python<'_>, text: &str) -> PyResult<PyTrajectory> {
        let trajectory = py
            .allow_threads(|| self.inner.compute(text))
            .map_err(|e| e.into_py_err())?;
        Ok(PyTrajectory::new(trajectory))
    }

    /// Tokenize text with the rules learned by the end of a trajectory
    fn encode(&self, trajectory: &PyTrajectory, text: &str) -> PyResult<Vec<String>> {
        let encoding = self
            .inner
            .encode_with(&trajectory.inner, text)
            .map_err(|e| e.into_py_err())?;
        Ok(encoding.symbols.iter().map(|s| s.to_string()).collect())
    }

    /// Split text into its initial symbols without merging
    fn pre_tokenize(&self, text: &str) -> PyResult<Vec<String>> {
        let encoding = self
            .inner
            .encode(text, &MergeRules::new())
            .map_err(|e| e.into_py_err())?;
        Ok(encoding.symbols.iter().map(|s| s.to_string()).collect())
    }

    /// Get the target vocabulary size
    #[getter]
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    fn __repr__(&self) -> String {
        format!(
            "Tokenizer(model={:?}, vocab_size={})",
            self.inner.model().name,
            self.inner.vocab_size()
        )
    }
}

fn build(model: Option<ModelArg>, vocab_size: Option<usize>, max_merges: usize) -> PyResult<Tokenizer> {
    let mut builder = Tokenizer::builder().max_merges(max_merges);
    if let Some(model) = model {
        builder = builder.model(model.resolve()?);
    }
    if let Some(size) = vocab_size {
        builder = builder.vocab_size(size);
    }
    builder.build().map_err(|e| e.into_py_err())
}

/// Train on text and return the full merge trajectory
#[pyfunction]
#[pyo3(signature = (text, max_vocab_size=None, model=None))]
pub fn compute(
    py: Python<'_>,
    text: &str,
    max_vocab_size: Option<usize>,
    model: Option<ModelArg>,
) -> PyResult<PyTrajectory> {
    let tokenizer = build(model, max_vocab_size, MAX_MERGES)?;
    let trajectory = py
        .allow_threads(|| tokenizer.compute(text))
        .map_err(|e| e.into_py_err())?;
    Ok(PyTrajectory::new(trajectory))
}

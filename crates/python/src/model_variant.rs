//! Python wrapper for ModelVariant

use crate::error::IntoPyErr;
use mergetrace_tokenizer::{ModelVariant, WordBoundaryStyle};
use pyo3::prelude::*;

/// Python wrapper for ModelVariant
#[pyclass(name = "ModelVariant")]
#[derive(Clone)]
pub struct PyModelVariant {
    pub(crate) inner: ModelVariant,
}

#[pymethods]
impl PyModelVariant {
    /// GPT-2 style: end-of-word suffix marker
    #[staticmethod]
    fn gpt2() -> Self {
        Self {
            inner: ModelVariant::gpt2(),
        }
    }

    /// BERT style WordPiece: continuation prefix marker
    #[staticmethod]
    fn bert() -> Self {
        Self {
            inner: ModelVariant::bert(),
        }
    }

    /// SentencePiece style: visible word separator
    #[staticmethod]
    fn sentencepiece() -> Self {
        Self {
            inner: ModelVariant::sentencepiece(),
        }
    }

    /// Look up a built-in variant ("gpt2", "bert", "sentencepiece")
    #[staticmethod]
    fn by_name(name: &str) -> PyResult<Self> {
        let inner = ModelVariant::by_name(name).map_err(|e| e.into_py_err())?;
        Ok(Self { inner })
    }

    /// Catalog keys of the built-in variants
    #[staticmethod]
    fn names() -> Vec<&'static str> {
        ModelVariant::catalog()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn vocab_size_default(&self) -> usize {
        self.inner.vocab_size_default
    }

    #[getter]
    fn special_tokens(&self) -> Vec<String> {
        self.inner
            .special_tokens
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// "suffix", "prefix" or "none"
    #[getter]
    fn word_boundary(&self) -> &'static str {
        match self.inner.word_boundary {
            WordBoundaryStyle::SuffixMarker { .. } => "suffix",
            WordBoundaryStyle::PrefixMarker { .. } => "prefix",
            WordBoundaryStyle::None => "none",
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ModelVariant(name={:?}, word_boundary={:?})",
            self.inner.name,
            self.word_boundary()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

/// Either a `ModelVariant` or a catalog name.
#[derive(FromPyObject)]
pub enum ModelArg {
    Variant(PyModelVariant),
    Name(String),
}

impl ModelArg {
    pub fn resolve(self) -> PyResult<ModelVariant> {
        match self {
            ModelArg::Variant(variant) => Ok(variant.inner),
            ModelArg::Name(name) => ModelVariant::by_name(&name).map_err(|e| e.into_py_err()),
        }
    }
}

//! Python wrappers for Trajectory and Step

use mergetrace_tokenizer::{Step, Trajectory};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;

/// Immutable record of a training run
#[pyclass(name = "Trajectory", frozen)]
pub struct PyTrajectory {
    pub(crate) inner: Arc<Trajectory>,
}

impl PyTrajectory {
    pub(crate) fn new(trajectory: Trajectory) -> Self {
        Self {
            inner: Arc::new(trajectory),
        }
    }
}

#[pymethods]
impl PyTrajectory {
    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Get a step by index; negative indices count from the end
    fn __getitem__(&self, index: isize) -> PyResult<PyStep> {
        let len = self.inner.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if resolved < 0 || resolved >= len {
            return Err(PyIndexError::new_err("step index out of range"));
        }
        Ok(PyStep {
            trajectory: Arc::clone(&self.inner),
            index: resolved as usize,
        })
    }

    /// All steps, iteration 0 first
    fn steps(&self) -> Vec<PyStep> {
        (0..self.inner.len())
            .map(|index| PyStep {
                trajectory: Arc::clone(&self.inner),
                index,
            })
            .collect()
    }

    #[getter]
    fn merges_performed(&self) -> usize {
        self.inner.merges_performed()
    }

    #[getter]
    fn max_vocab_size(&self) -> usize {
        self.inner.max_vocab_size()
    }

    #[getter]
    fn stop_reason(&self) -> String {
        format!("{:?}", self.inner.stop_reason())
    }

    /// Summary statistics as a dict
    fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let stats = self.inner.stats();
        let dict = PyDict::new_bound(py);
        dict.set_item("total_merges", stats.total_merges)?;
        dict.set_item("compression_ratio", stats.compression_ratio)?;
        dict.set_item("average_symbol_length", stats.average_symbol_length)?;
        dict.set_item("vocabulary_efficiency", stats.vocabulary_efficiency)?;
        dict.set_item("initial_sequence_length", stats.initial_sequence_length)?;
        dict.set_item("final_sequence_length", stats.final_sequence_length)?;
        dict.set_item("initial_vocab_size", stats.initial_vocab_size)?;
        dict.set_item("final_vocab_size", stats.final_vocab_size)?;
        Ok(dict)
    }

    /// Compression ratio after every step
    fn compression_curve(&self) -> Vec<f64> {
        self.inner
            .step_stats()
            .into_iter()
            .map(|s| s.compression_ratio)
            .collect()
    }

    /// Serialize the trajectory to a JSON string
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.as_ref()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Trajectory(steps={}, merges={}, stop_reason={:?})",
            self.inner.len(),
            self.inner.merges_performed(),
            self.inner.stop_reason()
        )
    }
}

/// One snapshot of a trajectory
#[pyclass(name = "Step", frozen)]
pub struct PyStep {
    trajectory: Arc<Trajectory>,
    index: usize,
}

impl PyStep {
    fn step(&self) -> &Step {
        &self.trajectory.steps()[self.index]
    }
}

#[pymethods]
impl PyStep {
    #[getter]
    fn iteration(&self) -> usize {
        self.step().iteration
    }

    #[getter]
    fn chosen_pair(&self) -> Option<(String, String)> {
        self.step()
            .chosen_pair
            .as_ref()
            .map(|(left, right)| (left.to_string(), right.to_string()))
    }

    #[getter]
    fn frequency(&self) -> u64 {
        self.step().frequency
    }

    #[getter]
    fn merged_occurrences(&self) -> usize {
        self.step().merged_occurrences
    }

    #[getter]
    fn vocabulary(&self) -> Vec<String> {
        self.step().vocabulary.iter().map(|s| s.to_string()).collect()
    }

    #[getter]
    fn sequence(&self) -> Vec<String> {
        self.step().sequence.iter().map(|s| s.to_string()).collect()
    }

    /// Rules as (left, right, result) tuples
    #[getter]
    fn rules_so_far(&self) -> Vec<(String, String, String)> {
        self.step()
            .rules_so_far
            .iter()
            .map(|r| (r.left.to_string(), r.right.to_string(), r.result.to_string()))
            .collect()
    }

    fn __repr__(&self) -> String {
        let step = self.step();
        match &step.chosen_pair {
            Some((left, right)) => format!(
                "Step(iteration={}, pair=({:?}, {:?}), frequency={})",
                step.iteration,
                left.as_str(),
                right.as_str(),
                step.frequency
            ),
            None => format!("Step(iteration={})", step.iteration),
        }
    }
}

//! Statistics derived from a finished trajectory.
//!
//! Everything here is a read-only projection, so it can be recomputed from a
//! trajectory that was stored and loaded again.

use super::trajectory::Trajectory;
use mergetrace_core::Symbol;
use serde::{Deserialize, Serialize};

/// Summary of a whole training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStats {
    pub total_merges: usize,
    /// Source characters per symbol in the final sequence.
    pub compression_ratio: f64,
    /// Mean surface length of the symbols in the final sequence.
    pub average_symbol_length: f64,
    /// Final vocabulary size over the requested size.
    pub vocabulary_efficiency: f64,
    pub initial_sequence_length: usize,
    pub final_sequence_length: usize,
    pub initial_vocab_size: usize,
    pub final_vocab_size: usize,
}

/// Per-step view used for charting compression over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    pub iteration: usize,
    pub sequence_length: usize,
    pub vocabulary_size: usize,
    pub compression_ratio: f64,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Trajectory {
    /// Summary statistics over the final step.
    pub fn stats(&self) -> TrajectoryStats {
        let initial = self.initial();
        let last = self.last();
        let surface: usize = last.sequence.iter().map(Symbol::surface_len).sum();

        TrajectoryStats {
            total_merges: self.merges_performed(),
            compression_ratio: ratio(self.source_len(), last.sequence.len()),
            average_symbol_length: ratio(surface, last.sequence.len()),
            vocabulary_efficiency: ratio(last.vocabulary.len(), self.max_vocab_size()),
            initial_sequence_length: initial.sequence.len(),
            final_sequence_length: last.sequence.len(),
            initial_vocab_size: initial.vocabulary.len(),
            final_vocab_size: last.vocabulary.len(),
        }
    }

    /// Sequence length, vocabulary size and compression ratio at every step.
    pub fn step_stats(&self) -> Vec<StepStats> {
        self.iter()
            .map(|step| StepStats {
                iteration: step.iteration,
                sequence_length: step.sequence.len(),
                vocabulary_size: step.vocabulary.len(),
                compression_ratio: ratio(self.source_len(), step.sequence.len()),
            })
            .collect()
    }
}

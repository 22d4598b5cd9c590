//! Training trajectories.
//!
//! A trajectory is the full, immutable record of one training run: a
//! snapshot after every merge, starting with the untouched input at
//! iteration 0. Presentation layers step through it by index.

use mergetrace_core::{MergeRule, Pair, Symbol, TokenizerError, Vocabulary};
use serde::{Deserialize, Serialize};

/// Why the merge loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The sequence has fewer than two symbols.
    NoPairs,
    /// The most frequent pair occurs fewer times than the minimum frequency.
    BelowMinFrequency,
    /// The vocabulary reached the requested size.
    VocabularyFull,
    /// The merge budget for this run was used up.
    MergeCap,
    /// Every top candidate would have produced a symbol already in the vocabulary.
    Collision,
}

/// Snapshot of the training state after one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub iteration: usize,
    /// `None` only at iteration 0.
    pub chosen_pair: Option<Pair>,
    /// Occurrences of `chosen_pair` counted before merging; 0 at iteration 0.
    pub frequency: u64,
    /// Replacements actually made. Lower than `frequency` when occurrences overlap.
    pub merged_occurrences: usize,
    pub vocabulary: Vocabulary,
    pub sequence: Vec<Symbol>,
    pub rules_so_far: Vec<MergeRule>,
}

impl Step {
    /// The symbol created at this step.
    pub fn merged_symbol(&self) -> Option<&Symbol> {
        self.chosen_pair.as_ref()?;
        self.rules_so_far.last().map(|rule| &rule.result)
    }
}

/// Ordered steps `0..=N` of a training run, where `N` is the number of merges.
///
/// Iteration 0 is always present. Deserialization rejects records that
/// break this, or whose step numbers do not match their positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryRecord")]
pub struct Trajectory {
    steps: Vec<Step>,
    max_vocab_size: usize,
    /// Length in characters of the text the run started from.
    source_len: usize,
    stop_reason: StopReason,
}

/// Unchecked wire form of a [`Trajectory`].
#[derive(Deserialize)]
struct TrajectoryRecord {
    steps: Vec<Step>,
    max_vocab_size: usize,
    source_len: usize,
    stop_reason: StopReason,
}

impl TryFrom<TrajectoryRecord> for Trajectory {
    type Error = TokenizerError;

    fn try_from(record: TrajectoryRecord) -> Result<Self, Self::Error> {
        if record.steps.is_empty() {
            return Err(TokenizerError::InvalidConfig(
                "trajectory has no steps".to_string(),
            ));
        }
        if let Some((index, step)) = record
            .steps
            .iter()
            .enumerate()
            .find(|(index, step)| step.iteration != *index)
        {
            return Err(TokenizerError::InvalidConfig(format!(
                "step at position {index} is numbered {}",
                step.iteration
            )));
        }

        Ok(Self {
            steps: record.steps,
            max_vocab_size: record.max_vocab_size,
            source_len: record.source_len,
            stop_reason: record.stop_reason,
        })
    }
}

impl Trajectory {
    pub(crate) fn new(steps: Vec<Step>, max_vocab_size: usize, stop_reason: StopReason) -> Self {
        let source_len = steps
            .first()
            .map(|step| step.sequence.iter().map(Symbol::surface_len).sum())
            .unwrap_or(0);

        Self {
            steps,
            max_vocab_size,
            source_len,
            stop_reason,
        }
    }

    /// Record the character length of the original text.
    ///
    /// Defaults to the total surface length of the initial sequence, which
    /// includes any boundary markers.
    pub fn with_source_len(mut self, source_len: usize) -> Self {
        self.source_len = source_len;
        self
    }

    /// All steps, iteration 0 first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get a step by iteration.
    pub fn step(&self, iteration: usize) -> Option<&Step> {
        self.steps.get(iteration)
    }

    /// The untouched input state.
    pub fn initial(&self) -> &Step {
        &self.steps[0]
    }

    /// The state after the last merge.
    pub fn last(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of steps (merges performed + 1).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false, since iteration 0 is always present.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of merges performed.
    pub fn merges_performed(&self) -> usize {
        self.steps.len() - 1
    }

    /// The vocabulary size requested for the run.
    pub fn max_vocab_size(&self) -> usize {
        self.max_vocab_size
    }

    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Iterate over steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

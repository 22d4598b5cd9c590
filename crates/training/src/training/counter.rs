//! Pair counting for BPE training.
//!
//! The counter owns the symbol sequence being trained on. Each iteration
//! counts adjacent pairs over the whole sequence and then rewrites it with
//! the chosen merge applied.

use ahash::AHashMap;
use mergetrace_core::{MergeCandidate, Pair, PairPriorityQueue, Symbol};

/// Frequency and first position of an adjacent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStats {
    pub count: u64,
    pub first_seen: usize,
}

/// Counter for BPE pair frequencies over a single symbol sequence.
pub struct PairCounter {
    sequence: Vec<Symbol>,
}

impl PairCounter {
    /// Create a counter over a sequence.
    pub fn new(sequence: Vec<Symbol>) -> Self {
        Self { sequence }
    }

    /// Count all adjacent pairs, left to right.
    ///
    /// Overlapping occurrences are all counted: `a a a` holds `(a, a)` twice.
    pub fn count_pairs(&self) -> AHashMap<Pair, PairStats> {
        let mut pair_counts: AHashMap<Pair, PairStats> =
            AHashMap::with_capacity(self.sequence.len());

        for (i, window) in self.sequence.windows(2).enumerate() {
            let pair = (window[0].clone(), window[1].clone());
            pair_counts
                .entry(pair)
                .or_insert(PairStats {
                    count: 0,
                    first_seen: i,
                })
                .count += 1;
        }

        pair_counts
    }

    /// Count pairs and rank them as merge candidates.
    pub fn candidates(&self) -> PairPriorityQueue {
        self.count_pairs()
            .into_iter()
            .map(|(pair, stats)| MergeCandidate::new(pair, stats.count, stats.first_seen))
            .collect()
    }

    /// Replace every non-overlapping occurrence of `pair` with `merged`.
    ///
    /// Scans left to right and skips the consumed right-hand symbol, so
    /// merging `(a, a)` in `a a a` yields `aa a`. Returns the number of
    /// replacements made.
    pub fn merge_pair(&mut self, pair: &Pair, merged: &Symbol) -> usize {
        let (left, right) = pair;
        let mut out = Vec::with_capacity(self.sequence.len());
        let mut replaced = 0;
        let mut i = 0;

        while i < self.sequence.len() {
            if i + 1 < self.sequence.len()
                && self.sequence[i] == *left
                && self.sequence[i + 1] == *right
            {
                out.push(merged.clone());
                replaced += 1;
                i += 2;
            } else {
                out.push(self.sequence[i].clone());
                i += 1;
            }
        }

        self.sequence = out;
        replaced
    }

    /// The current sequence.
    pub fn sequence(&self) -> &[Symbol] {
        &self.sequence
    }

    /// Number of symbols in the current sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Consume the counter, returning the current sequence.
    pub fn into_sequence(self) -> Vec<Symbol> {
        self.sequence
    }
}

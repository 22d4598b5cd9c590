//! Priority queue for BPE merge candidates.
//!
//! Candidates are ordered by frequency, then by the length of the merged
//! text (shorter wins), then by where the pair was first seen (earlier wins).
//! The last key only matters for candidates tied on both of the others, and
//! makes the selection independent of hash map iteration order.

use crate::core::merges::Pair;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// The frequency of this pair in the current sequence
    pub count: u64,
    /// Index of the pair's first occurrence in the current sequence
    pub first_seen: usize,
    /// Surface length of `left` plus surface length of `right`
    pub concat_len: usize,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64, first_seen: usize) -> Self {
        let concat_len = pair.0.surface_len() + pair.1.surface_len();
        Self {
            pair,
            count,
            first_seen,
            concat_len,
        }
    }
}

// Greater = higher priority, so the max-heap pops the winner first.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.concat_len.cmp(&self.concat_len))
            .then_with(|| other.first_seen.cmp(&self.first_seen))
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge candidates.
///
/// Uses an 8-ary heap for better cache locality than a binary heap.
pub struct PairPriorityQueue {
    heap: OctonaryHeap<MergeCandidate>,
}

impl PairPriorityQueue {
    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.heap.push(candidate);
    }

    /// Pop the next candidate only if it has exactly `count` occurrences.
    ///
    /// Used to walk the candidates tied at the maximum frequency.
    pub fn pop_with_count(&mut self, count: u64) -> Option<MergeCandidate> {
        match self.heap.peek() {
            Some(top) if top.count == count => self.heap.pop(),
            _ => None,
        }
    }

    /// Peek at the highest priority candidate without removing it.
    pub fn peek(&self) -> Option<&MergeCandidate> {
        self.heap.peek()
    }

    /// Get the number of entries in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<MergeCandidate> for PairPriorityQueue {
    fn from_iter<I: IntoIterator<Item = MergeCandidate>>(iter: I) -> Self {
        Self {
            heap: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(left: &str, right: &str) -> Pair {
        (left.into(), right.into())
    }

    #[test]
    fn test_higher_count_first() {
        let mut queue = PairPriorityQueue::new();
        queue.push(MergeCandidate::new(pair("a", "b"), 10, 0));
        queue.push(MergeCandidate::new(pair("b", "c"), 20, 1));
        queue.push(MergeCandidate::new(pair("c", "d"), 15, 2));

        assert_eq!(queue.pop_with_count(20).unwrap().pair, pair("b", "c"));
        assert_eq!(queue.pop_with_count(15).unwrap().pair, pair("c", "d"));
        assert_eq!(queue.pop_with_count(10).unwrap().pair, pair("a", "b"));
        assert!(queue.is_empty());
        assert!(queue.peek().is_none());
    }

    #[test]
    fn test_shorter_concatenation_wins_ties() {
        let mut queue = PairPriorityQueue::new();
        // Seen first, but longer.
        queue.push(MergeCandidate::new(pair("aa", "b"), 2, 0));
        queue.push(MergeCandidate::new(pair("c", "d"), 2, 4));

        let first = queue.pop_with_count(2).unwrap();
        assert_eq!(first.pair, pair("c", "d"));
        assert_eq!(first.concat_len, 2);
    }

    #[test]
    fn test_first_seen_breaks_remaining_ties() {
        let queue: PairPriorityQueue = vec![
            MergeCandidate::new(pair("w", "e"), 2, 4),
            MergeCandidate::new(pair("l", "o"), 2, 0),
            MergeCandidate::new(pair("e", "s"), 2, 12),
        ]
        .into_iter()
        .collect();

        assert_eq!(queue.peek().unwrap().pair, pair("l", "o"));
    }

    #[test]
    fn test_pop_with_count_stops_below_tie() {
        let mut queue = PairPriorityQueue::new();
        queue.push(MergeCandidate::new(pair("a", "b"), 3, 0));
        queue.push(MergeCandidate::new(pair("b", "c"), 3, 1));
        queue.push(MergeCandidate::new(pair("c", "d"), 2, 2));

        assert!(queue.pop_with_count(3).is_some());
        assert!(queue.pop_with_count(3).is_some());
        assert!(queue.pop_with_count(3).is_none());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_with_count(2).unwrap().pair, pair("c", "d"));
        assert!(queue.is_empty());
    }
}

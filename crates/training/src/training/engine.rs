//! The BPE merge engine.
//!
//! Starting from a preprocessed sequence and seed vocabulary, the engine
//! repeatedly counts adjacent pairs, picks the best candidate, merges it
//! everywhere and snapshots the result. The run is synchronous and keeps no
//! state between calls.

use super::counter::PairCounter;
use super::trajectory::{Step, StopReason, Trajectory};
use log::{debug, info, warn};
use mergetrace_core::{
    MergeCandidate, MergeRule, MergeRules, ModelVariant, PairPriorityQueue, Result, Symbol,
    TokenizerError, Vocabulary,
};

/// Hard cap on merges per run, regardless of the vocabulary budget.
pub const MAX_MERGES: usize = 100;

/// Pairs seen fewer times than this are never merged.
pub const MIN_FREQUENCY: u64 = 2;

/// Configuration for a merge engine run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target vocabulary size
    pub max_vocab_size: usize,
    /// Maximum number of merges in one run
    pub max_merges: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
    /// Marker stripped from the right-hand symbol when merging
    pub continuation_marker: Option<Symbol>,
}

impl EngineConfig {
    /// Create a configuration with default limits and no continuation marker.
    pub fn new(max_vocab_size: usize) -> Self {
        Self {
            max_vocab_size,
            max_merges: MAX_MERGES,
            min_frequency: MIN_FREQUENCY,
            continuation_marker: None,
        }
    }

    /// Create a configuration using a variant's merge behaviour.
    pub fn for_variant(variant: &ModelVariant, max_vocab_size: usize) -> Self {
        Self {
            continuation_marker: variant.word_boundary.continuation_marker().cloned(),
            ..Self::new(max_vocab_size)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_vocab_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "max vocabulary size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// BPE merge engine.
///
/// Picks the most frequent adjacent pair on every iteration. Ties go to the
/// pair with the shortest concatenated text, then to the pair seen first.
pub struct MergeEngine {
    config: EngineConfig,
}

impl MergeEngine {
    /// Create a new merge engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an engine for a variant with default limits.
    pub fn for_variant(variant: &ModelVariant, max_vocab_size: usize) -> Self {
        Self::new(EngineConfig::for_variant(variant, max_vocab_size))
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the merge loop to completion.
    ///
    /// `rules` are the rules already in effect (normally empty); each merge
    /// appends one. Every symbol of `sequence` must be in `vocabulary`.
    /// A vocabulary already at or above the target size is not an error: the
    /// trajectory then holds iteration 0 only.
    pub fn run(
        &self,
        sequence: Vec<Symbol>,
        mut vocabulary: Vocabulary,
        mut rules: MergeRules,
    ) -> Result<Trajectory> {
        self.config.validate()?;

        if let Some(missing) = sequence.iter().find(|s| !vocabulary.contains(s.as_str())) {
            return Err(TokenizerError::InvalidConfig(format!(
                "sequence symbol {missing:?} is missing from the vocabulary"
            )));
        }

        let budget = self
            .config
            .max_vocab_size
            .saturating_sub(vocabulary.len())
            .min(self.config.max_merges);

        debug!(
            "merge run: {} symbols, seed vocabulary {}, budget {} merges",
            sequence.len(),
            vocabulary.len(),
            budget
        );

        let mut steps = vec![Step {
            iteration: 0,
            chosen_pair: None,
            frequency: 0,
            merged_occurrences: 0,
            vocabulary: vocabulary.clone(),
            sequence: sequence.clone(),
            rules_so_far: rules.as_slice().to_vec(),
        }];
        let mut counter = PairCounter::new(sequence);

        let stop_reason = loop {
            let merges = steps.len() - 1;
            let mut queue = counter.candidates();

            let top_count = match queue.peek() {
                None => break StopReason::NoPairs,
                Some(top) if top.count < self.config.min_frequency => {
                    break StopReason::BelowMinFrequency
                }
                Some(top) => top.count,
            };
            if vocabulary.len() >= self.config.max_vocab_size {
                break StopReason::VocabularyFull;
            }
            if merges >= budget {
                break StopReason::MergeCap;
            }

            let Some((candidate, merged)) = self.select(&mut queue, top_count, &vocabulary)
            else {
                break StopReason::Collision;
            };

            let replaced = counter.merge_pair(&candidate.pair, &merged);
            vocabulary.insert(merged.clone());
            let (left, right) = candidate.pair.clone();
            rules.push(MergeRule::new(left, right, merged));

            let iteration = merges + 1;
            debug!(
                "merge {}: ({}, {}) -> {} (frequency {}, {} replaced, {} symbols left)",
                iteration,
                candidate.pair.0,
                candidate.pair.1,
                vocabulary.last().map(Symbol::as_str).unwrap_or_default(),
                candidate.count,
                replaced,
                counter.len()
            );

            steps.push(Step {
                iteration,
                chosen_pair: Some(candidate.pair),
                frequency: candidate.count,
                merged_occurrences: replaced,
                vocabulary: vocabulary.clone(),
                sequence: counter.sequence().to_vec(),
                rules_so_far: rules.as_slice().to_vec(),
            });
        };

        info!(
            "merge run finished after {} merges ({:?}): vocabulary {}, sequence {}",
            steps.len() - 1,
            stop_reason,
            vocabulary.len(),
            counter.len()
        );

        Ok(Trajectory::new(
            steps,
            self.config.max_vocab_size,
            stop_reason,
        ))
    }

    /// Take the best candidate at `count` whose merged symbol is new.
    fn select(
        &self,
        queue: &mut PairPriorityQueue,
        count: u64,
        vocabulary: &Vocabulary,
    ) -> Option<(MergeCandidate, Symbol)> {
        while let Some(candidate) = queue.pop_with_count(count) {
            let merged = Symbol::concat(
                &candidate.pair.0,
                &candidate.pair.1,
                self.config.continuation_marker.as_ref(),
            );
            if vocabulary.contains(merged.as_str()) {
                warn!(
                    "skipping merge ({}, {}): {} is already in the vocabulary",
                    candidate.pair.0, candidate.pair.1, merged
                );
                continue;
            }
            return Some((candidate, merged));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(texts: &[&str]) -> Vec<Symbol> {
        texts.iter().map(|t| Symbol::new(t)).collect()
    }

    fn seed(sequence: &[Symbol]) -> Vocabulary {
        sequence.iter().cloned().collect()
    }

    fn run(texts: &[&str], max_vocab_size: usize) -> Trajectory {
        let sequence = symbols(texts);
        let vocabulary = seed(&sequence);
        MergeEngine::new(EngineConfig::new(max_vocab_size))
            .run(sequence, vocabulary, MergeRules::new())
            .unwrap()
    }

    #[test]
    fn test_basic_merge() {
        let trajectory = run(&["a", "b", "a", "b", "c"], 10);

        assert_eq!(trajectory.merges_performed(), 1);
        let step = trajectory.step(1).unwrap();
        assert_eq!(step.chosen_pair, Some(("a".into(), "b".into())));
        assert_eq!(step.frequency, 2);
        assert_eq!(step.sequence, symbols(&["ab", "ab", "c"]));
        assert_eq!(step.vocabulary.last().map(Symbol::as_str), Some("ab"));
        assert_eq!(trajectory.stop_reason(), StopReason::BelowMinFrequency);
    }

    #[test]
    fn test_tie_prefers_shorter_concatenation() {
        // (aa, b) appears first, but (c, d) is shorter at the same frequency.
        let trajectory = run(&["aa", "b", "aa", "b", "c", "d", "c", "d"], 20);
        let first = trajectory.step(1).unwrap();

        assert_eq!(first.chosen_pair, Some(("c".into(), "d".into())));
        assert_eq!(first.frequency, 2);
    }

    #[test]
    fn test_tie_on_length_prefers_first_seen() {
        let trajectory = run(&["x", "y", "p", "q", "x", "y", "p", "q"], 20);
        let first = trajectory.step(1).unwrap();
        assert_eq!(first.chosen_pair, Some(("x".into(), "y".into())));
    }

    #[test]
    fn test_overlapping_occurrences() {
        let trajectory = run(&["a", "a", "a"], 10);
        let step = trajectory.step(1).unwrap();

        assert_eq!(step.frequency, 2);
        assert_eq!(step.merged_occurrences, 1);
        assert_eq!(step.sequence, symbols(&["aa", "a"]));
        assert_eq!(trajectory.merges_performed(), 1);
    }

    #[test]
    fn test_single_occurrence_never_merged() {
        let trajectory = run(&["a", "b", "c", "d"], 10);
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.stop_reason(), StopReason::BelowMinFrequency);
    }

    #[test]
    fn test_no_pairs() {
        let trajectory = run(&["a"], 10);
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.stop_reason(), StopReason::NoPairs);

        let trajectory = MergeEngine::new(EngineConfig::new(10))
            .run(Vec::new(), Vocabulary::new(), MergeRules::new())
            .unwrap();
        assert_eq!(trajectory.stop_reason(), StopReason::NoPairs);
    }

    #[test]
    fn test_budget_equal_to_seed_yields_single_step() {
        // Seed vocabulary: a, b
        let trajectory = run(&["a", "b", "a", "b"], 2);
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.stop_reason(), StopReason::VocabularyFull);
    }

    #[test]
    fn test_budget_below_seed_is_not_an_error() {
        let trajectory = run(&["a", "b", "a", "b"], 1);
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.initial().vocabulary.len(), 2);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let result = MergeEngine::new(EngineConfig::new(0)).run(
            symbols(&["a"]),
            seed(&symbols(&["a"])),
            MergeRules::new(),
        );
        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_sequence_symbol_missing_from_vocabulary() {
        let result = MergeEngine::new(EngineConfig::new(10)).run(
            symbols(&["a", "b"]),
            seed(&symbols(&["a"])),
            MergeRules::new(),
        );
        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_merge_cap() {
        let texts: Vec<&str> = std::iter::repeat("a").take(1024).collect();
        let mut config = EngineConfig::new(1000);
        config.max_merges = 3;
        let sequence = symbols(&texts);
        let trajectory = MergeEngine::new(config)
            .run(sequence.clone(), seed(&sequence), MergeRules::new())
            .unwrap();

        assert_eq!(trajectory.merges_performed(), 3);
        assert_eq!(trajectory.stop_reason(), StopReason::MergeCap);
        assert_eq!(trajectory.last().sequence, symbols(&["aaaaaaaa"; 128]));
    }

    #[test]
    fn test_default_cap_is_one_hundred() {
        // 150 distinct symbols repeated twice: every adjacent pair occurs twice.
        let distinct: Vec<String> = (0..150).map(|i| format!("s{i}")).collect();
        let mut texts: Vec<&str> = distinct.iter().map(String::as_str).collect();
        texts.extend(distinct.iter().map(String::as_str));

        let trajectory = run(&texts, 10_000);
        assert_eq!(trajectory.merges_performed(), MAX_MERGES);
        assert_eq!(trajectory.stop_reason(), StopReason::MergeCap);
    }

    #[test]
    fn test_collision_falls_through_to_next_tie() {
        // (ab, c) outranks (xx, yy) on length, but "abc" is taken.
        let sequence = symbols(&["ab", "c", "ab", "c", "xx", "yy", "xx", "yy"]);
        let mut vocabulary = seed(&sequence);
        vocabulary.insert(Symbol::new("abc"));

        let trajectory = MergeEngine::new(EngineConfig::new(100))
            .run(sequence, vocabulary, MergeRules::new())
            .unwrap();

        let first = trajectory.step(1).unwrap();
        assert_eq!(first.chosen_pair, Some(("xx".into(), "yy".into())));
        assert_eq!(trajectory.merges_performed(), 1);
        assert_eq!(trajectory.stop_reason(), StopReason::Collision);
    }

    #[test]
    fn test_collision_without_alternative_terminates() {
        let sequence = symbols(&["ab", "c", "ab", "c"]);
        let mut vocabulary = seed(&sequence);
        vocabulary.insert(Symbol::new("abc"));

        let trajectory = MergeEngine::new(EngineConfig::new(100))
            .run(sequence, vocabulary, MergeRules::new())
            .unwrap();

        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.stop_reason(), StopReason::Collision);
    }

    #[test]
    fn test_continuation_marker_stripped() {
        let variant = ModelVariant::bert();
        let sequence = symbols(&["c", "##a", "##t", "c", "##a", "##t"]);
        let trajectory = MergeEngine::for_variant(&variant, 100)
            .run(sequence.clone(), seed(&sequence), MergeRules::new())
            .unwrap();

        let results: Vec<&str> = trajectory
            .last()
            .rules_so_far
            .iter()
            .map(|rule| rule.result.as_str())
            .collect();
        assert_eq!(results, vec!["ca", "cat"]);
        assert_eq!(trajectory.last().sequence, symbols(&["cat", "cat"]));
    }

    #[test]
    fn test_prior_rules_are_kept() {
        let prior: MergeRules = vec![MergeRule::new("q".into(), "r".into(), "qr".into())].into();
        let sequence = symbols(&["a", "b", "a", "b"]);
        let trajectory = MergeEngine::new(EngineConfig::new(10))
            .run(sequence.clone(), seed(&sequence), prior)
            .unwrap();

        assert_eq!(trajectory.initial().rules_so_far.len(), 1);
        assert_eq!(trajectory.last().rules_so_far.len(), 2);
    }

    #[test]
    fn test_step_invariants() {
        let text = "the cat sat on the mat with the hat that the rat had";
        let sequence: Vec<Symbol> = text.chars().map(Symbol::from_char).collect();
        let trajectory = MergeEngine::new(EngineConfig::new(60))
            .run(sequence.clone(), seed(&sequence), MergeRules::new())
            .unwrap();
        assert!(trajectory.merges_performed() > 0);

        let seed_len = trajectory.initial().vocabulary.len();
        for (k, step) in trajectory.iter().enumerate() {
            assert_eq!(step.iteration, k);
            assert_eq!(step.vocabulary.len(), seed_len + k);
            assert_eq!(step.rules_so_far.len(), k);
            assert!(step.sequence.iter().all(|s| step.vocabulary.contains(s.as_str())));
            if k > 0 {
                let previous = &trajectory.steps()[k - 1];
                assert!(step.frequency >= MIN_FREQUENCY);
                assert_eq!(
                    previous.sequence.len() - step.sequence.len(),
                    step.merged_occurrences
                );
                assert!(step.merged_occurrences >= 1);
            }
        }
    }
}

//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties a model
//! variant's preprocessing to the merge engine, and the `compute` entry point.

use crate::pre_tokenizer::Preprocessor;
use mergetrace_core::{MergeRules, ModelVariant, Result, Symbol, TokenizerError};
use mergetrace_training::{EngineConfig, MergeEngine, PairCounter, Trajectory, MAX_MERGES};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Model variant driving preprocessing and merge behaviour
    pub model: ModelVariant,
    /// Target vocabulary size; the variant's default when unset
    pub vocab_size: Option<usize>,
    /// Maximum number of merges in one training run
    pub max_merges: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            model: ModelVariant::gpt2(),
            vocab_size: None,
            max_merges: MAX_MERGES,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model variant.
    pub fn model(mut self, model: ModelVariant) -> Self {
        self.config.model = model;
        self
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = Some(size);
        self
    }

    /// Set the maximum number of merges per run.
    pub fn max_merges(mut self, max_merges: usize) -> Self {
        self.config.max_merges = max_merges;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Main tokenizer struct.
///
/// Holds no training state: every `compute` call starts from scratch and
/// returns its own trajectory.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    preprocessor: Preprocessor,
    engine: EngineConfig,
}

impl Tokenizer {
    /// Create a new tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let vocab_size = config
            .vocab_size
            .unwrap_or(config.model.vocab_size_default);
        if vocab_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "vocab size must be at least 1".to_string(),
            ));
        }

        let mut engine = EngineConfig::for_variant(&config.model, vocab_size);
        engine.max_merges = config.max_merges;

        Ok(Self {
            preprocessor: Preprocessor::new(config.model),
            engine,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// The model variant.
    pub fn model(&self) -> &ModelVariant {
        self.preprocessor.variant()
    }

    /// The target vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.engine.max_vocab_size
    }

    /// Train on `text` and return the full merge trajectory.
    pub fn compute(&self, text: &str) -> Result<Trajectory> {
        let (sequence, vocabulary) = self.preprocessor.prepare(text)?.into_parts();
        let trajectory = MergeEngine::new(self.engine.clone()).run(
            sequence,
            vocabulary,
            MergeRules::new(),
        )?;

        Ok(trajectory.with_source_len(text.chars().count()))
    }

    /// Tokenize `text` with learned `rules`.
    ///
    /// Repeatedly merges the adjacent pair with the lowest rank until no
    /// adjacent pair has a rule.
    pub fn encode(&self, text: &str, rules: &MergeRules) -> Result<Encoding> {
        let (sequence, _) = self.preprocessor.prepare(text)?.into_parts();
        let mut counter = PairCounter::new(sequence);

        loop {
            let best = counter
                .sequence()
                .windows(2)
                .filter_map(|w| rules.rank(&w[0], &w[1]))
                .min();
            let Some(rule) = best.and_then(|rank| rules.get(rank)) else {
                break;
            };
            counter.merge_pair(&rule.pair(), &rule.result);
        }

        Ok(Encoding {
            symbols: counter.into_sequence(),
        })
    }

    /// Tokenize `text` with the rules learned by the end of `trajectory`.
    pub fn encode_with(&self, trajectory: &Trajectory, text: &str) -> Result<Encoding> {
        let rules: MergeRules = trajectory.last().rules_so_far.clone().into();
        self.encode(text, &rules)
    }
}

/// Train on `text` with `variant` up to `max_vocab_size` and return the trajectory.
///
/// Fails with [`TokenizerError::EmptyInput`] when the text has no words.
pub fn compute(text: &str, max_vocab_size: usize, variant: &ModelVariant) -> Result<Trajectory> {
    Tokenizer::builder()
        .model(variant.clone())
        .vocab_size(max_vocab_size)
        .build()?
        .compute(text)
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub symbols: Vec<Symbol>,
}

impl Encoding {
    /// Get the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get the symbols as strings.
    pub fn get_tokens(&self) -> Vec<&str> {
        self.symbols.iter().map(Symbol::as_str).collect()
    }
}

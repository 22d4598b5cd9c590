//! Mergetrace-core - Core data model for BPE training simulation
//!
//! This crate provides the types shared by every stage of the trainer:
//! symbols, ordered vocabularies, merge rules, merge candidate ordering
//! and the model variants that drive preprocessing.
//!
//! # Features
//!
//! - Inline-stored symbols using `CompactString`
//! - Ordered vocabularies with `AHashSet` membership checks
//! - Deterministic merge candidate ordering on an 8-ary heap
//! - Built-in GPT-2, BERT and SentencePiece style variants
//!
//! # Example
//!
//! ```rust
//! use mergetrace_core::{Symbol, Vocabulary};
//!
//! let mut vocab = Vocabulary::new();
//! vocab.insert(Symbol::new("l"));
//! vocab.insert(Symbol::new("o"));
//! assert!(!vocab.insert(Symbol::new("l")));
//! assert_eq!(vocab.len(), 2);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use core::variant::{CONTINUATION, END_OF_WORD, WORD_SEPARATOR};
pub use core::{
    MergeCandidate, MergeRule, MergeRules, ModelVariant, NormalizationForm, Pair,
    PairPriorityQueue, Preprocessing, Symbol, Vocabulary, WordBoundaryStyle,
};

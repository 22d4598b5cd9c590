//! Mergetrace-tokenizer - High-level BPE training simulator API
//!
//! This crate ties the preprocessing rules of a model variant to the merge
//! engine. The main entry point is [`compute`], which trains on a text and
//! returns the complete merge [`Trajectory`]: every intermediate vocabulary
//! and token sequence, ready to be stepped through by a presentation layer.
//!
//! # Features
//!
//! - GPT-2, BERT (WordPiece) and SentencePiece style preprocessing
//! - Deterministic, pure training runs with a hard merge cap
//! - Re-tokenizing new text with learned merge rules
//!
//! # Example
//!
//! ```rust
//! use mergetrace_tokenizer::{compute, ModelVariant};
//!
//! let trajectory = compute("low lower newest widest", 20, &ModelVariant::gpt2())?;
//!
//! for step in trajectory.steps() {
//!     println!("{}: {} symbols", step.iteration, step.sequence.len());
//! }
//! println!("{:.2} chars per symbol", trajectory.stats().compression_ratio);
//! # Ok::<(), mergetrace_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use mergetrace_core::{
    MergeRule, MergeRules, ModelVariant, NormalizationForm, Pair, Preprocessing, Result, Symbol,
    TokenizerError, Vocabulary, WordBoundaryStyle,
};

// Re-export training types
pub use mergetrace_training::{
    EngineConfig, MergeEngine, Step, StepStats, StopReason, Trajectory, TrajectoryStats,
    MAX_MERGES, MIN_FREQUENCY,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{compute, Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{prepare, Normalizer, Prepared, Preprocessor, Splitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

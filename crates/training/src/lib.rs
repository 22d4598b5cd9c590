//! Mergetrace-training - BPE merge engine
//!
//! This crate runs the BPE merge loop over a preprocessed symbol sequence
//! and records every intermediate state as a [`Trajectory`].
//!
//! # Features
//!
//! - Full-sequence pair counting keyed by structural symbol pairs
//! - Deterministic selection: frequency, then shortest merge, then first seen
//! - Immutable, serializable snapshots of every merge
//! - Compression and vocabulary statistics derived from a trajectory
//!
//! # Example
//!
//! ```rust
//! use mergetrace_core::{MergeRules, Symbol, Vocabulary};
//! use mergetrace_training::{EngineConfig, MergeEngine};
//!
//! let sequence: Vec<Symbol> = "abab".chars().map(Symbol::from_char).collect();
//! let vocabulary: Vocabulary = sequence.iter().cloned().collect();
//!
//! let engine = MergeEngine::new(EngineConfig::new(10));
//! let trajectory = engine.run(sequence, vocabulary, MergeRules::new())?;
//! assert_eq!(trajectory.merges_performed(), 1);
//! # Ok::<(), mergetrace_core::TokenizerError>(())
//! ```

pub use mergetrace_core::{Result, TokenizerError};

pub mod training;
pub use training::{
    EngineConfig, MergeEngine, PairCounter, PairStats, Step, StepStats, StopReason, Trajectory,
    TrajectoryStats, MAX_MERGES, MIN_FREQUENCY,
};

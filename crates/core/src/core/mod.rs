//! Core BPE data model.
//!
//! This module contains the symbol, vocabulary and merge rule types shared
//! by the preprocessor and the merge engine, plus model variant definitions.

pub mod merges;
pub mod priority;
pub mod symbol;
pub mod variant;
pub mod vocab;

pub use merges::{MergeRule, MergeRules, Pair};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use symbol::Symbol;
pub use variant::{ModelVariant, NormalizationForm, Preprocessing, WordBoundaryStyle};
pub use vocab::Vocabulary;

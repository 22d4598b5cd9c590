//! Pre-tokenization pipeline.
//!
//! This module turns raw text into the initial symbol sequence and seed
//! vocabulary: normalization, word splitting, boundary marking.

pub mod normalize;
pub mod prepare;
pub mod split;

pub use normalize::Normalizer;
pub use prepare::{prepare, Prepared, Preprocessor};
pub use split::{SplitPattern, Splitter};

//! Error types for the mergetrace library.

use thiserror::Error;

/// Main error type for the mergetrace library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// The text contained no words once preprocessing was applied.
    ///
    /// Callers should present an empty result and not run the merge engine.
    #[error("Empty input: no words left to tokenize after preprocessing")]
    EmptyInput,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown model variant name
    #[error("Unknown model variant: {0}")]
    UnknownModel(String),
}

/// Result type alias for mergetrace operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TokenizerError::InvalidConfig("vocab size must be at least 1".into()).to_string(),
            "Invalid configuration: vocab size must be at least 1"
        );
        assert_eq!(
            TokenizerError::UnknownModel("gpt5".into()).to_string(),
            "Unknown model variant: gpt5"
        );
        assert!(TokenizerError::EmptyInput.to_string().starts_with("Empty input"));
    }
}

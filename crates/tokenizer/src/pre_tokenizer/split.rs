//! Text splitting for pre-tokenization.
//!
//! Words are separated by runs of whitespace; words are exploded into one
//! symbol per character.

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    /// Pattern to split on
    pattern: SplitPattern,
}

/// Splitting patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPattern {
    /// Split on runs of whitespace, dropping empty pieces
    Whitespace,
    /// Split into characters
    Character,
}

impl Splitter {
    /// Create a new splitter.
    pub fn new(pattern: SplitPattern) -> Self {
        Self { pattern }
    }

    /// Create a whitespace splitter.
    pub fn whitespace() -> Self {
        Self::new(SplitPattern::Whitespace)
    }

    /// Create a character-level splitter.
    pub fn character() -> Self {
        Self::new(SplitPattern::Character)
    }

    /// Split text into borrowed pieces.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self.pattern {
            SplitPattern::Whitespace => text.split_whitespace().collect(),
            SplitPattern::Character => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
        }
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::whitespace()
    }
}

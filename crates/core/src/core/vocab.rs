//! Vocabulary storage and lookup.
//!
//! The vocabulary is an ordered list of symbols (insertion order is
//! discovery order) backed by an `AHashSet` for constant-time membership.

use super::symbol::Symbol;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free collection of symbols.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Vocabulary {
    /// Symbols in discovery order
    symbols: Vec<Symbol>,
    /// Membership index
    index: AHashSet<Symbol>,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a symbol.
    ///
    /// Returns `false` and leaves the vocabulary untouched if the symbol is
    /// already present.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        if self.index.contains(&symbol) {
            return false;
        }
        self.index.insert(symbol.clone());
        self.symbols.push(symbol);
        true
    }

    /// Check whether a symbol with this surface text is present.
    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains(symbol)
    }

    /// Position of a symbol in discovery order.
    pub fn position(&self, symbol: &str) -> Option<usize> {
        if !self.contains(symbol) {
            return None;
        }
        self.symbols.iter().position(|s| s.as_str() == symbol)
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in discovery order.
    #[inline]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterate over symbols in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// The most recently added symbol.
    pub fn last(&self) -> Option<&Symbol> {
        self.symbols.last()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Vocabulary {}

impl From<Vec<Symbol>> for Vocabulary {
    fn from(symbols: Vec<Symbol>) -> Self {
        symbols.into_iter().collect()
    }
}

impl From<Vocabulary> for Vec<Symbol> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.symbols
    }
}

impl FromIterator<Symbol> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut vocab = Vocabulary::new();
        for symbol in iter {
            vocab.insert(symbol);
        }
        vocab
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_discovery_order() {
        let mut vocab = Vocabulary::new();
        assert!(vocab.insert(Symbol::new("hello")));
        assert!(vocab.insert(Symbol::new("world")));

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.position("hello"), Some(0));
        assert_eq!(vocab.position("world"), Some(1));
        assert_eq!(vocab.last().map(Symbol::as_str), Some("world"));
    }

    #[test]
    fn test_insert_duplicate_is_rejected() {
        let mut vocab = Vocabulary::new();
        assert!(vocab.insert(Symbol::new("hello")));
        assert!(!vocab.insert(Symbol::new("hello")));

        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains("hello"));
        assert!(!vocab.contains("world"));
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let vocab: Vocabulary = ["a", "b", "a", "c"].into_iter().map(Symbol::new).collect();
        let texts: Vec<&str> = vocab.iter().map(Symbol::as_str).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serde_as_array() {
        let vocab: Vocabulary = ["l", "o", "</w>"].into_iter().map(Symbol::new).collect();
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["l","o","</w>"]"#);

        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
        assert!(back.contains("</w>"));
    }
}

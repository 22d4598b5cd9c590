//! Symbols: the units a text is tokenized into.
//!
//! A symbol is a single character, a merged multi-character unit, a
//! boundary marker or a special token. Identity is its exact text.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// An opaque string-valued token.
///
/// Backed by `CompactString`, so symbols up to 24 bytes never allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(CompactString);

impl Symbol {
    /// Create a symbol from its surface text.
    pub fn new(text: &str) -> Self {
        Self(CompactString::new(text))
    }

    /// Create a symbol holding a single character.
    pub fn from_char(ch: char) -> Self {
        let mut buf = [0u8; 4];
        Self::new(ch.encode_utf8(&mut buf))
    }

    /// The surface text.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters in the surface text.
    #[inline]
    pub fn surface_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Concatenate two symbols into a new one.
    ///
    /// If `strip_prefix` is given and `right` starts with it, the prefix is
    /// dropped from `right` first (`c` + `##a` -> `ca`).
    pub fn concat(left: &Symbol, right: &Symbol, strip_prefix: Option<&Symbol>) -> Symbol {
        let tail = strip_prefix
            .and_then(|prefix| right.as_str().strip_prefix(prefix.as_str()))
            .unwrap_or(right.as_str());

        let mut text = CompactString::with_capacity(left.0.len() + tail.len());
        text.push_str(left.as_str());
        text.push_str(tail);
        Symbol(text)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Self(CompactString::from(text))
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

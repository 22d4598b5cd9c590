//! Model variants: the preprocessing and boundary rules of a tokenizer family.
//!
//! A variant is plain data. Behaviour hangs off `WordBoundaryStyle` and
//! `Preprocessing`, never off the display name.

use super::symbol::Symbol;
use crate::error::{Result, TokenizerError};
use serde::{Deserialize, Serialize};

/// End-of-word marker used by the GPT-2 style variant.
pub const END_OF_WORD: &str = "</w>";

/// Continuation marker used by WordPiece style variants.
pub const CONTINUATION: &str = "##";

/// Visible word separator used by SentencePiece style variants (U+2581).
pub const WORD_SEPARATOR: &str = "\u{2581}";

/// How word boundaries are marked in the initial symbol sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum WordBoundaryStyle {
    /// Append `marker` after the last character of every word.
    SuffixMarker { marker: Symbol },
    /// Prefix every character but the first with `marker`.
    PrefixMarker { marker: Symbol },
    /// Leave characters unmarked.
    None,
}

impl WordBoundaryStyle {
    /// The continuation marker, if this is a prefix-marking style.
    pub fn continuation_marker(&self) -> Option<&Symbol> {
        match self {
            WordBoundaryStyle::PrefixMarker { marker } => Some(marker),
            _ => None,
        }
    }
}

/// Unicode normalization form applied before splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    /// Canonical composition
    NFC,
    /// Canonical decomposition
    NFD,
    /// Compatibility composition
    NFKC,
    /// Compatibility decomposition
    NFKD,
    /// No normalization
    #[default]
    None,
}

/// Text cleanup applied before words are exploded into symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preprocessing {
    pub normalization: NormalizationForm,
    pub lowercase: bool,
    pub strip_non_alphanumeric: bool,
    /// Symbol emitted in front of every word in place of whitespace.
    pub word_separator: Option<Symbol>,
}

/// Immutable configuration of a tokenizer family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    pub name: String,
    pub vocab_size_default: usize,
    /// Always present in the seed vocabulary, in this order.
    pub special_tokens: Vec<Symbol>,
    pub word_boundary: WordBoundaryStyle,
    pub preprocessing: Preprocessing,
}

impl ModelVariant {
    /// Create a variant with the preprocessing implied by its boundary style.
    ///
    /// Prefix-marking variants lower-case and drop non-alphanumerics, the
    /// others keep raw text.
    pub fn new(name: impl Into<String>, word_boundary: WordBoundaryStyle) -> Self {
        let prefix = matches!(word_boundary, WordBoundaryStyle::PrefixMarker { .. });
        Self {
            name: name.into(),
            vocab_size_default: 1000,
            special_tokens: Vec::new(),
            word_boundary,
            preprocessing: Preprocessing {
                lowercase: prefix,
                strip_non_alphanumeric: prefix,
                ..Default::default()
            },
        }
    }

    /// Set the default vocabulary size.
    pub fn with_vocab_size_default(mut self, size: usize) -> Self {
        self.vocab_size_default = size;
        self
    }

    /// Set the special tokens.
    pub fn with_special_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.special_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the Unicode normalization form.
    pub fn with_normalization(mut self, form: NormalizationForm) -> Self {
        self.preprocessing.normalization = form;
        self
    }

    /// Replace whitespace with a visible separator symbol.
    pub fn with_word_separator(mut self, separator: impl Into<Symbol>) -> Self {
        self.preprocessing.word_separator = Some(separator.into());
        self
    }

    /// GPT-2 style: end-of-word suffix marker, raw text.
    pub fn gpt2() -> Self {
        Self::new(
            "GPT-2",
            WordBoundaryStyle::SuffixMarker {
                marker: Symbol::new(END_OF_WORD),
            },
        )
        .with_vocab_size_default(50_257)
        .with_special_tokens(["<|endoftext|>"])
    }

    /// BERT style WordPiece: continuation prefix, lower-cased, accents and
    /// punctuation stripped.
    pub fn bert() -> Self {
        Self::new(
            "BERT",
            WordBoundaryStyle::PrefixMarker {
                marker: Symbol::new(CONTINUATION),
            },
        )
        .with_vocab_size_default(30_522)
        .with_special_tokens(["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"])
        .with_normalization(NormalizationForm::NFD)
    }

    /// SentencePiece style: whitespace becomes a visible separator.
    pub fn sentencepiece() -> Self {
        Self::new("SentencePiece", WordBoundaryStyle::None)
            .with_vocab_size_default(32_000)
            .with_special_tokens(["<unk>", "<s>", "</s>"])
            .with_normalization(NormalizationForm::NFKC)
            .with_word_separator(WORD_SEPARATOR)
    }

    /// All built-in variants with their catalog keys.
    pub fn catalog() -> Vec<(&'static str, ModelVariant)> {
        vec![
            ("gpt2", Self::gpt2()),
            ("bert", Self::bert()),
            ("sentencepiece", Self::sentencepiece()),
        ]
    }

    /// Look up a built-in variant by catalog key (case-insensitive).
    pub fn by_name(key: &str) -> Result<ModelVariant> {
        let wanted = key.trim().to_ascii_lowercase();
        Self::catalog()
            .into_iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, variant)| variant)
            .ok_or_else(|| TokenizerError::UnknownModel(key.to_string()))
    }
}

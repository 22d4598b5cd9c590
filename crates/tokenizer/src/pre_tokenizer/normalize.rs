//! Text normalization for pre-tokenization.
//!
//! Applies the Unicode normalization form of a model variant to the whole
//! text, and the per-word cleanup (lower-casing, dropping non-alphanumeric
//! characters) that WordPiece style variants expect.

use mergetrace_core::{NormalizationForm, Preprocessing};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("Invalid regex pattern"))
}

/// Unicode normalizer and word cleaner.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
    lowercase: bool,
    strip_non_alphanumeric: bool,
}

impl Normalizer {
    /// Create a normalizer from a variant's preprocessing rules.
    pub fn from_preprocessing(preprocessing: &Preprocessing) -> Self {
        Self {
            form: preprocessing.normalization,
            lowercase: preprocessing.lowercase,
            strip_non_alphanumeric: preprocessing.strip_non_alphanumeric,
        }
    }

    /// Apply the Unicode normalization form to the whole text.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.form {
            NormalizationForm::NFC => Cow::Owned(text.nfc().collect()),
            NormalizationForm::NFD => Cow::Owned(text.nfd().collect()),
            NormalizationForm::NFKC => Cow::Owned(text.nfkc().collect()),
            NormalizationForm::NFKD => Cow::Owned(text.nfkd().collect()),
            NormalizationForm::None => Cow::Borrowed(text),
        }
    }

    /// Apply per-word cleanup. May return an empty string.
    pub fn clean_word<'a>(&self, word: &'a str) -> Cow<'a, str> {
        let mut word = Cow::Borrowed(word);
        if self.lowercase {
            word = Cow::Owned(word.to_lowercase());
        }
        if self.strip_non_alphanumeric && non_alphanumeric().is_match(&word) {
            let stripped = non_alphanumeric().replace_all(&word, "").into_owned();
            word = Cow::Owned(stripped);
        }
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mergetrace_core::ModelVariant;

    fn with_form(form: NormalizationForm) -> Normalizer {
        Normalizer::from_preprocessing(&Preprocessing {
            normalization: form,
            ..Default::default()
        })
    }

    #[test]
    fn test_nfc_normalization() {
        let normalizer = with_form(NormalizationForm::NFC);
        // e + combining acute accent
        assert_eq!(normalizer.normalize("e\u{0301}"), "\u{00e9}");
    }

    #[test]
    fn test_nfd_normalization() {
        let normalizer = with_form(NormalizationForm::NFD);
        assert_eq!(normalizer.normalize("\u{00e9}"), "e\u{0301}");
    }

    #[test]
    fn test_nfkc_folds_compatibility_forms() {
        let normalizer = with_form(NormalizationForm::NFKC);
        // fullwidth A and the "fi" ligature
        assert_eq!(normalizer.normalize("\u{FF21}\u{FB01}"), "Afi");
    }

    #[test]
    fn test_no_normalization_borrows() {
        let normalizer = with_form(NormalizationForm::None);
        assert!(matches!(normalizer.normalize("Hello"), Cow::Borrowed("Hello")));
        assert!(matches!(normalizer.clean_word("Hello,"), Cow::Borrowed("Hello,")));
    }

    #[test]
    fn test_wordpiece_cleanup() {
        let normalizer = Normalizer::from_preprocessing(&ModelVariant::bert().preprocessing);

        assert_eq!(normalizer.clean_word("Hello,"), "hello");
        assert_eq!(normalizer.clean_word("don't"), "dont");
        assert_eq!(normalizer.clean_word("R2-D2"), "r2d2");
        assert_eq!(normalizer.clean_word("..."), "");

        // NFD splits off the accent, cleanup drops it.
        let word = normalizer.normalize("Caf\u{00e9}");
        assert_eq!(normalizer.clean_word(&word), "cafe");
    }

    #[test]
    fn test_raw_variant_keeps_words() {
        let normalizer = Normalizer::from_preprocessing(&ModelVariant::gpt2().preprocessing);
        assert_eq!(normalizer.clean_word("Hello,"), "Hello,");
    }
}

//! Turning raw text into the initial symbol sequence and seed vocabulary.

use super::normalize::Normalizer;
use super::split::Splitter;
use log::debug;
use std::borrow::Cow;
use mergetrace_core::{
    ModelVariant, Result, Symbol, TokenizerError, Vocabulary, WordBoundaryStyle,
};

/// Output of preprocessing: the state at iteration 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub sequence: Vec<Symbol>,
    /// Distinct symbols in first-seen order, then the variant's special tokens.
    pub vocabulary: Vocabulary,
    pub word_count: usize,
}

impl Prepared {
    /// Split into `(sequence, vocabulary)`.
    pub fn into_parts(self) -> (Vec<Symbol>, Vocabulary) {
        (self.sequence, self.vocabulary)
    }
}

/// Preprocessor for one model variant.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    variant: ModelVariant,
    normalizer: Normalizer,
    words: Splitter,
    chars: Splitter,
}

impl Preprocessor {
    /// Create a preprocessor applying `variant`'s rules.
    pub fn new(variant: ModelVariant) -> Self {
        let normalizer = Normalizer::from_preprocessing(&variant.preprocessing);
        Self {
            variant,
            normalizer,
            words: Splitter::whitespace(),
            chars: Splitter::character(),
        }
    }

    /// The variant this preprocessor applies.
    pub fn variant(&self) -> &ModelVariant {
        &self.variant
    }

    /// Build the initial sequence and seed vocabulary for `text`.
    ///
    /// Fails with [`TokenizerError::EmptyInput`] when no word survives
    /// splitting and cleanup.
    pub fn prepare(&self, text: &str) -> Result<Prepared> {
        let text = self.normalizer.normalize(text);
        let separator = self.variant.preprocessing.word_separator.as_ref();

        let mut sequence = Vec::with_capacity(text.len() * 2);
        let mut word_count = 0;
        // Whitespace seen since the last emitted symbol. With a separator,
        // each such run becomes exactly one separator symbol.
        let mut gap = text.starts_with(char::is_whitespace);

        for (i, raw) in self.words.split(&text).into_iter().enumerate() {
            gap |= i > 0;

            // A special token written out in the text stays whole.
            let special = self.variant.special_tokens.iter().find(|s| *s == raw);
            let word = match special {
                Some(_) => Cow::Borrowed(raw),
                None => self.normalizer.clean_word(raw),
            };
            if word.is_empty() {
                continue;
            }
            word_count += 1;

            if let Some(separator) = separator.filter(|_| gap) {
                sequence.push(separator.clone());
            }
            gap = false;

            match special {
                Some(special) => sequence.push(special.clone()),
                None => self.mark_word(&word, &mut sequence),
            }
        }

        if word_count == 0 {
            return Err(TokenizerError::EmptyInput);
        }

        gap |= text.ends_with(char::is_whitespace);
        if let Some(separator) = separator.filter(|_| gap) {
            sequence.push(separator.clone());
        }

        let mut vocabulary: Vocabulary = sequence.iter().cloned().collect();
        for special in &self.variant.special_tokens {
            vocabulary.insert(special.clone());
        }

        debug!(
            "{}: {} words -> {} symbols, seed vocabulary {}",
            self.variant.name,
            word_count,
            sequence.len(),
            vocabulary.len()
        );

        Ok(Prepared {
            sequence,
            vocabulary,
            word_count,
        })
    }

    /// Explode a word into characters and apply the boundary rule.
    fn mark_word(&self, word: &str, out: &mut Vec<Symbol>) {
        let chars = self.chars.split(word);

        match &self.variant.word_boundary {
            WordBoundaryStyle::SuffixMarker { marker } => {
                out.extend(chars.into_iter().map(Symbol::new));
                out.push(marker.clone());
            }
            WordBoundaryStyle::PrefixMarker { marker } => {
                for (i, ch) in chars.into_iter().enumerate() {
                    if i == 0 {
                        out.push(Symbol::new(ch));
                    } else {
                        out.push(Symbol::concat(marker, &Symbol::new(ch), None));
                    }
                }
            }
            WordBoundaryStyle::None => {
                out.extend(chars.into_iter().map(Symbol::new));
            }
        }
    }
}

/// Build the initial sequence and seed vocabulary for `text` under `variant`.
pub fn prepare(text: &str, variant: &ModelVariant) -> Result<Prepared> {
    Preprocessor::new(variant.clone()).prepare(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(Symbol::as_str).collect()
    }

    #[test]
    fn test_suffix_marker() {
        let prepared = prepare("low lower newest widest", &ModelVariant::gpt2()).unwrap();

        assert_eq!(prepared.word_count, 4);
        assert_eq!(prepared.sequence.len(), 24);
        assert_eq!(
            texts(&prepared.sequence[..10]),
            vec!["l", "o", "w", "</w>", "l", "o", "w", "e", "r", "</w>"]
        );
        assert_eq!(
            texts(prepared.vocabulary.as_slice()),
            vec!["l", "o", "w", "</w>", "e", "r", "n", "s", "t", "i", "d", "<|endoftext|>"]
        );
    }

    #[test]
    fn test_prefix_marker() {
        let prepared = prepare("cat", &ModelVariant::bert()).unwrap();
        assert_eq!(texts(&prepared.sequence), vec!["c", "##a", "##t"]);
        assert_eq!(
            texts(prepared.vocabulary.as_slice()),
            vec!["c", "##a", "##t", "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"]
        );
    }

    #[test]
    fn test_prefix_marker_cleans_words() {
        let prepared = prepare("Caf\u{00e9}, CAFE!", &ModelVariant::bert()).unwrap();
        assert_eq!(
            texts(&prepared.sequence),
            vec!["c", "##a", "##f", "##e", "c", "##a", "##f", "##e"]
        );
        assert_eq!(prepared.vocabulary.len(), 4 + 5);
    }

    #[test]
    fn test_word_separator_replaces_whitespace() {
        let prepared = prepare("hello world", &ModelVariant::sentencepiece()).unwrap();
        assert_eq!(
            texts(&prepared.sequence),
            vec!["h", "e", "l", "l", "o", "\u{2581}", "w", "o", "r", "l", "d"]
        );
        assert_eq!(prepared.vocabulary.position("\u{2581}"), Some(5));
    }

    #[test]
    fn test_word_separator_one_per_whitespace_run() {
        let prepared = prepare("  a \t\n b ", &ModelVariant::sentencepiece()).unwrap();
        assert_eq!(
            texts(&prepared.sequence),
            vec!["\u{2581}", "a", "\u{2581}", "b", "\u{2581}"]
        );
    }

    #[test]
    fn test_word_separator_around_special_token() {
        let prepared = prepare("a <s> b", &ModelVariant::sentencepiece()).unwrap();
        assert_eq!(
            texts(&prepared.sequence),
            vec!["a", "\u{2581}", "<s>", "\u{2581}", "b"]
        );
    }

    #[test]
    fn test_dropped_word_leaves_single_separator() {
        let mut variant = ModelVariant::sentencepiece();
        variant.preprocessing.strip_non_alphanumeric = true;

        let prepared = prepare("a !!! b", &variant).unwrap();
        assert_eq!(texts(&prepared.sequence), vec!["a", "\u{2581}", "b"]);
    }

    #[test]
    fn test_unmarked_variant_without_separator() {
        let variant = ModelVariant::new("plain", WordBoundaryStyle::None);
        let prepared = prepare("ab ba", &variant).unwrap();
        assert_eq!(texts(&prepared.sequence), vec!["a", "b", "b", "a"]);
        assert_eq!(prepared.vocabulary.len(), 2);
    }

    #[test]
    fn test_special_token_in_text_stays_whole() {
        let prepared = prepare("hi <|endoftext|> hi", &ModelVariant::gpt2()).unwrap();
        assert_eq!(
            texts(&prepared.sequence),
            vec!["h", "i", "</w>", "<|endoftext|>", "h", "i", "</w>"]
        );
        // Not added a second time.
        assert_eq!(prepared.vocabulary.len(), 4);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   ", "\n\t "] {
            assert_eq!(
                prepare(text, &ModelVariant::gpt2()),
                Err(TokenizerError::EmptyInput)
            );
        }
        // Nothing alphanumeric survives WordPiece cleanup.
        assert_eq!(
            prepare("!!! ???", &ModelVariant::bert()),
            Err(TokenizerError::EmptyInput)
        );
    }

    #[test]
    fn test_sequence_symbols_are_in_vocabulary() {
        for variant in [
            ModelVariant::gpt2(),
            ModelVariant::bert(),
            ModelVariant::sentencepiece(),
        ] {
            let prepared = prepare("The quick brown fox, the lazy dog.", &variant).unwrap();
            assert!(prepared
                .sequence
                .iter()
                .all(|s| prepared.vocabulary.contains(s.as_str())));
            assert!(variant
                .special_tokens
                .iter()
                .all(|s| prepared.vocabulary.contains(s.as_str())));
        }
    }
}

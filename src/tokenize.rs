//! Word and sentence tokenization.
//!
//! The analyzer only depends on the [`Tokenizer`] trait; the default
//! [`UnicodeTokenizer`] follows UAX #29 boundaries, which handle Latin and
//! Arabic-script text alike.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into words and sentences.
pub trait Tokenizer {
    /// Ordered word tokens. Punctuation is kept as separate tokens;
    /// whitespace is dropped.
    fn word_tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Ordered sentences. Whitespace-only segments are dropped, so empty
    /// text yields no sentences.
    fn sent_tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn word_tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_word_bounds()
            .filter(|t| !t.trim().is_empty())
            .collect()
    }

    fn sent_tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

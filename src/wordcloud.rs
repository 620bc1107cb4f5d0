//! Word-frequency corpus construction.
//!
//! Builds the corpus blob handed to the renderer: every qualifying
//! message is tokenized, stop words are dropped, survivors are joined with
//! spaces, and the whole blob is normalized and reshaped once at the end.

use std::borrow::Cow;
use tracing::debug;

use crate::models::{ChatDocument, Message, MessageText};
use crate::normalize::{Normalizer, Reshaper};
use crate::stopwords::StopWordSet;
use crate::text::reconstruct;
use crate::tokenize::Tokenizer;

/// Knobs controlling which messages and tokens reach the corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusOptions {
    /// Also include composite messages, flattened by the reconstructor.
    pub include_composite: bool,
    /// Normalize each token before testing it against the stop words.
    /// Off by default: the set holds normalized entries while tokens are
    /// tested raw.
    pub normalize_tokens: bool,
}

/// Collaborators the corpus builder delegates to.
pub struct CorpusBuilder<'a> {
    pub tokenizer: &'a dyn Tokenizer,
    pub normalizer: &'a Normalizer,
    pub reshaper: &'a dyn Reshaper,
    pub stop_words: &'a StopWordSet,
    pub options: CorpusOptions,
}

impl CorpusBuilder<'_> {
    /// Build the normalized, reshaped corpus blob for `doc`.
    pub fn build(&self, doc: &ChatDocument) -> String {
        let mut content = String::new();
        let mut messages = 0usize;

        for message in &doc.messages {
            let Some(text) = self.message_text(message) else {
                continue;
            };
            messages += 1;

            let kept: Vec<&str> = self
                .tokenizer
                .word_tokenize(&text)
                .into_iter()
                .filter(|token| !self.is_stop_word(token))
                .collect();

            content.push(' ');
            content.push_str(&kept.join(" "));
        }

        debug!(messages, "collected corpus text");

        let normalized = self.normalizer.normalize(&content);
        self.reshaper.reshape(&normalized)
    }

    fn message_text<'m>(&self, message: &'m Message) -> Option<Cow<'m, str>> {
        match &message.text {
            MessageText::Plain(plain) => Some(Cow::Borrowed(plain.as_str())),
            composite if self.options.include_composite => Some(reconstruct(composite)),
            MessageText::Composite(_) => None,
        }
    }

    fn is_stop_word(&self, token: &str) -> bool {
        if self.options.normalize_tokens {
            self.stop_words.contains(&self.normalizer.normalize(token))
        } else {
            self.stop_words.contains(token)
        }
    }
}

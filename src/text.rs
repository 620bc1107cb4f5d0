//! Message text reconstruction.
//!
//! Telegram stores formatted messages as a list of fragments: raw strings
//! interleaved with entity objects (`{"type": "link", "text": "..."}`).
//! [`reconstruct`] flattens either shape into one plain string, and
//! [`TextCache`] memoizes the result per message position so repeated
//! passes over the document do not redo the work.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::models::{Fragment, Message, MessageText};

/// Flatten a message body into a single string.
///
/// Plain text is borrowed unchanged. Composite text is concatenated in
/// order; entities without a `text` field and unrecognized fragments
/// contribute nothing.
pub fn reconstruct(text: &MessageText) -> Cow<'_, str> {
    match text {
        MessageText::Plain(s) => Cow::Borrowed(s.as_str()),
        MessageText::Composite(fragments) => {
            let mut out = String::new();
            for fragment in fragments {
                match fragment {
                    Fragment::Plain(s) => out.push_str(s),
                    Fragment::Entity { text: Some(s) } => out.push_str(s),
                    Fragment::Entity { text: None } | Fragment::Unknown(_) => {}
                }
            }
            Cow::Owned(out)
        }
    }
}

/// Derived-value cache from message position to reconstructed text.
///
/// Keyed by the message's index in the document, not its id, so duplicate
/// ids never share an entry. Only composite messages are stored; plain
/// messages are served straight from the document.
#[derive(Debug, Default)]
pub struct TextCache {
    entries: HashMap<usize, String>,
}

impl TextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructed text of the message at `position`, computed at most
    /// once per position.
    pub fn text_of<'a>(&'a mut self, position: usize, message: &'a Message) -> &'a str {
        match &message.text {
            MessageText::Plain(s) => s.as_str(),
            composite => self
                .entries
                .entry(position)
                .or_insert_with(|| reconstruct(composite).into_owned())
                .as_str(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

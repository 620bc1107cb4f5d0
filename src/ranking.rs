//! Reply-based user ranking.
//!
//! Ranking runs in two passes over the document:
//!
//! 1. Every message is reconstructed, checked for a question, and recorded
//!    in a [`QuestionIndex`] keyed by message id.
//! 2. Every reply is matched against its parent's entry, and the replying
//!    sender is counted when the parent passes the [`ReplyFilter`].
//!
//! Counts are sorted by descending count; ties keep the order in which
//! senders were first counted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::models::ChatDocument;
use crate::question::contains_question;
use crate::text::TextCache;
use crate::tokenize::Tokenizer;

/// Which parents make a reply count toward its sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplyFilter {
    /// Count replies whose parent is not explicitly flagged as a question.
    /// Parents missing from the index (deleted or outside the export)
    /// count as well.
    #[default]
    NonQuestions,
    /// Count replies whose parent is explicitly flagged as a question.
    Questions,
}

impl ReplyFilter {
    fn counts(self, parent: Option<bool>) -> bool {
        match self {
            ReplyFilter::NonQuestions => parent != Some(true),
            ReplyFilter::Questions => parent == Some(true),
        }
    }
}

impl std::str::FromStr for ReplyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "non-questions" => Ok(ReplyFilter::NonQuestions),
            "questions" => Ok(ReplyFilter::Questions),
            other => Err(format!(
                "unknown reply filter '{}': expected non-questions or questions",
                other
            )),
        }
    }
}

/// Per-run mapping from message id to "contains a question".
#[derive(Debug, Default)]
pub struct QuestionIndex {
    flags: HashMap<i64, bool>,
}

impl QuestionIndex {
    /// First pass: flag every message in `doc`.
    pub fn build(doc: &ChatDocument, tokenizer: &dyn Tokenizer, cache: &mut TextCache) -> Self {
        let mut flags = HashMap::with_capacity(doc.messages.len());
        for (position, message) in doc.messages.iter().enumerate() {
            let text = cache.text_of(position, message);
            flags.insert(message.id, contains_question(tokenizer, text));
        }
        Self { flags }
    }

    /// `None` when the id was never scanned.
    pub fn get(&self, id: i64) -> Option<bool> {
        self.flags.get(&id).copied()
    }

    pub fn question_count(&self) -> usize {
        self.flags.values().filter(|&&q| q).count()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// One ranked sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub user: String,
    pub count: usize,
}

/// Rank senders by counted replies, at most `top_n` entries.
pub fn rank(
    doc: &ChatDocument,
    tokenizer: &dyn Tokenizer,
    filter: ReplyFilter,
    top_n: usize,
) -> Vec<UserCount> {
    let mut cache = TextCache::new();
    let index = QuestionIndex::build(doc, tokenizer, &mut cache);
    debug!(
        messages = index.len(),
        questions = index.question_count(),
        "built question index"
    );
    rank_with_index(doc, &index, filter, top_n)
}

/// Second pass plus sorting, over an already built index.
pub fn rank_with_index(
    doc: &ChatDocument,
    index: &QuestionIndex,
    filter: ReplyFilter,
    top_n: usize,
) -> Vec<UserCount> {
    let mut counts: Vec<UserCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for message in &doc.messages {
        let (Some(parent), Some(user)) = (message.reply_to_message_id, message.from.as_deref())
        else {
            continue;
        };
        if !filter.counts(index.get(parent)) {
            continue;
        }
        match positions.get(user) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(user, counts.len());
                counts.push(UserCount {
                    user: user.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

//! Core data models for a Telegram-style chat export.
//!
//! These types mirror the export's JSON shape closely enough to be
//! deserialized directly with `serde_json`. The document is treated as
//! read-only once loaded; derived values (such as reconstructed text)
//! live in side caches, never in these records.

use serde::{Deserialize, Serialize};

/// The parsed export: `{"name": ..., "messages": [...]}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    pub messages: Vec<Message>,
}

/// A single entry of the export's `messages` array.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub id: i64,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,
    #[serde(default)]
    pub text: MessageText,
}

fn default_kind() -> String {
    "message".to_string()
}

impl Message {
    /// Service entries (joins, pins, title changes) carry no user text.
    pub fn is_service(&self) -> bool {
        self.kind == "service"
    }
}

/// Message body: either a plain string or a sequence of fragments
/// produced by inline formatting (links, mentions, bold runs, ...).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Composite(Vec<Fragment>),
}

impl Default for MessageText {
    fn default() -> Self {
        MessageText::Plain(String::new())
    }
}

impl MessageText {
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            MessageText::Plain(s) => Some(s),
            MessageText::Composite(_) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, MessageText::Composite(_))
    }
}

/// One element of a composite message text.
///
/// Variant order matters for untagged deserialization: anything that is
/// neither a string nor an object with an optional string `text` lands in
/// `Unknown`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Fragment {
    Plain(String),
    Entity {
        #[serde(default)]
        text: Option<String>,
    },
    Unknown(serde_json::Value),
}

//! Chat export summary.
//!
//! Gives a quick overview of what an export contains: message counts by
//! kind and text shape, distinct senders, replies and questions, the
//! covered date range, and a fingerprint of the word-cloud corpus. Used by
//! `chatstats stats` to sanity-check an export before rendering.

use chrono::NaiveDateTime;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::models::ChatDocument;
use crate::ranking::QuestionIndex;

/// Export timestamps are local times without an offset.
const EXPORT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct ChatSummary {
    pub name: Option<String>,
    pub messages: usize,
    pub user_messages: usize,
    pub service_messages: usize,
    pub plain_text: usize,
    pub composite_text: usize,
    pub senders: usize,
    pub replies: usize,
    pub questions: usize,
    pub first_message: Option<String>,
    pub last_message: Option<String>,
    pub corpus_tokens: usize,
    pub corpus_sha256: String,
}

/// Summarize `doc` using a prebuilt question index and corpus blob.
pub fn summarize(doc: &ChatDocument, index: &QuestionIndex, corpus: &str) -> ChatSummary {
    let service_messages = doc.messages.iter().filter(|m| m.is_service()).count();
    let composite_text = doc.messages.iter().filter(|m| m.text.is_composite()).count();
    let senders: HashSet<&str> = doc
        .messages
        .iter()
        .filter_map(|m| m.from.as_deref())
        .collect();
    let replies = doc
        .messages
        .iter()
        .filter(|m| m.reply_to_message_id.is_some())
        .count();

    let dates: Vec<NaiveDateTime> = doc
        .messages
        .iter()
        .filter_map(|m| m.date.as_deref())
        .filter_map(|d| NaiveDateTime::parse_from_str(d, EXPORT_DATE_FORMAT).ok())
        .collect();
    let fmt = |dt: &NaiveDateTime| dt.format("%Y-%m-%d %H:%M").to_string();

    ChatSummary {
        name: doc.name.clone(),
        messages: doc.messages.len(),
        user_messages: doc.messages.len() - service_messages,
        service_messages,
        plain_text: doc.messages.len() - composite_text,
        composite_text,
        senders: senders.len(),
        replies,
        questions: index.question_count(),
        first_message: dates.iter().min().map(fmt),
        last_message: dates.iter().max().map(fmt),
        corpus_tokens: corpus.split_whitespace().count(),
        corpus_sha256: fingerprint(corpus),
    }
}

/// SHA-256 of the corpus blob, hex encoded.
pub fn fingerprint(corpus: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(corpus.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Print `summary` as an aligned table.
pub fn print_summary(summary: &ChatSummary) {
    println!(
        "Chat Statistics — {}",
        summary.name.as_deref().unwrap_or("(unnamed chat)")
    );
    println!("================================");
    println!();
    println!("  Messages:    {}", summary.messages);
    println!("    user:      {}", summary.user_messages);
    println!("    service:   {}", summary.service_messages);
    println!(
        "  Text:        {} plain / {} composite",
        summary.plain_text, summary.composite_text
    );
    println!("  Senders:     {}", summary.senders);
    println!("  Replies:     {}", summary.replies);
    println!(
        "  Questions:   {} ({}%)",
        summary.questions,
        if summary.messages > 0 {
            (summary.questions * 100) / summary.messages
        } else {
            0
        }
    );
    println!(
        "  Period:      {} .. {}",
        summary.first_message.as_deref().unwrap_or("?"),
        summary.last_message.as_deref().unwrap_or("?")
    );
    println!();
    println!("  Corpus:      {} tokens", summary.corpus_tokens);
    println!("  Fingerprint: {}", summary.corpus_sha256);
    println!();
}

//! Loading a chat export from disk.
//!
//! The export is read once, fully into memory, and parsed with
//! `serde_json`. Any I/O or parse failure is fatal and surfaces to the
//! caller with the offending path attached.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::ChatDocument;

/// Read and parse the export at `path`.
pub fn load_export(path: &Path) -> Result<ChatDocument> {
    info!("loading chat data from {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chat export: {}", path.display()))?;

    parse_export(&content)
        .with_context(|| format!("Failed to parse chat export: {}", path.display()))
}

/// Parse an export already held in memory.
pub fn parse_export(json: &str) -> Result<ChatDocument> {
    let doc: ChatDocument = serde_json::from_str(json)?;
    Ok(doc)
}

//! Stop-word set loaded from a newline-delimited resource file.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::normalize::Normalizer;

/// Normalized stop words, used for membership tests only.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Read `path`, trim each line, drop blank lines and normalize the rest.
    pub fn load(path: &Path, normalizer: &Normalizer) -> Result<Self> {
        info!("loading stop words from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop words: {}", path.display()))?;

        Ok(Self::from_lines(&content, normalizer))
    }

    pub fn from_lines(content: &str, normalizer: &Normalizer) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| normalizer.normalize(line))
            .collect();
        Self { words }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

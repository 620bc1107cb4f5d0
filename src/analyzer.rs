//! The chat analyzer.
//!
//! [`ChatStatistics`] owns everything a run needs: the loaded export, the
//! stop-word set, the optional font asset and the text collaborators.
//! Resources are read once at construction; the analyses themselves only
//! read the document and share no mutable state.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::export::load_export;
use crate::models::ChatDocument;
use crate::normalize::{Normalizer, PassthroughReshaper, Reshaper};
use crate::ranking::{self, QuestionIndex, ReplyFilter, UserCount};
use crate::render::{FontAsset, FrequencyRenderer, SvgRenderer};
use crate::stats::{self, ChatSummary};
use crate::stopwords::StopWordSet;
use crate::text::TextCache;
use crate::tokenize::{Tokenizer, UnicodeTokenizer};
use crate::wordcloud::{CorpusBuilder, CorpusOptions};

/// Fixed file name of the rendered word cloud.
pub const WORDCLOUD_FILE_NAME: &str = "wordcloud.svg";

pub struct ChatStatistics {
    document: ChatDocument,
    stop_words: StopWordSet,
    normalizer: Normalizer,
    tokenizer: Box<dyn Tokenizer>,
    reshaper: Box<dyn Reshaper>,
    renderer: Box<dyn FrequencyRenderer>,
    corpus_options: CorpusOptions,
}

impl ChatStatistics {
    /// Load the export named by `config.input.chat_json` together with the
    /// stop words and font from `config.data`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let document = load_export(&config.input.chat_json)?;
        Self::with_document(config, document)
    }

    /// Build an analyzer around an already loaded document.
    pub fn with_document(config: &Config, document: ChatDocument) -> Result<Self> {
        let normalizer = Normalizer::new(&config.normalizer);
        let stop_words = StopWordSet::load(&config.data.stop_words_path(), &normalizer)?;
        let font = load_optional_font(&config.data.font_path())?;

        info!(
            messages = document.messages.len(),
            stop_words = stop_words.len(),
            "chat statistics ready"
        );

        Ok(Self {
            document,
            stop_words,
            normalizer,
            tokenizer: Box::new(UnicodeTokenizer),
            reshaper: Box::new(PassthroughReshaper),
            renderer: Box::new(SvgRenderer::new(config.wordcloud.clone(), font)),
            corpus_options: CorpusOptions {
                include_composite: config.wordcloud.include_composite,
                normalize_tokens: config.wordcloud.normalize_tokens,
            },
        })
    }

    /// Swap the frequency renderer.
    pub fn with_renderer(mut self, renderer: Box<dyn FrequencyRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Swap the tokenizer used by both analyses.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Corpus blob fed to the renderer.
    pub fn corpus(&self) -> String {
        CorpusBuilder {
            tokenizer: self.tokenizer.as_ref(),
            normalizer: &self.normalizer,
            reshaper: self.reshaper.as_ref(),
            stop_words: &self.stop_words,
            options: self.corpus_options,
        }
        .build(&self.document)
    }

    /// Render the word cloud into `output_dir` and return the image path.
    pub fn generate_word_cloud(&self, output_dir: &Path) -> Result<PathBuf> {
        info!("loading text content");
        let corpus = self.corpus();

        info!("generating word cloud");
        let cloud = self.renderer.generate(&corpus)?;

        let path = output_dir.join(WORDCLOUD_FILE_NAME);
        info!("saving word cloud to {}", output_dir.display());
        cloud.save(&path)?;
        Ok(path)
    }

    /// Senders ranked by counted replies.
    pub fn top_users(&self, filter: ReplyFilter, top_n: usize) -> Vec<UserCount> {
        ranking::rank(&self.document, self.tokenizer.as_ref(), filter, top_n)
    }

    pub fn summary(&self) -> ChatSummary {
        let mut cache = TextCache::new();
        let index = QuestionIndex::build(&self.document, self.tokenizer.as_ref(), &mut cache);
        stats::summarize(&self.document, &index, &self.corpus())
    }
}

/// A missing font file falls back to the viewer's `sans-serif`; a font
/// that exists but cannot be read is still an error.
fn load_optional_font(path: &Path) -> Result<Option<FontAsset>> {
    if !path.exists() {
        warn!(
            "font {} not found, word cloud falls back to sans-serif",
            path.display()
        );
        return Ok(None);
    }
    FontAsset::load(path).map(Some)
}

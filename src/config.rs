use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ranking::ReplyFilter;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub wordcloud: WordCloudConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "default_chat_json")]
    pub chat_json: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            chat_json: default_chat_json(),
        }
    }
}

fn default_chat_json() -> PathBuf {
    PathBuf::from("data/result.json")
}

/// Static resources read once when the analyzer is constructed.
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_stop_words")]
    pub stop_words: String,
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            stop_words: default_stop_words(),
            font: default_font(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_stop_words() -> String {
    "stop_words.txt".to_string()
}
fn default_font() -> String {
    "font.ttf".to_string()
}

impl DataConfig {
    pub fn stop_words_path(&self) -> PathBuf {
        self.dir.join(&self.stop_words)
    }

    pub fn font_path(&self) -> PathBuf {
        self.dir.join(&self.font)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub reply_filter: ReplyFilter,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            reply_filter: ReplyFilter::default(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct WordCloudConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default = "default_min_font_size")]
    pub min_font_size: u32,
    #[serde(default = "default_max_font_size")]
    pub max_font_size: u32,
    /// Feed composite (entity-bearing) messages into the corpus too.
    #[serde(default)]
    pub include_composite: bool,
    /// Normalize tokens before the stop-word membership test.
    #[serde(default)]
    pub normalize_tokens: bool,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            max_words: default_max_words(),
            min_font_size: default_min_font_size(),
            max_font_size: default_max_font_size(),
            include_composite: false,
            normalize_tokens: false,
        }
    }
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    400
}
fn default_background() -> String {
    "white".to_string()
}
fn default_max_words() -> usize {
    200
}
fn default_min_font_size() -> u32 {
    10
}
fn default_max_font_size() -> u32 {
    80
}

#[derive(Debug, Deserialize, Clone)]
pub struct NormalizerConfig {
    #[serde(default = "default_true")]
    pub persian_digits: bool,
    #[serde(default = "default_true")]
    pub remove_diacritics: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            persian_digits: true,
            remove_diacritics: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Built-in defaults used when no config file exists: reads
    /// `data/result.json` and writes next to it in `data/`.
    pub fn minimal() -> Self {
        Self {
            input: InputConfig::default(),
            data: DataConfig::default(),
            output: OutputConfig::default(),
            ranking: RankingConfig::default(),
            wordcloud: WordCloudConfig::default(),
            normalizer: NormalizerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    // Validate ranking
    if config.ranking.top_n == 0 {
        anyhow::bail!("ranking.top_n must be >= 1");
    }

    // Validate word cloud
    let wc = &config.wordcloud;
    if wc.width == 0 || wc.height == 0 {
        anyhow::bail!("wordcloud.width and wordcloud.height must be > 0");
    }
    if wc.max_words == 0 {
        anyhow::bail!("wordcloud.max_words must be > 0");
    }
    if wc.min_font_size == 0 || wc.min_font_size > wc.max_font_size {
        anyhow::bail!(
            "wordcloud font sizes must satisfy 0 < min_font_size ({}) <= max_font_size ({})",
            wc.min_font_size,
            wc.max_font_size
        );
    }

    // Validate logging
    if config
        .logging
        .level
        .parse::<tracing::level_filters::LevelFilter>()
        .is_err()
    {
        anyhow::bail!(
            "Unknown logging level: '{}'. Must be off, error, warn, info, debug, or trace.",
            config.logging.level
        );
    }

    Ok(())
}

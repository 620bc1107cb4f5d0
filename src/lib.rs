//! # Chat Statistics
//!
//! Offline analytics for Telegram chat exports.
//!
//! Chat Statistics loads an exported `result.json` once and derives two
//! artifacts from it: a frequency-weighted word cloud of the conversation
//! (after stop-word removal and Persian/Arabic normalization), and a
//! ranking of users built from reply relationships between messages.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────┐   ┌──────────┐
//! │ result.json  │──▶│ Reconstruct  │──▶│  Question  │──▶│  Ranker  │
//! │   (export)   │   │ text + cache │   │  detector  │   │ top-N    │
//! └──────┬───────┘   └──────────────┘   └────────────┘   └──────────┘
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────────┐   ┌────────────┐
//! │  Tokenize +  │──▶│  Normalize + │──▶│  Renderer  │──▶ wordcloud.svg
//! │  stop words  │   │   reshape    │   │   (SVG)    │
//! └──────────────┘   └──────────────┘   └────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Export data types |
//! | [`export`] | Loading the export from disk |
//! | [`text`] | Message text reconstruction and cache |
//! | [`tokenize`] | Word and sentence tokenization |
//! | [`normalize`] | Normalization and bidi reshaping |
//! | [`stopwords`] | Stop-word set |
//! | [`question`] | Question detection |
//! | [`ranking`] | Reply-based user ranking |
//! | [`wordcloud`] | Word-cloud corpus construction |
//! | [`render`] | SVG word cloud renderer |
//! | [`stats`] | Export summary |
//! | [`analyzer`] | The [`ChatStatistics`](analyzer::ChatStatistics) facade |
//! | [`logging`] | Tracing subscriber setup |

pub mod analyzer;
pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod question;
pub mod ranking;
pub mod render;
pub mod stats;
pub mod stopwords;
pub mod text;
pub mod tokenize;
pub mod wordcloud;

//! # Chat Statistics CLI (`chatstats`)
//!
//! The `chatstats` binary analyzes a Telegram chat export (`result.json`)
//! and produces a word cloud of the conversation, a reply-based ranking of
//! users, the raw word-cloud corpus, or a summary of the export.
//!
//! ## Usage
//!
//! ```bash
//! chatstats --config ./config/chatstats.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chatstats wordcloud` | Render `wordcloud.svg` into the output directory |
//! | `chatstats top-users` | Rank users by replies to non-question messages |
//! | `chatstats corpus` | Print the filtered, normalized word-cloud corpus |
//! | `chatstats stats` | Summarize the export |
//!
//! Running `chatstats` without a command renders the word cloud using the
//! configured (or built-in default) paths.
//!
//! ## Examples
//!
//! ```bash
//! # Word cloud from an explicit export, written to ./out/wordcloud.svg
//! chatstats --chat ~/Downloads/result.json wordcloud --output-dir ./out
//!
//! # Top 5 responders to questions, as JSON
//! chatstats top-users --top-n 5 --reply-filter questions --json
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use chat_statistics::analyzer::ChatStatistics;
use chat_statistics::config::{self, Config};
use chat_statistics::logging;
use chat_statistics::ranking::ReplyFilter;
use chat_statistics::stats;

/// Chat Statistics — word clouds and user rankings from Telegram chat exports.
#[derive(Parser)]
#[command(
    name = "chatstats",
    about = "Chat Statistics — word clouds and user rankings from Telegram chat exports",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/chatstats.toml`. When the file does not exist,
    /// built-in defaults are used (`data/result.json` in, `data/` out).
    #[arg(long, global = true, default_value = "./config/chatstats.toml")]
    config: PathBuf,

    /// Chat export to analyze; overrides `input.chat_json`.
    #[arg(long, global = true)]
    chat: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Render a word cloud of all plain-text messages.
    ///
    /// Stop words are removed, the remaining text is normalized, and the
    /// image is written as `wordcloud.svg` into the output directory.
    Wordcloud {
        /// Output directory; overrides `output.dir`.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Rank users by their replies.
    ///
    /// By default counts replies to messages that are not questions;
    /// `--reply-filter questions` counts replies to questions instead.
    TopUsers {
        /// Maximum number of users to list; overrides `ranking.top_n`.
        #[arg(long)]
        top_n: Option<usize>,

        /// Which parent messages count: `non-questions` or `questions`.
        #[arg(long)]
        reply_filter: Option<ReplyFilter>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Write the word-cloud corpus text.
    Corpus {
        /// Output file; prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Summarize the chat export.
    Stats {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        Config::minimal()
    };
    if let Some(chat) = &cli.chat {
        cfg.input.chat_json = chat.clone();
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;
    logging::init_logging(&cfg.logging)?;

    let command = cli.command.unwrap_or(Commands::Wordcloud { output_dir: None });
    let analyzer = ChatStatistics::from_config(&cfg)?;

    match command {
        Commands::Wordcloud { output_dir } => {
            let dir = output_dir.unwrap_or_else(|| cfg.output.dir.clone());
            let path = analyzer.generate_word_cloud(&dir)?;
            println!("Word cloud written to {}", path.display());
        }
        Commands::TopUsers {
            top_n,
            reply_filter,
            json,
        } => {
            let top_n = top_n.unwrap_or(cfg.ranking.top_n);
            if top_n == 0 {
                bail!("--top-n must be >= 1");
            }
            let filter = reply_filter.unwrap_or(cfg.ranking.reply_filter);
            let ranked = analyzer.top_users(filter, top_n);

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else if ranked.is_empty() {
                println!("No matching replies.");
            } else {
                println!("{:<6} {:<32} {:>6}", "RANK", "USER", "COUNT");
                for (i, entry) in ranked.iter().enumerate() {
                    println!("{:<6} {:<32} {:>6}", i + 1, entry.user, entry.count);
                }
            }
        }
        Commands::Corpus { output } => {
            write_corpus(&analyzer.corpus(), output.as_deref())?;
        }
        Commands::Stats { json } => {
            let summary = analyzer.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                stats::print_summary(&summary);
            }
        }
    }

    Ok(())
}

/// Write the corpus to `output`, or to stdout for piping.
fn write_corpus(corpus: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, corpus)?;
            eprintln!(
                "Wrote {} corpus tokens to {}",
                corpus.split_whitespace().count(),
                path.display()
            );
        }
        None => {
            println!("{}", corpus);
        }
    }
    Ok(())
}

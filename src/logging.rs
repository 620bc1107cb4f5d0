//! Logging setup for the `chatstats` binary.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// Initialize the global subscriber, writing to stderr so stdout stays
/// clean for command output. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!(
            "warn,chat_statistics={level},chatstats={level}",
            level = config.level
        ))
    })?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .try_init()?;

    tracing::debug!("logging initialized with level: {}", config.level);
    Ok(())
}

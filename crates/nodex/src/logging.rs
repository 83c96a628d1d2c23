//! Logger installation for the binary.
//!
//! Library crates log through the `log` facade and carry `tracing` spans.
//! Human output goes through `env_logger`; JSON output goes through a
//! `tracing-subscriber` formatter, which also captures `log` records.
//! `RUST_LOG` overrides the configured level in both modes.

use crate::cli::LogFormat;
use anyhow::{Context, anyhow};
use tracing_subscriber::EnvFilter;

/// Install the global logger; logs always go to stderr
pub fn init_logging(format: LogFormat, level: log::LevelFilter) -> anyhow::Result<()> {
    match format {
        LogFormat::Human => env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_millis()
            .try_init()
            .context("Failed to initialize logger"),
        LogFormat::Json => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .try_init()
                .map_err(|e| anyhow!("Failed to initialize JSON logger: {}", e))
        }
    }
}

//! Logging setup, powered by tracing-subscriber.
//!
//! Code logs through the `log` facade; the subscriber's `tracing-log`
//! bridge picks those records up. `RUST_LOG` overrides the configured level.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    /// Append to a file, used while the TUI owns the terminal
    File(&'a Path),
}

fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", level, e))
}

pub fn init_logging(level: &str, target: LogTarget<'_>) -> Result<()> {
    let filter = build_env_filter(level)?;

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    log::trace!("logging initialized: level={}, target={:?}", level, target);

    Ok(())
}

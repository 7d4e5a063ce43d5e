//! Logging init: `tracing` events go to a log file under the XDG state dir,
//! or to stderr when that file cannot be opened.
//!
//! Console diagnostics for failed URLs are printed by the driver, not through
//! `tracing`, so the driver logs those failures at `info` and the stderr
//! fallback only shows `warn` and above.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter for the log file when `RUST_LOG` is unset.
pub const FILE_FILTER: &str = "info,aggregator_core=debug";

/// Filter for the stderr fallback when `RUST_LOG` is unset.
pub const STDERR_FILTER: &str = "warn";

fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// `~/.local/state/aggregator/aggregator.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("aggregator")?;
    Ok(xdg_dirs.get_state_home().join("aggregator").join("aggregator.log"))
}

/// Installs the file subscriber. Errors leave no subscriber installed, so the
/// caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {}", e))?;

    tracing::info!("aggregator logging initialized at {}", path.display());
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter_or(STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

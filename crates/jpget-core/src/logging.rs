//! Tracing setup for the `jpget` binary.
//!
//! Events go to `<XDG state>/jpget/jpget.log`. `RUST_LOG` replaces the
//! default filter. Callers fall back to [`init_logging_stderr`] when the log
//! file cannot be opened.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,jpget=debug,jpget_core=debug";

const LOG_FILE_NAME: &str = "jpget.log";

/// Where [`init_logging`] appends. Does not create anything.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jpget")?;
    Ok(xdg_dirs.get_state_home().join(LOG_FILE_NAME))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to [`log_file_path`] and returns that path.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("{}", e))?;

    tracing::info!("jpget logging to {}", path.display());
    Ok(path)
}

/// Stderr-only subscriber. A subscriber that is already installed is kept.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

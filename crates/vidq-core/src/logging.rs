//! Logging init: file under the XDG state dir, or stderr when that fails.
//!
//! Filter directives come from `VIDQ_LOG`, then `RUST_LOG`, then a default
//! that keeps job lifecycle events (probe, launch, reconcile, prune) visible.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,vidq=debug,vidq_core=debug";
const LOG_ENV: &str = "VIDQ_LOG";
const LOG_FILE: &str = "vidq.log";

/// First non-blank directive set, in priority order.
fn filter_directives(vidq_log: Option<String>, rust_log: Option<String>) -> String {
    [vidq_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("vidq: ignoring bad log filter {directives:?}: {e}");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// `~/.local/state/vidq/vidq.log`, creating the directory if needed.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidq")?;
    Ok(xdg_dirs.place_state_file(LOG_FILE)?)
}

/// Initialize structured logging to [`log_file_path`].
/// Returns Err (state dir unwritable, subscriber already set) so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!(pid = std::process::id(), "vidq logging to {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only. Used when `init_logging()` fails.
pub fn init_logging_stderr() {
    // a subscriber may already be installed; keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

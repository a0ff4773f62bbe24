//! Logging setup.
//!
//! The terminal belongs to the editor UI, so log records go to a file instead
//! of stderr. `RUST_LOG` selects the filter, `info` when unset.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_NAME: &str = "snake-editor.log";

/// Log path used when none is given on the command line
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_NAME)
}

/// Filter from `RUST_LOG`, falling back to `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to `path` (or the default log path).
/// Returns the path in use.
pub fn init(path: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_log_path(),
    };
    let file = open_log(&path)
        .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("cannot install logger: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "SnakeEditor starting");
    Ok(path)
}

//! Error kinds for editor operations.
//!
//! Core operations return [`EditorError`]; the shell catches them, logs them and
//! turns them into a status-line message. None of them is fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Cannot open {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No text selected")]
    EmptySelection,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

impl EditorError {
    /// True for errors that only mean "nothing to do"
    pub fn is_benign(&self) -> bool {
        matches!(self, EditorError::EmptySelection)
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;

//! Buffer: Pure data structure holding text content
//! No caret, scrolling, or viewport state (those belong to the shell and display)
//!
//! Uses a ropey Rope for all files. Positions in this API are char indices.

use ropey::{Rope, RopeSlice};
use std::fmt;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::core::error::{EditorError, Result};

/// Buffer: text plus a modified flag
#[derive(Debug, Default)]
pub struct TextBuffer {
    /// Text content stored in a Rope (O(log n) operations)
    rope: Rope,
    /// Dirty flag (true if buffer has unsaved changes). Display only.
    pub modified: bool,
    /// Version counter, bumped on every edit
    pub version: u64,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a buffer from a file, replacing invalid UTF-8 lossily
    pub fn load(path: &Path) -> Result<Self> {
        validate_file_path(path)?;

        let file = fs::File::open(path).map_err(|source| EditorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);

        let rope = match Rope::from_reader(reader) {
            Ok(r) => r,
            Err(_) => {
                // Not valid UTF-8: fall back to lossy conversion
                let bytes = fs::read(path).map_err(|source| EditorError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "loading with lossy UTF-8 conversion");
                Rope::from_str(&String::from_utf8_lossy(&bytes))
            }
        };

        Ok(Self {
            rope,
            modified: false,
            version: 0,
        })
    }

    /// Write the whole buffer to `path`.
    ///
    /// The file receives exactly the buffer contents: no newline is appended and
    /// line endings are left alone. An existing file is resolved through any
    /// symlinks first, so a linked file is updated rather than replaced by a
    /// copy. The write goes through a temporary file that is renamed over the
    /// target; when the directory does not allow creating one, the file is
    /// rewritten in place.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let write_err = |source: std::io::Error| EditorError::Write {
            path: path.to_path_buf(),
            source,
        };

        let target = resolve_write_target(path);
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut temp_file = match NamedTempFile::new_in(parent) {
            Ok(file) => file,
            Err(e) if target.is_file() => {
                tracing::debug!(path = %target.display(), "no temp file ({}); writing in place", e);
                return self.write_in_place(&target).map_err(write_err);
            }
            Err(e) => return Err(write_err(e)),
        };

        self.write_chunks(&mut temp_file).map_err(write_err)?;

        // Keep the permissions of the file being replaced
        if let Ok(metadata) = fs::metadata(&target) {
            temp_file
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }

        temp_file.as_file().sync_all().map_err(write_err)?;
        temp_file.persist(&target).map_err(|e| write_err(e.error))?;

        Ok(())
    }

    /// Truncate and rewrite an existing file
    fn write_in_place(&self, target: &Path) -> std::io::Result<()> {
        let mut file = fs::File::create(target)?;
        self.write_chunks(&mut file)?;
        file.sync_all()
    }

    fn write_chunks<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for chunk in self.rope.chunks() {
            out.write_all(chunk.as_bytes())?;
        }
        out.flush()
    }

    /// Clear the modified flag after a successful save
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // ==================== Content Access ====================

    /// Total length in chars
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Get a range of text as string (clamped to the buffer)
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    // ==================== Line Operations ====================

    /// Number of lines (an empty buffer has 1 line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// A line including its trailing newline, if any
    pub fn line(&self, line_idx: usize) -> Option<RopeSlice<'_>> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line(line_idx))
    }

    /// A line without its line ending, as an owned string
    pub fn line_text(&self, line_idx: usize) -> String {
        match self.line(line_idx) {
            Some(line) => {
                let s = line.to_string();
                s.trim_end_matches(['\n', '\r']).to_string()
            }
            None => String::new(),
        }
    }

    /// Char length of a line, excluding the line ending
    pub fn line_len_chars(&self, line_idx: usize) -> usize {
        self.line_text(line_idx).chars().count()
    }

    /// Char index of the start of a line (clamped)
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        let line_idx = line_idx.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line_idx)
    }

    /// Line containing a char index (clamped)
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.rope.len_chars()))
    }

    // ==================== Editing Operations ====================

    /// Insert text at char position (clamped)
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let char_idx = char_idx.min(self.rope.len_chars());
        self.rope.insert(char_idx, text);
        self.mark_modified();
    }

    /// Remove a char range (clamped). Empty ranges are ignored.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }
        self.rope.remove(start..end);
        self.mark_modified();
    }

    fn mark_modified(&mut self) {
        self.modified = true;
        self.version += 1;
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

/// Reject paths that cannot be loaded as a text file
fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(EditorError::FileNotFound(path.to_path_buf()));
    }

    if path.is_dir() {
        return Err(invalid(path, "is a directory"));
    }

    // Block device files (Unix only) - opening these can hang the editor
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if let Ok(metadata) = fs::metadata(path) {
            let file_type = metadata.file_type();
            if file_type.is_block_device()
                || file_type.is_char_device()
                || file_type.is_fifo()
                || file_type.is_socket()
            {
                return Err(invalid(path, "is a device or special file"));
            }
        }
    }

    Ok(())
}

/// Where a write to `path` should land: the file a symlink points at, or
/// `path` itself when nothing exists there yet
fn resolve_write_target(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => path.to_path_buf(),
    }
}

fn invalid(path: &Path, reason: &str) -> EditorError {
    EditorError::InvalidPath {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}

//! File picker model used for Open and Save-As.
//!
//! The dialog lists one directory at a time: a `..` entry, sub-directories, then
//! the files that match the active filter. A filename field and a filter
//! selector sit under the list. Rendering lives in
//! `terminal/renderers/dialog_renderer.rs`; this module only holds state and
//! reacts to [`InputEvent`]s.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::input::{InputEvent, Key};

/// A named glob shown in the filter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

/// Filters offered by both dialogs, in display order
pub const FILE_FILTERS: &[FileFilter] = &[
    FileFilter { label: "All Files", pattern: "*.*" },
    FileFilter { label: "Text Files", pattern: "*.txt" },
    FileFilter { label: "C++ Scripts", pattern: "*.cpp" },
    FileFilter { label: "C Scripts", pattern: "*.c" },
    FileFilter { label: "Python Scripts", pattern: "*.py" },
    FileFilter { label: "Markdown Documents", pattern: "*.md" },
    FileFilter { label: "JavaScript Files", pattern: "*.js" },
    FileFilter { label: "HTML Documents", pattern: "*.html" },
    FileFilter { label: "CSS Documents", pattern: "*.css" },
];

/// Extension appended to a saved name that has none
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Name pre-filled in the Save-As dialog
pub const DEFAULT_SAVE_NAME: &str = "Untitled.txt";

impl FileFilter {
    /// Whether a file name passes this filter. `*.*` accepts everything.
    pub fn matches(&self, file_name: &str) -> bool {
        match self.pattern.strip_prefix("*.") {
            Some("*") => true,
            Some(ext) => Path::new(file_name)
                .extension()
                .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
                .unwrap_or(false),
            None => file_name == self.pattern,
        }
    }

    /// Label as shown in the selector, e.g. `Text Files (*.txt)`
    pub fn display(&self) -> String {
        format!("{} ({})", self.label, self.pattern)
    }
}

/// Whether `name` ends in a non-empty extension (`notes.` has none)
fn has_extension(name: &str) -> bool {
    Path::new(name).extension().is_some_and(|ext| !ext.is_empty())
}

/// Append [`DEFAULT_EXTENSION`] when `name` has no extension. Trailing dots
/// are dropped first, so `notes.` becomes `notes.txt`.
pub fn apply_default_extension(name: &str) -> String {
    if has_extension(name) {
        name.to_string()
    } else {
        format!("{}{}", name.trim_end_matches('.'), DEFAULT_EXTENSION)
    }
}

/// Which file operation the dialog serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Open,
    Save,
}

impl DialogMode {
    pub fn title(self) -> &'static str {
        match self {
            DialogMode::Open => "Open",
            DialogMode::Save => "Save As",
        }
    }
}

/// Part of the dialog receiving keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Entries,
    Name,
    Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Result of feeding input to the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep {
    Continue,
    Accepted(PathBuf),
    Cancelled,
}

/// Modal file picker state
#[derive(Debug, Clone)]
pub struct FileDialog {
    mode: DialogMode,
    dir: PathBuf,
    entries: Vec<DirEntry>,
    filter_index: usize,
    selected: usize,
    filename: String,
    focus: DialogFocus,
    error: Option<String>,
    /// Existing file the user was warned about; a second accept replaces it
    pending_overwrite: Option<PathBuf>,
}

impl FileDialog {
    pub fn new(mode: DialogMode, dir: PathBuf) -> Self {
        let (filename, focus) = match mode {
            DialogMode::Open => (String::new(), DialogFocus::Entries),
            DialogMode::Save => (DEFAULT_SAVE_NAME.to_string(), DialogFocus::Name),
        };
        let mut dialog = Self {
            mode,
            dir,
            entries: Vec::new(),
            filter_index: 0,
            selected: 0,
            filename,
            focus,
            error: None,
            pending_overwrite: None,
        };
        dialog.refresh();
        dialog
    }

    // ==================== Accessors ====================

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn filter(&self) -> FileFilter {
        FILE_FILTERS[self.filter_index]
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn focus(&self) -> DialogFocus {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ==================== Directory Listing ====================

    /// Re-read the current directory through the active filter
    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected = 0;

        if self.dir.parent().is_some() {
            self.entries.push(DirEntry {
                name: "..".to_string(),
                is_dir: true,
            });
        }

        let read = match fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), "cannot list directory: {}", e);
                self.error = Some(format!("Cannot read {}: {}", self.dir.display(), e));
                return;
            }
        };

        let filter = self.filter();
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            // Follow symlinks so linked directories can be entered
            let is_dir = entry.path().is_dir();
            if is_dir {
                dirs.push(name);
            } else if filter.matches(&name) {
                files.push(name);
            }
        }
        dirs.sort_by_key(|n| n.to_lowercase());
        files.sort_by_key(|n| n.to_lowercase());

        self.entries
            .extend(dirs.into_iter().map(|name| DirEntry { name, is_dir: true }));
        self.entries
            .extend(files.into_iter().map(|name| DirEntry { name, is_dir: false }));
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.error = None;
        self.refresh();
    }

    // ==================== Navigation ====================

    pub fn select_next(&mut self) {
        self.select_by(1);
    }

    pub fn select_prev(&mut self) {
        self.select_by(-1);
    }

    /// Move the list highlight; files are copied into the name field
    pub fn select_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected + delta as usize).min(last)
        };
        if let Some(entry) = self.entries.get(self.selected) {
            if !entry.is_dir {
                self.filename = entry.name.clone();
            }
        }
        self.clear_feedback();
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let n = FILE_FILTERS.len();
        self.filter_index = if forward {
            (self.filter_index + 1) % n
        } else {
            (self.filter_index + n - 1) % n
        };
        self.refresh();
    }

    pub fn set_filter(&mut self, index: usize) {
        if index < FILE_FILTERS.len() {
            self.filter_index = index;
            self.refresh();
        }
    }

    /// Enter the highlighted directory, or choose the highlighted file
    pub fn activate_selected(&mut self) -> DialogStep {
        let entry = match self.entries.get(self.selected) {
            Some(e) => e.clone(),
            None => return DialogStep::Continue,
        };

        if entry.is_dir {
            let target = if entry.name == ".." {
                match self.dir.parent() {
                    Some(parent) => parent.to_path_buf(),
                    None => return DialogStep::Continue,
                }
            } else {
                self.dir.join(&entry.name)
            };
            self.change_dir(target);
            DialogStep::Continue
        } else {
            self.filename = entry.name;
            self.accept()
        }
    }

    /// Accept the name field
    pub fn accept(&mut self) -> DialogStep {
        let name = self.filename.trim().to_string();
        if name.is_empty() {
            return DialogStep::Continue;
        }

        let candidate = Path::new(&name);
        let resolved = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.dir.join(candidate)
        };

        if resolved.is_dir() {
            self.filename.clear();
            self.change_dir(resolved);
            return DialogStep::Continue;
        }

        match self.mode {
            DialogMode::Open => {
                if resolved.is_file() {
                    DialogStep::Accepted(resolved)
                } else {
                    self.error = Some(format!("File not found: {}", resolved.display()));
                    DialogStep::Continue
                }
            }
            DialogMode::Save => {
                let resolved = if has_extension(&name) {
                    resolved
                } else {
                    self.dir.join(apply_default_extension(&name))
                };
                let parent_ok = resolved.parent().map(Path::is_dir).unwrap_or(false);
                if !parent_ok {
                    self.error = Some(format!(
                        "Directory does not exist: {}",
                        resolved.parent().unwrap_or(Path::new("")).display()
                    ));
                    return DialogStep::Continue;
                }
                if resolved.exists() && self.pending_overwrite.as_ref() != Some(&resolved) {
                    self.error = Some(format!(
                        "{} already exists. Press Enter again to replace it.",
                        resolved.display()
                    ));
                    self.pending_overwrite = Some(resolved);
                    return DialogStep::Continue;
                }
                DialogStep::Accepted(resolved)
            }
        }
    }

    fn clear_feedback(&mut self) {
        self.error = None;
        self.pending_overwrite = None;
    }

    // ==================== Input ====================

    /// React to a key press
    pub fn handle_key(&mut self, event: &InputEvent) -> DialogStep {
        match &event.key {
            Key::Esc => return DialogStep::Cancelled,
            Key::Tab => {
                self.focus = match self.focus {
                    DialogFocus::Entries => DialogFocus::Name,
                    DialogFocus::Name => DialogFocus::Filter,
                    DialogFocus::Filter => DialogFocus::Entries,
                };
            }
            Key::BackTab => {
                self.focus = match self.focus {
                    DialogFocus::Entries => DialogFocus::Filter,
                    DialogFocus::Name => DialogFocus::Entries,
                    DialogFocus::Filter => DialogFocus::Name,
                };
            }
            Key::Up | Key::Left if self.focus == DialogFocus::Filter => self.cycle_filter(false),
            Key::Down | Key::Right if self.focus == DialogFocus::Filter => self.cycle_filter(true),
            Key::Up => self.select_prev(),
            Key::Down => self.select_next(),
            Key::PageUp => self.select_by(-10),
            Key::PageDown => self.select_by(10),
            Key::Home if self.focus == DialogFocus::Entries => self.select_by(isize::MIN + 1),
            Key::End if self.focus == DialogFocus::Entries => self.select_by(isize::MAX),
            Key::Enter => {
                return match self.focus {
                    DialogFocus::Entries => self.activate_selected(),
                    DialogFocus::Name | DialogFocus::Filter => self.accept(),
                };
            }
            Key::Backspace => {
                self.focus = DialogFocus::Name;
                self.filename.pop();
                self.clear_feedback();
            }
            _ => {
                if let Some(c) = event.text_char() {
                    self.focus = DialogFocus::Name;
                    self.filename.push(c);
                    self.clear_feedback();
                }
            }
        }
        DialogStep::Continue
    }
}

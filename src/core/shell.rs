//! The editor shell: one text buffer, its caret and selection, the filename
//! binding, and the file and clipboard operations the menu and shortcuts call.
//!
//! Filename binding is the only state machine here. New clears it, Open and
//! Save-As set it, Save reads it to decide whether to ask for a path. The window
//! title is derived from it on demand and never stored.
//!
//! I/O failures never escape: they are logged through `tracing` and reported in
//! the status message, and the binding is left as it was.

use std::path::{Path, PathBuf};

use crate::core::buffer::TextBuffer;
use crate::core::clipboard::Clipboard;
use crate::core::error::{EditorError, Result};
use crate::core::file_dialog::DialogMode;
use crate::core::selection::Selection;
use crate::core::utf8;

/// Application name used in the window title
pub const APP_NAME: &str = "SnakeEditor";

/// Title name used while no file is bound
pub const UNTITLED: &str = "Untitled";

/// Default tab stop width for caret placement
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Window title for a filename binding: `"<path or Untitled> - SnakeEditor"`
pub fn window_title(filename: Option<&Path>) -> String {
    let name = match filename {
        Some(path) => path.display().to_string(),
        None => UNTITLED.to_string(),
    };
    format!("{} - {}", name, APP_NAME)
}

/// What the front end must do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran to completion (or was a no-op)
    Done,
    /// Show a file dialog, then call the matching `complete_*` method
    NeedsFile(DialogMode),
}

/// The operations the menu bar and keyboard shortcuts route to
pub trait EditorActions {
    fn new_file(&mut self) -> ActionOutcome;
    fn open_file(&mut self) -> ActionOutcome;
    fn save(&mut self) -> ActionOutcome;
    fn save_as(&mut self) -> ActionOutcome;
    fn cut(&mut self) -> ActionOutcome;
    fn copy(&mut self) -> ActionOutcome;
    fn paste(&mut self) -> ActionOutcome;
}

/// Editor state owned by the application
pub struct EditorShell {
    buffer: TextBuffer,
    filename: Option<PathBuf>,
    selection: Selection,
    /// Visual column kept across Up/Down moves
    preferred_col: Option<usize>,
    clipboard: Box<dyn Clipboard>,
    tab_width: usize,
    /// Status-line message
    message: Option<String>,
}

impl EditorShell {
    /// Create an untitled, empty editor
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            buffer: TextBuffer::new(),
            filename: None,
            selection: Selection::default(),
            preferred_col: None,
            clipboard,
            tab_width: DEFAULT_TAB_WIDTH,
            message: None,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    // ==================== Accessors ====================

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn title(&self) -> String {
        window_title(self.filename())
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Entire buffer content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn caret(&self) -> usize {
        self.selection.cursor
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Selected text, `None` when nothing is selected
    pub fn selected_text(&self) -> Option<String> {
        if self.selection.is_empty() {
            None
        } else {
            Some(self.buffer.slice_to_string(self.selection.range()))
        }
    }

    /// Caret position as (line, char column)
    pub fn caret_line_col(&self) -> (usize, usize) {
        let caret = self.caret();
        let line = self.buffer.char_to_line(caret);
        (line, caret - self.buffer.line_to_char(line))
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Directory a file dialog should start in
    pub fn dialog_start_dir(&self) -> PathBuf {
        if let Some(parent) = self.filename.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                return parent.to_path_buf();
            }
        }
        match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => PathBuf::from("."),
        }
    }

    // ==================== File Operations ====================

    /// Replace the buffer with the contents of `path` and bind it.
    /// On error nothing changes.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let buffer = TextBuffer::load(path)?;
        self.buffer = buffer;
        self.filename = Some(path.to_path_buf());
        self.selection = Selection::point(0);
        self.preferred_col = None;
        tracing::info!(path = %path.display(), "opened file");
        self.message = Some(format!("Opened {}", path.display()));
        Ok(())
    }

    /// Write the whole buffer to `path` without touching the binding
    pub fn write_to_path(&mut self, path: &Path) -> Result<()> {
        self.buffer.write_to(path)?;
        self.buffer.mark_saved();
        tracing::info!(path = %path.display(), "wrote file");
        self.message = Some(format!("Wrote {}", path.display()));
        Ok(())
    }

    /// Finish an Open after the dialog closed. `None` means cancelled.
    pub fn complete_open(&mut self, choice: Option<PathBuf>) {
        match choice {
            Some(path) => {
                if let Err(e) = self.open_path(&path) {
                    self.report_error(e);
                }
            }
            None => tracing::debug!("open cancelled"),
        }
    }

    /// Finish a Save-As after the dialog closed. `None` means cancelled.
    /// The binding only changes when the write succeeds.
    pub fn complete_save_as(&mut self, choice: Option<PathBuf>) {
        match choice {
            Some(path) => match self.write_to_path(&path) {
                Ok(()) => self.filename = Some(path),
                Err(e) => self.report_error(e),
            },
            None => tracing::debug!("save-as cancelled"),
        }
    }

    /// Log an error and show it in the status line
    pub fn report_error(&mut self, error: EditorError) {
        if error.is_benign() {
            tracing::debug!("{}", error);
            return;
        }
        match &error {
            EditorError::Write { .. } => tracing::error!("{}", error),
            _ => tracing::warn!("{}", error),
        }
        self.message = Some(error.to_string());
    }

    // ==================== Clipboard ====================

    /// Copy the selection to the clipboard
    pub fn try_copy(&mut self) -> Result<String> {
        let text = self.selected_text().ok_or(EditorError::EmptySelection)?;
        self.clipboard.set_text(&text);
        Ok(text)
    }

    /// Copy the selection, then delete it
    pub fn try_cut(&mut self) -> Result<String> {
        let text = self.try_copy()?;
        self.delete_selection();
        Ok(text)
    }

    /// Insert clipboard text at the caret. A selection is not replaced:
    /// it collapses to a caret just after the pasted text.
    /// Returns false when the clipboard holds no text.
    pub fn try_paste(&mut self) -> bool {
        let Some(text) = self.clipboard.get_text() else {
            return false;
        };
        let caret = self.caret();
        self.buffer.insert(caret, &text);
        self.selection = Selection::point(caret + text.chars().count());
        self.preferred_col = None;
        true
    }

    // ==================== Editing ====================

    /// Replace the selection (or insert at the caret) with `text`
    pub fn replace_selection(&mut self, text: &str) {
        let start = self.selection.start();
        self.buffer.remove(self.selection.range());
        self.buffer.insert(start, text);
        self.selection = Selection::point(start + text.chars().count());
        self.preferred_col = None;
    }

    pub fn insert_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.replace_selection(c.encode_utf8(&mut tmp));
    }

    pub fn insert_newline(&mut self) {
        self.replace_selection("\n");
    }

    pub fn insert_tab(&mut self) {
        self.replace_selection("\t");
    }

    /// Delete the selection; returns false if there was none
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let start = self.selection.start();
        self.buffer.remove(self.selection.range());
        self.selection = Selection::point(start);
        self.preferred_col = None;
        true
    }

    /// Backspace: delete the selection or the grapheme before the caret
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let caret = self.caret();
        let target = self.position_before(caret);
        if target < caret {
            self.buffer.remove(target..caret);
            self.selection = Selection::point(target);
        }
        self.preferred_col = None;
    }

    /// Delete: delete the selection or the grapheme after the caret
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let caret = self.caret();
        let target = self.position_after(caret);
        if target > caret {
            self.buffer.remove(caret..target);
        }
        self.preferred_col = None;
    }

    // ==================== Caret Movement ====================

    pub fn move_left(&mut self, extend: bool) {
        if !extend && !self.selection.is_empty() {
            self.selection = Selection::point(self.selection.start());
        } else {
            let pos = self.position_before(self.caret());
            self.selection.set_cursor(pos, extend);
        }
        self.preferred_col = None;
    }

    pub fn move_right(&mut self, extend: bool) {
        if !extend && !self.selection.is_empty() {
            self.selection = Selection::point(self.selection.end());
        } else {
            let pos = self.position_after(self.caret());
            self.selection.set_cursor(pos, extend);
        }
        self.preferred_col = None;
    }

    pub fn move_up(&mut self, extend: bool) {
        self.move_lines(-1, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.move_lines(1, extend);
    }

    pub fn page_up(&mut self, rows: usize, extend: bool) {
        self.move_lines(-(rows.max(1) as isize), extend);
    }

    pub fn page_down(&mut self, rows: usize, extend: bool) {
        self.move_lines(rows.max(1) as isize, extend);
    }

    pub fn line_start(&mut self, extend: bool) {
        let (line, _) = self.caret_line_col();
        let pos = self.buffer.line_to_char(line);
        self.selection.set_cursor(pos, extend);
        self.preferred_col = None;
    }

    pub fn line_end(&mut self, extend: bool) {
        let (line, _) = self.caret_line_col();
        let pos = self.buffer.line_to_char(line) + self.buffer.line_len_chars(line);
        self.selection.set_cursor(pos, extend);
        self.preferred_col = None;
    }

    pub fn buffer_start(&mut self, extend: bool) {
        self.selection.set_cursor(0, extend);
        self.preferred_col = None;
    }

    pub fn buffer_end(&mut self, extend: bool) {
        self.selection.set_cursor(self.buffer.len_chars(), extend);
        self.preferred_col = None;
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.buffer.len_chars());
        self.preferred_col = None;
    }

    /// Select an explicit char range (anchor to caret)
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        self.selection = Selection::new(anchor, cursor);
        self.selection.clamp(self.buffer.len_chars());
        self.preferred_col = None;
    }

    /// Place the caret at a line and visual column, as a mouse click does
    pub fn set_caret_at(&mut self, line: usize, visual_col: usize, extend: bool) {
        let line = line.min(self.buffer.line_count().saturating_sub(1));
        let text = self.buffer.line_text(line);
        let col = utf8::char_col_from_visual(&text, visual_col, self.tab_width);
        let pos = self.buffer.line_to_char(line) + col;
        self.selection.set_cursor(pos, extend);
        self.preferred_col = None;
    }

    fn move_lines(&mut self, delta: isize, extend: bool) {
        if !extend && !self.selection.is_empty() {
            let edge = if delta < 0 {
                self.selection.start()
            } else {
                self.selection.end()
            };
            self.selection = Selection::point(edge);
        }

        let (line, col) = self.caret_line_col();
        let current_text = self.buffer.line_text(line);
        let want = match self.preferred_col {
            Some(v) => v,
            None => utf8::visual_col(&current_text, col, self.tab_width),
        };

        let last_line = self.buffer.line_count().saturating_sub(1);
        let target_line = if delta < 0 {
            line.saturating_sub(delta.unsigned_abs())
        } else {
            (line + delta as usize).min(last_line)
        };

        let pos = if target_line == line && delta < 0 {
            0
        } else if target_line == line && delta > 0 {
            self.buffer.len_chars()
        } else {
            let text = self.buffer.line_text(target_line);
            self.buffer.line_to_char(target_line)
                + utf8::char_col_from_visual(&text, want, self.tab_width)
        };

        self.selection.set_cursor(pos, extend);
        self.preferred_col = Some(want);
    }

    /// Previous caret stop: one grapheme back, or the end of the previous line
    fn position_before(&self, pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }
        let line = self.buffer.char_to_line(pos);
        let line_start = self.buffer.line_to_char(line);
        if pos == line_start {
            let prev = line - 1;
            return self.buffer.line_to_char(prev) + self.buffer.line_len_chars(prev);
        }
        let text = self.buffer.line_text(line);
        line_start + utf8::prev_boundary(&text, pos - line_start)
    }

    /// Next caret stop: one grapheme forward, or the start of the next line
    fn position_after(&self, pos: usize) -> usize {
        let len = self.buffer.len_chars();
        if pos >= len {
            return len;
        }
        let line = self.buffer.char_to_line(pos);
        let line_start = self.buffer.line_to_char(line);
        let line_len = self.buffer.line_len_chars(line);
        if pos >= line_start + line_len {
            if line + 1 < self.buffer.line_count() {
                return self.buffer.line_to_char(line + 1);
            }
            return len;
        }
        let text = self.buffer.line_text(line);
        line_start + utf8::next_boundary(&text, pos - line_start)
    }
}

impl EditorActions for EditorShell {
    fn new_file(&mut self) -> ActionOutcome {
        self.buffer = TextBuffer::new();
        self.filename = None;
        self.selection = Selection::point(0);
        self.preferred_col = None;
        self.message = None;
        tracing::info!("new file");
        ActionOutcome::Done
    }

    fn open_file(&mut self) -> ActionOutcome {
        ActionOutcome::NeedsFile(DialogMode::Open)
    }

    fn save(&mut self) -> ActionOutcome {
        match self.filename.clone() {
            Some(path) => {
                if let Err(e) = self.write_to_path(&path) {
                    self.report_error(e);
                }
                ActionOutcome::Done
            }
            None => self.save_as(),
        }
    }

    fn save_as(&mut self) -> ActionOutcome {
        ActionOutcome::NeedsFile(DialogMode::Save)
    }

    fn cut(&mut self) -> ActionOutcome {
        if let Err(e) = self.try_cut() {
            self.report_error(e);
        }
        ActionOutcome::Done
    }

    fn copy(&mut self) -> ActionOutcome {
        if let Err(e) = self.try_copy() {
            self.report_error(e);
        }
        ActionOutcome::Done
    }

    fn paste(&mut self) -> ActionOutcome {
        if !self.try_paste() {
            tracing::debug!("paste with empty clipboard");
        }
        ActionOutcome::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::LocalClipboard;

    fn shell_with(text: &str) -> EditorShell {
        let mut shell = EditorShell::new(Box::new(LocalClipboard::new()));
        shell.replace_selection(text);
        shell
    }

    #[test]
    fn test_window_title() {
        assert_eq!(window_title(None), "Untitled - SnakeEditor");
        assert_eq!(
            window_title(Some(Path::new("/tmp/x.txt"))),
            "/tmp/x.txt - SnakeEditor"
        );
    }

    #[test]
    fn test_new_file_resets_everything() {
        let mut shell = shell_with("some text");
        shell.filename = Some(PathBuf::from("/tmp/a.txt"));
        shell.select(0, 4);

        assert_eq!(shell.new_file(), ActionOutcome::Done);
        assert_eq!(shell.text(), "");
        assert_eq!(shell.filename(), None);
        assert_eq!(shell.title(), "Untitled - SnakeEditor");
        assert_eq!(shell.selection(), Selection::point(0));
    }

    #[test]
    fn test_save_without_binding_asks_like_save_as() {
        let mut shell = shell_with("x");
        assert_eq!(shell.save(), shell.save_as());
        assert_eq!(shell.save(), ActionOutcome::NeedsFile(DialogMode::Save));
    }

    #[test]
    fn test_cut_and_paste_scenario() {
        let mut shell = shell_with("hello world");
        shell.select(6, 11);

        shell.cut();
        assert_eq!(shell.text(), "hello ");
        assert_eq!(shell.caret(), 6);

        shell.paste();
        assert_eq!(shell.text(), "hello world");

        // Clipboard unchanged by paste
        shell.buffer_start(false);
        shell.paste();
        assert_eq!(shell.text(), "worldhello world");
    }

    #[test]
    fn test_copy_without_selection_is_noop() {
        let mut shell = shell_with("abc");
        assert!(matches!(shell.try_copy(), Err(EditorError::EmptySelection)));
        assert!(matches!(shell.try_cut(), Err(EditorError::EmptySelection)));

        shell.copy();
        shell.cut();
        assert_eq!(shell.text(), "abc");
        assert_eq!(shell.message(), None);
        // Nothing reached the clipboard
        assert!(!shell.try_paste());
    }

    #[test]
    fn test_paste_keeps_selected_text() {
        let mut shell = EditorShell::new(Box::new(LocalClipboard::with_text("XY")));
        shell.replace_selection("hello world");

        // Caret at the start of a backward selection of "world"
        shell.select(11, 6);
        shell.paste();
        assert_eq!(shell.text(), "hello XYworld");
        assert_eq!(shell.caret(), 8);
        assert_eq!(shell.selected_text(), None);

        // Caret at the end of a forward selection
        shell.select(0, 5);
        shell.paste();
        assert_eq!(shell.text(), "helloXY XYworld");
    }

    #[test]
    fn test_backward_selection_cut() {
        let mut shell = shell_with("abcdef");
        shell.select(4, 1);
        assert_eq!(shell.try_cut().unwrap(), "bcd");
        assert_eq!(shell.text(), "aef");
        assert_eq!(shell.caret(), 1);
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut shell = shell_with("");
        for c in "hi".chars() {
            shell.insert_char(c);
        }
        shell.insert_newline();
        shell.insert_char('x');
        assert_eq!(shell.text(), "hi\nx");

        shell.delete_backward();
        shell.delete_backward();
        assert_eq!(shell.text(), "hi");

        shell.buffer_start(false);
        shell.delete_forward();
        assert_eq!(shell.text(), "i");
    }

    #[test]
    fn test_delete_joins_crlf_lines() {
        let mut shell = shell_with("ab\r\ncd");
        shell.select(4, 4); // start of "cd"
        shell.delete_backward();
        assert_eq!(shell.text(), "abcd");
        assert_eq!(shell.caret(), 2);
    }

    #[test]
    fn test_left_right_skip_graphemes_and_line_endings() {
        let mut shell = shell_with("e\u{301}\r\nz");
        shell.buffer_start(false);
        shell.move_right(false);
        assert_eq!(shell.caret(), 2);
        shell.move_right(false);
        assert_eq!(shell.caret(), 4);
        shell.move_left(false);
        assert_eq!(shell.caret(), 2);
        shell.move_left(false);
        assert_eq!(shell.caret(), 0);
    }

    #[test]
    fn test_up_down_keep_column() {
        let mut shell = shell_with("long line\nab\nanother line");
        shell.select(7, 7); // line 0, col 7
        shell.move_down(false);
        assert_eq!(shell.caret_line_col(), (1, 2)); // clamped to "ab"
        shell.move_down(false);
        assert_eq!(shell.caret_line_col(), (2, 7)); // preferred column restored
        shell.move_up(false);
        shell.move_up(false);
        assert_eq!(shell.caret_line_col(), (0, 7));
        shell.move_up(false);
        assert_eq!(shell.caret(), 0);
    }

    #[test]
    fn test_shift_movement_extends_selection() {
        let mut shell = shell_with("hello world");
        shell.buffer_start(false);
        for _ in 0..5 {
            shell.move_right(true);
        }
        assert_eq!(shell.selected_text().as_deref(), Some("hello"));

        shell.move_right(false);
        assert_eq!(shell.selected_text(), None);
        assert_eq!(shell.caret(), 5);
    }

    #[test]
    fn test_line_start_end() {
        let mut shell = shell_with("one\ntwo three");
        shell.line_start(false);
        assert_eq!(shell.caret(), 4);
        shell.line_end(true);
        assert_eq!(shell.selected_text().as_deref(), Some("two three"));
    }

    #[test]
    fn test_set_caret_at_visual_column() {
        let mut shell = shell_with("a\tb\nxyz");
        shell.set_caret_at(0, 4, false);
        assert_eq!(shell.caret(), 2); // just before 'b'
        shell.set_caret_at(5, 1, true);
        assert_eq!(shell.selection(), Selection::new(2, 5));
    }

    #[test]
    fn test_select_all() {
        let mut shell = shell_with("abc\ndef");
        shell.select_all();
        assert_eq!(shell.selected_text().as_deref(), Some("abc\ndef"));
    }
}

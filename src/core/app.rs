//! This module defines the central `EditorApp` structure: the editor shell plus
//! the menu bar, the open modal (file dialog or message box) and the key map.
//!
//! Keys are routed in a fixed order: an open modal takes everything, then an
//! open menu, then key bindings, then plain text insertion.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::clipboard::Clipboard;
use crate::core::command::EditorCommand;
use crate::core::dispatcher::{self, DispatchResult};
use crate::core::file_dialog::{DialogMode, DialogStep, FileDialog};
use crate::core::input::{InputEvent, Key, KeyMap};
use crate::core::menu::{MENU_BAR_HEIGHT_CELLS, MenuBar};
use crate::core::message_box::MessageBox;
use crate::core::shell::EditorShell;

/// A modal window covering the editor
#[derive(Debug, Clone)]
pub enum Modal {
    File(FileDialog),
    Message(MessageBox),
}

/// Root application state
pub struct EditorApp {
    pub shell: EditorShell,
    pub menu_bar: MenuBar,
    pub modal: Option<Modal>,
    pub keymap: KeyMap,
    /// Visible text rows, kept current by the front end for paging
    pub page_rows: usize,
}

impl EditorApp {
    pub fn new(shell: EditorShell, keymap: KeyMap) -> Self {
        Self {
            shell,
            menu_bar: MenuBar::new(),
            modal: None,
            keymap,
            page_rows: 1,
        }
    }

    /// Build the app from configuration and open the first file, if any,
    /// as if it had been chosen in the Open dialog.
    pub fn initialize_with_config(
        config: &Config,
        files: &[PathBuf],
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let shell = EditorShell::new(clipboard).with_tab_width(config.tab_width());
        let keymap = KeyMap::from_bindings(&config.keybindings);
        tracing::debug!(bindings = keymap.len(), "key map loaded");

        let mut app = Self::new(shell, keymap);
        if let Some(path) = files.first() {
            app.shell.complete_open(Some(path.clone()));
        }
        app
    }

    pub fn title(&self) -> String {
        self.shell.title()
    }

    // ==================== Commands ====================

    /// Run a command and start whatever follow-up UI it asks for
    pub fn execute(&mut self, command: EditorCommand, extend: bool) -> DispatchResult {
        let result = dispatcher::dispatch(&mut self.shell, command, extend, self.page_rows);
        match &result {
            DispatchResult::NeedsFile(mode) => self.open_dialog(*mode),
            DispatchResult::Message(message) => {
                self.modal = Some(Modal::Message(message.clone()));
            }
            DispatchResult::OpenMenu => self.menu_bar.open_menu(0),
            _ => {}
        }
        result
    }

    /// Show the file dialog in the shell's start directory
    pub fn open_dialog(&mut self, mode: DialogMode) {
        let dir = self.shell.dialog_start_dir();
        self.open_dialog_in(mode, &dir);
    }

    pub fn open_dialog_in(&mut self, mode: DialogMode, dir: &Path) {
        self.menu_bar.close();
        self.modal = Some(Modal::File(FileDialog::new(mode, dir.to_path_buf())));
    }

    /// Close the file dialog and complete the pending operation
    pub fn finish_dialog(&mut self, mode: DialogMode, choice: Option<PathBuf>) {
        self.modal = None;
        match mode {
            DialogMode::Open => self.shell.complete_open(choice),
            DialogMode::Save => self.shell.complete_save_as(choice),
        }
    }

    // ==================== Keyboard ====================

    /// Route a key press
    pub fn handle_key(&mut self, event: &InputEvent) -> DispatchResult {
        self.shell.clear_message();

        if self.modal.is_some() {
            self.handle_modal_key(event);
            return DispatchResult::Success;
        }

        if self.menu_bar.is_open() {
            return self.handle_menu_key(event);
        }

        if let Some(command) = self.keymap.lookup(event) {
            return self.execute(command, event.shift);
        }

        if let Some(c) = event.text_char() {
            self.shell.insert_char(c);
            return DispatchResult::Success;
        }

        tracing::trace!(key = %event.key, "unbound key");
        DispatchResult::NotHandled
    }

    /// Text pasted by the terminal goes in like typing: it replaces the
    /// selection. Dropped while a menu or modal is open.
    pub fn handle_paste(&mut self, text: &str) -> DispatchResult {
        if self.modal.is_some() || self.menu_bar.is_open() {
            tracing::debug!(len = text.len(), "paste ignored while a menu or modal is open");
            return DispatchResult::NotHandled;
        }
        self.shell.clear_message();
        self.shell.replace_selection(text);
        DispatchResult::Success
    }

    fn handle_modal_key(&mut self, event: &InputEvent) {
        match self.modal.as_mut() {
            Some(Modal::File(dialog)) => {
                let mode = dialog.mode();
                match dialog.handle_key(event) {
                    DialogStep::Continue => {}
                    DialogStep::Accepted(path) => self.finish_dialog(mode, Some(path)),
                    DialogStep::Cancelled => self.finish_dialog(mode, None),
                }
            }
            Some(Modal::Message(_)) => {
                if MessageBox::dismissed_by(event) {
                    self.modal = None;
                }
            }
            None => {}
        }
    }

    fn handle_menu_key(&mut self, event: &InputEvent) -> DispatchResult {
        match event.key {
            Key::Esc | Key::F(10) => self.menu_bar.close(),
            Key::Left => self.menu_bar.prev_menu(),
            Key::Right => self.menu_bar.next_menu(),
            Key::Up => {
                if let Some(menu) = self.menu_bar.active() {
                    menu.select_prev();
                }
            }
            Key::Down => {
                if let Some(menu) = self.menu_bar.active() {
                    menu.select_next();
                }
            }
            Key::Enter => {
                if let Some(command) = self.menu_bar.execute_selected() {
                    return self.execute(command, false);
                }
            }
            _ => {}
        }
        DispatchResult::Success
    }

    // ==================== Mouse ====================

    /// Handle a left click on the menu bar or an open dropdown.
    /// Returns `None` when the click belongs to the text area.
    pub fn handle_menu_click(&mut self, column: usize, row: usize) -> Option<DispatchResult> {
        if row < MENU_BAR_HEIGHT_CELLS {
            match self.menu_bar.title_at(column) {
                Some(idx) if self.menu_bar.active_menu == Some(idx) => self.menu_bar.close(),
                Some(idx) => self.menu_bar.open_menu(idx),
                None => self.menu_bar.close(),
            }
            return Some(DispatchResult::Success);
        }

        if !self.menu_bar.is_open() {
            return None;
        }

        if let Some(item) = self.menu_bar.item_at(column, row) {
            if let Some(menu) = self.menu_bar.active() {
                menu.selected = Some(item);
            }
            return match self.menu_bar.execute_selected() {
                Some(command) => Some(self.execute(command, false)),
                None => Some(DispatchResult::Success),
            };
        }

        // Clicks on separators keep the menu; clicks elsewhere close it
        if !self.menu_bar.covers(column, row) {
            self.menu_bar.close();
        }
        Some(DispatchResult::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::LocalClipboard;
    use std::fs;

    fn app() -> EditorApp {
        EditorApp::initialize_with_config(&Config::load(), &[], Box::new(LocalClipboard::new()))
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::plain(k)
    }

    fn type_text(app: &mut EditorApp, text: &str) {
        for c in text.chars() {
            app.handle_key(&key(Key::Char(c)));
        }
    }

    fn ctrl_shift(c: char) -> InputEvent {
        InputEvent {
            key: Key::Char(c),
            shift: true,
            alt: false,
            ctrl: true,
        }
    }

    #[test]
    fn test_typing_inserts_text() {
        let mut app = app();
        type_text(&mut app, "hi");
        app.handle_key(&key(Key::Enter));
        type_text(&mut app, "there");
        assert_eq!(app.shell.text(), "hi\nthere");
        assert_eq!(app.title(), "Untitled - SnakeEditor");
    }

    #[test]
    fn test_shortcuts_open_dialogs() {
        let mut app = app();
        assert_eq!(
            app.handle_key(&InputEvent::ctrl('o')),
            DispatchResult::NeedsFile(DialogMode::Open)
        );
        assert!(matches!(&app.modal, Some(Modal::File(d)) if d.mode() == DialogMode::Open));

        // Escape cancels and leaves state unchanged
        app.handle_key(&key(Key::Esc));
        assert!(app.modal.is_none());
        assert_eq!(app.shell.filename(), None);

        assert_eq!(
            app.handle_key(&ctrl_shift('s')),
            DispatchResult::NeedsFile(DialogMode::Save)
        );
    }

    #[test]
    fn test_save_as_through_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        type_text(&mut app, "a");
        app.handle_key(&key(Key::Enter));
        type_text(&mut app, "b");

        app.open_dialog_in(DialogMode::Save, dir.path());
        for _ in 0.."Untitled.txt".len() {
            app.handle_key(&key(Key::Backspace));
        }
        type_text(&mut app, "out");
        app.handle_key(&key(Key::Enter));

        let path = dir.path().join("out.txt");
        assert!(app.modal.is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb");
        assert_eq!(app.title(), format!("{} - SnakeEditor", path.display()));

        // Ctrl+S now writes straight to the bound file
        type_text(&mut app, "c");
        assert_eq!(app.handle_key(&InputEvent::ctrl('s')), DispatchResult::Success);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nbc");
    }

    #[test]
    fn test_menu_keyboard_navigation() {
        let mut app = app();
        app.handle_key(&key(Key::F(10)));
        assert_eq!(app.menu_bar.active_menu, Some(0));

        app.handle_key(&key(Key::Left)); // wraps to About
        assert_eq!(app.menu_bar.active_menu, Some(2));
        let result = app.handle_key(&key(Key::Enter));
        assert_eq!(result, DispatchResult::Message(MessageBox::release_notes()));
        assert!(matches!(&app.modal, Some(Modal::Message(m)) if m.title == "Release Notes"));

        // Typing does not reach the buffer while the box is up
        type_text(&mut app, "x");
        assert_eq!(app.shell.text(), "");
        app.handle_key(&key(Key::Enter));
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_terminal_paste_replaces_selection() {
        let mut app = app();
        type_text(&mut app, "one two");
        app.shell.select(4, 7);
        assert_eq!(app.handle_paste("2\n3"), DispatchResult::Success);
        assert_eq!(app.shell.text(), "one 2\n3");

        app.handle_key(&key(Key::F(10)));
        assert_eq!(app.handle_paste("x"), DispatchResult::NotHandled);
        assert_eq!(app.shell.text(), "one 2\n3");
    }

    #[test]
    fn test_menu_exit() {
        let mut app = app();
        app.handle_key(&key(Key::F(10)));
        app.handle_key(&key(Key::Up)); // wraps to Exit
        assert_eq!(app.handle_key(&key(Key::Enter)), DispatchResult::Exit);
    }

    #[test]
    fn test_menu_click_routes_to_edit_actions() {
        let mut app = app();
        type_text(&mut app, "hello world");
        app.shell.select(6, 11);

        let (_, edit_x, _) = app.menu_bar.layout()[1];
        assert_eq!(app.handle_menu_click(edit_x + 1, 0), Some(DispatchResult::Success));
        assert_eq!(app.menu_bar.active_menu, Some(1));

        // First dropdown row is Cut
        app.handle_menu_click(edit_x + 1, 1);
        assert_eq!(app.shell.text(), "hello ");
        assert!(!app.menu_bar.is_open());

        // Clicks below the bar with no menu open belong to the text
        assert_eq!(app.handle_menu_click(3, 4), None);
    }

    #[test]
    fn test_open_missing_initial_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let app = EditorApp::initialize_with_config(
            &Config::load(),
            &[missing],
            Box::new(LocalClipboard::new()),
        );
        assert_eq!(app.shell.filename(), None);
        assert!(app.shell.message().is_some());
    }
}

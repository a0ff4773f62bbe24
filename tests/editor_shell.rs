//! Editor behavior tests
//!
//! Drive the shell and the application the way the menu bar and the keyboard
//! do, and check buffer, clipboard, file and title state afterwards.

use std::fs;
use std::path::PathBuf;

use snake_editor::config::Config;
use snake_editor::core::app::{EditorApp, Modal};
use snake_editor::core::clipboard::{Clipboard, LocalClipboard};
use snake_editor::core::command::EditorCommand;
use snake_editor::core::dispatcher::DispatchResult;
use snake_editor::core::file_dialog::DialogMode;
use snake_editor::core::input::{InputEvent, Key};
use snake_editor::core::shell::{ActionOutcome, EditorActions, EditorShell, window_title};

fn shell_with(text: &str) -> EditorShell {
    let mut shell = EditorShell::new(Box::new(LocalClipboard::new()));
    shell.replace_selection(text);
    shell
}

fn app() -> EditorApp {
    EditorApp::initialize_with_config(&Config::load(), &[], Box::new(LocalClipboard::new()))
}

/// Clipboard handle shared between the test and the shell
#[derive(Clone, Default)]
struct SharedClipboard(std::rc::Rc<std::cell::RefCell<LocalClipboard>>);

impl Clipboard for SharedClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.0.borrow_mut().get_text()
    }

    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().set_text(text);
    }
}

// =============================================================================
// FILE OPERATIONS
// =============================================================================

#[test]
fn new_always_yields_untitled_empty_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, "content").unwrap();

    let mut shell = shell_with("");
    shell.complete_open(Some(path));
    assert_ne!(shell.title(), "Untitled - SnakeEditor");

    assert_eq!(shell.new_file(), ActionOutcome::Done);
    assert_eq!(shell.text(), "");
    assert_eq!(shell.title(), "Untitled - SnakeEditor");

    // Again from an already untitled, edited state
    shell.replace_selection("scratch");
    shell.new_file();
    assert_eq!(shell.text(), "");
    assert_eq!(shell.title(), "Untitled - SnakeEditor");
}

#[test]
fn save_as_then_open_round_trips_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let samples = [
        "a\nb\nc",
        "",
        "trailing newline\n",
        "windows\r\nline endings\r\n",
        "tabs\tand ünïcödé 日本語 🐍",
    ];

    for (i, text) in samples.iter().enumerate() {
        let path = dir.path().join(format!("sample{}.txt", i));
        let mut shell = shell_with(text);
        shell.complete_save_as(Some(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), *text);

        let mut reader = shell_with("something else");
        reader.complete_open(Some(path));
        assert_eq!(reader.text(), *text);
    }
}

#[test]
fn save_as_writes_exact_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.txt");
    let mut shell = shell_with("a\nb\nc");
    shell.complete_save_as(Some(path.clone()));
    assert_eq!(fs::read(&path).unwrap(), b"a\nb\nc");
}

#[test]
fn title_follows_open_and_save_as() {
    let dir = tempfile::tempdir().unwrap();
    let opened = dir.path().join("opened.txt");
    fs::write(&opened, "x").unwrap();

    let mut shell = shell_with("");
    shell.complete_open(Some(opened.clone()));
    assert_eq!(shell.title(), format!("{} - SnakeEditor", opened.display()));

    let saved = dir.path().join("saved.md");
    shell.complete_save_as(Some(saved.clone()));
    assert_eq!(shell.title(), format!("{} - SnakeEditor", saved.display()));
    assert_eq!(shell.title(), window_title(Some(&saved)));
}

#[test]
fn save_without_binding_behaves_like_save_as() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut via_save = shell_with("same text");
    let mut via_save_as = shell_with("same text");

    assert_eq!(via_save.save(), ActionOutcome::NeedsFile(DialogMode::Save));
    assert_eq!(via_save_as.save_as(), ActionOutcome::NeedsFile(DialogMode::Save));

    via_save.complete_save_as(Some(path.clone()));
    let after_save = (via_save.text(), via_save.title(), fs::read_to_string(&path).unwrap());
    via_save_as.complete_save_as(Some(path.clone()));
    let after_save_as = (via_save_as.text(), via_save_as.title(), fs::read_to_string(&path).unwrap());
    assert_eq!(after_save, after_save_as);
}

#[test]
fn save_with_binding_writes_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bound.txt");
    fs::write(&path, "old").unwrap();

    let mut shell = shell_with("");
    shell.complete_open(Some(path.clone()));
    shell.select_all();
    shell.replace_selection("new");
    assert_eq!(shell.save(), ActionOutcome::Done);
    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert!(!shell.buffer().modified);
}

#[test]
fn failed_save_keeps_binding_and_modified_flag() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let path = sub.join("doc.txt");
    fs::write(&path, "old").unwrap();

    let mut shell = shell_with("");
    shell.complete_open(Some(path.clone()));
    shell.replace_selection("edited ");
    fs::remove_dir_all(&sub).unwrap();

    assert_eq!(shell.save(), ActionOutcome::Done);
    assert_eq!(shell.filename(), Some(path.as_path()));
    assert!(shell.buffer().modified);
    assert!(shell.message().unwrap().contains("doc.txt"));
    assert_eq!(shell.title(), window_title(Some(&path)));
}

#[cfg(unix)]
#[test]
fn save_through_symlink_updates_target() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real.txt");
    let link = dir.path().join("link.txt");
    fs::write(&real, "old").unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let mut shell = shell_with("");
    shell.complete_open(Some(link.clone()));
    shell.select_all();
    shell.replace_selection("new");
    assert_eq!(shell.save(), ActionOutcome::Done);

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real).unwrap(), "new");
    assert_eq!(shell.filename(), Some(link.as_path()));
    assert_eq!(shell.title(), format!("{} - SnakeEditor", link.display()));
}

#[test]
fn cancelled_dialogs_change_nothing() {
    let mut shell = shell_with("keep me");
    let title = shell.title();
    shell.complete_open(None);
    shell.complete_save_as(None);
    assert_eq!(shell.text(), "keep me");
    assert_eq!(shell.title(), title);
    assert_eq!(shell.filename(), None);
}

#[test]
fn failed_save_as_keeps_binding() {
    let dir = tempfile::tempdir().unwrap();
    let bound = dir.path().join("bound.txt");
    let mut shell = shell_with("text");
    shell.complete_save_as(Some(bound.clone()));

    let missing: PathBuf = dir.path().join("no").join("such").join("dir.txt");
    shell.complete_save_as(Some(missing.clone()));
    assert_eq!(shell.filename(), Some(bound.as_path()));
    assert!(!missing.exists());
    assert!(shell.message().is_some());
}

#[test]
fn failed_open_leaves_buffer_alone() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_with("unsaved work");
    shell.complete_open(Some(dir.path().join("missing.txt")));
    assert_eq!(shell.text(), "unsaved work");
    assert_eq!(shell.filename(), None);
    assert!(shell.message().is_some());
}

// =============================================================================
// CLIPBOARD
// =============================================================================

#[test]
fn cut_and_paste_scenario() {
    let clipboard = SharedClipboard::default();
    let mut shell = EditorShell::new(Box::new(clipboard.clone()));
    shell.replace_selection("hello world");

    shell.select(6, 11);
    shell.cut();
    assert_eq!(clipboard.0.borrow_mut().get_text().as_deref(), Some("world"));
    assert_eq!(shell.text(), "hello ");

    shell.paste();
    assert_eq!(shell.text(), "hello world");
    assert_eq!(clipboard.0.borrow_mut().get_text().as_deref(), Some("world"));
}

#[test]
fn paste_inserts_at_caret_only() {
    let mut shell = EditorShell::new(Box::new(LocalClipboard::with_text("XY")));
    shell.replace_selection("abcdef");
    shell.select(3, 3);
    shell.paste();
    assert_eq!(shell.text(), "abcXYdef");
    assert_eq!(shell.caret(), 5);
}

#[test]
fn paste_over_selection_keeps_selected_text() {
    let mut shell = EditorShell::new(Box::new(LocalClipboard::with_text("XY")));
    shell.replace_selection("hello world");
    shell.select(11, 6);
    shell.paste();
    assert_eq!(shell.text(), "hello XYworld");
}

#[test]
fn copy_and_cut_without_selection_are_no_ops() {
    let clipboard = SharedClipboard::default();
    clipboard.0.borrow_mut().set_text("before");
    let mut shell = EditorShell::new(Box::new(clipboard.clone()));
    shell.replace_selection("text");

    shell.copy();
    shell.cut();
    assert_eq!(shell.text(), "text");
    assert_eq!(clipboard.0.borrow_mut().get_text().as_deref(), Some("before"));
    assert_eq!(shell.message(), None);
}

// =============================================================================
// APPLICATION FLOW
// =============================================================================

#[test]
fn shortcuts_map_to_file_operations() {
    let mut app = app();
    assert!(matches!(
        app.handle_key(&InputEvent::ctrl('o')),
        DispatchResult::NeedsFile(DialogMode::Open)
    ));
    assert!(matches!(app.modal, Some(Modal::File(_))));
    app.handle_key(&InputEvent::plain(Key::Esc));
    assert!(app.modal.is_none());

    assert!(matches!(
        app.handle_key(&InputEvent::ctrl('s')),
        DispatchResult::NeedsFile(DialogMode::Save)
    ));
    app.handle_key(&InputEvent::plain(Key::Esc));

    app.shell.replace_selection("abc");
    assert_eq!(app.handle_key(&InputEvent::ctrl('n')), DispatchResult::Success);
    assert_eq!(app.shell.text(), "");
    assert_eq!(app.title(), "Untitled - SnakeEditor");
}

#[test]
fn open_through_dialog_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "from disk").unwrap();

    let mut app = app();
    app.open_dialog_in(DialogMode::Open, dir.path());
    // Entries: "..", then "only.txt"
    app.handle_key(&InputEvent::plain(Key::Down));
    app.handle_key(&InputEvent::plain(Key::Enter));

    assert!(app.modal.is_none());
    assert_eq!(app.shell.text(), "from disk");
    assert_eq!(
        app.title(),
        format!("{} - SnakeEditor", dir.path().join("only.txt").display())
    );
}

#[test]
fn about_menu_shows_message_boxes() {
    let mut app = app();
    app.execute(EditorCommand::About, false);
    match &app.modal {
        Some(Modal::Message(message)) => {
            assert_eq!(message.title, "About SnakeEditor");
            assert_eq!(message.message, "A simple Python-made text editor.");
        }
        other => panic!("expected a message box, got {:?}", other),
    }
    app.handle_key(&InputEvent::plain(Key::Enter));
    assert!(app.modal.is_none());

    app.execute(EditorCommand::ReleaseNotes, false);
    match &app.modal {
        Some(Modal::Message(message)) => {
            assert_eq!(message.message, "Version 1.0 - Created by Enrico Maietti");
        }
        other => panic!("expected a message box, got {:?}", other),
    }
}

#[test]
fn initial_file_is_opened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("start.txt");
    fs::write(&path, "hi").unwrap();

    let app = EditorApp::initialize_with_config(
        &Config::load(),
        &[path.clone()],
        Box::new(LocalClipboard::new()),
    );
    assert_eq!(app.shell.text(), "hi");
    assert_eq!(app.shell.filename(), Some(path.as_path()));
}

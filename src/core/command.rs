//! Named editor commands.
//!
//! Key bindings, menu items and the dispatcher all refer to commands by this
//! enum; the kebab-case names are what `user_config.rs` binds keys to.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    // File
    NewFile,
    OpenFile,
    Save,
    SaveAs,
    Exit,
    // Edit
    Cut,
    Copy,
    Paste,
    SelectAll,
    // About
    ReleaseNotes,
    About,
    // Menu bar
    OpenMenu,
    // Text widget
    ForwardChar,
    BackwardChar,
    NextLine,
    PreviousLine,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
    PageUp,
    PageDown,
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
}

/// Every command with its name
const COMMAND_NAMES: &[(EditorCommand, &str)] = &[
    (EditorCommand::NewFile, "new-file"),
    (EditorCommand::OpenFile, "open-file"),
    (EditorCommand::Save, "save"),
    (EditorCommand::SaveAs, "save-as"),
    (EditorCommand::Exit, "exit"),
    (EditorCommand::Cut, "cut"),
    (EditorCommand::Copy, "copy"),
    (EditorCommand::Paste, "paste"),
    (EditorCommand::SelectAll, "select-all"),
    (EditorCommand::ReleaseNotes, "release-notes"),
    (EditorCommand::About, "about"),
    (EditorCommand::OpenMenu, "open-menu"),
    (EditorCommand::ForwardChar, "forward-char"),
    (EditorCommand::BackwardChar, "backward-char"),
    (EditorCommand::NextLine, "next-line"),
    (EditorCommand::PreviousLine, "previous-line"),
    (EditorCommand::LineStart, "beginning-of-line"),
    (EditorCommand::LineEnd, "end-of-line"),
    (EditorCommand::BufferStart, "beginning-of-file"),
    (EditorCommand::BufferEnd, "end-of-file"),
    (EditorCommand::PageUp, "backward-page"),
    (EditorCommand::PageDown, "forward-page"),
    (EditorCommand::InsertNewline, "insert-newline"),
    (EditorCommand::InsertTab, "insert-tab"),
    (EditorCommand::DeleteBackward, "delete-previous-character"),
    (EditorCommand::DeleteForward, "delete-next-character"),
];

impl EditorCommand {
    pub fn name(self) -> &'static str {
        COMMAND_NAMES
            .iter()
            .find(|(cmd, _)| *cmd == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMMAND_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(cmd, _)| *cmd)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

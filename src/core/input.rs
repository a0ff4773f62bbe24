//! Backend-agnostic input model and key bindings.
//!
//! Terminal events are translated into [`InputEvent`] / [`MouseEvent`] by the
//! front end. Bindings are stored as normalized [`KeyInput`] chords so that the
//! same table works regardless of how a terminal reports modifiers.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::command::EditorCommand;

/// Native key representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Esc,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Insert,
    Null,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "F{}", n),
            Key::Esc => write!(f, "Esc"),
            Key::Enter => write!(f, "Enter"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Tab => write!(f, "Tab"),
            Key::BackTab => write!(f, "BackTab"),
            Key::Delete => write!(f, "Delete"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Insert => write!(f, "Insert"),
            Key::Null => write!(f, "Null"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => return Ok(Key::Enter),
            "TAB" => return Ok(Key::Tab),
            "BACKTAB" => return Ok(Key::BackTab),
            "BACKSPACE" | "BS" => return Ok(Key::Backspace),
            "ESC" => return Ok(Key::Esc),
            "DELETE" | "DEL" => return Ok(Key::Delete),
            "HOME" => return Ok(Key::Home),
            "END" => return Ok(Key::End),
            "PAGEUP" | "PGUP" => return Ok(Key::PageUp),
            "PAGEDOWN" | "PGDN" => return Ok(Key::PageDown),
            "UP" => return Ok(Key::Up),
            "DOWN" => return Ok(Key::Down),
            "LEFT" => return Ok(Key::Left),
            "RIGHT" => return Ok(Key::Right),
            "INSERT" | "INS" => return Ok(Key::Insert),
            "NUL" | "NULL" => return Ok(Key::Null),
            _ => {}
        }

        // Function keys F1-F24
        if s.len() >= 2 && (s.starts_with('F') || s.starts_with('f')) {
            if let Ok(n) = s[1..].parse::<u8>() {
                if (1..=24).contains(&n) {
                    return Ok(Key::F(n));
                }
            }
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key::Char(c)),
            _ => Err(format!("Unknown key: {}", s)),
        }
    }
}

/// Native input event representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl InputEvent {
    /// Unmodified key press
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            shift: false,
            alt: false,
            ctrl: true,
        }
    }

    pub fn shifted(key: Key) -> Self {
        Self {
            key,
            shift: true,
            alt: false,
            ctrl: false,
        }
    }

    /// A printable character to insert, if this event is one
    pub fn text_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.ctrl && !self.alt && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Mouse button types
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Type of mouse event
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollDown,
    ScrollUp,
}

/// Native mouse event representation (screen cell coordinates)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub column: u16,
    pub row: u16,
    pub kind: MouseEventKind,
    pub shift: bool,
}

/// Normalized key chord used for binding lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyInput {
    /// Normalize an event.
    ///
    /// Character keys are lowercased and an uppercase letter counts as Shift,
    /// so Ctrl+Shift+S matches whether the terminal reports `S` or `s`+Shift.
    /// For named keys Shift is dropped: it extends the selection instead of
    /// selecting a different binding.
    pub fn from_event(event: &InputEvent) -> Self {
        match &event.key {
            Key::Char(c) => Self {
                key: Key::Char(c.to_ascii_lowercase()),
                shift: event.shift || c.is_ascii_uppercase(),
                ctrl: event.ctrl,
                alt: event.alt,
            },
            other => Self {
                key: other.clone(),
                shift: false,
                ctrl: event.ctrl,
                alt: event.alt,
            },
        }
    }
}

impl FromStr for KeyInput {
    type Err = String;

    /// Parse a binding like `C-n`, `C-S-s`, `^O`, `F10` or `C-Home`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        let mut ctrl = false;
        let mut alt = false;
        let mut shift = false;

        // uEmacs caret notation: ^X is Ctrl+x
        if let Some(c) = rest.strip_prefix('^') {
            ctrl = true;
            rest = c;
        }

        loop {
            if let Some(r) = rest.strip_prefix("C-") {
                ctrl = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("M-") {
                alt = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("S-") {
                shift = true;
                rest = r;
            } else {
                break;
            }
        }

        let key = Key::from_str(rest)?;
        let event = InputEvent {
            key,
            shift,
            alt,
            ctrl,
        };
        let mut chord = Self::from_event(&event);
        // Caret notation is written in uppercase but means the plain letter
        if s.trim().starts_with('^') && !shift {
            chord.shift = false;
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "C-")?;
        }
        if self.alt {
            write!(f, "M-")?;
        }
        if self.shift {
            write!(f, "S-")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Key binding table
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<KeyInput, EditorCommand>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key spec to a command name
    pub fn bind(&mut self, spec: &str, command: &str) -> Result<(), String> {
        let chord = KeyInput::from_str(spec)?;
        let command = EditorCommand::from_str(command)?;
        self.bindings.insert(chord, command);
        Ok(())
    }

    /// Build a keymap from `(spec, command)` pairs, skipping bad entries
    pub fn from_bindings<'a>(bindings: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut map = Self::new();
        for (spec, command) in bindings {
            if let Err(e) = map.bind(spec, command) {
                tracing::warn!(binding = %spec, "ignoring key binding: {}", e);
            }
        }
        map
    }

    /// Command bound to an event
    pub fn lookup(&self, event: &InputEvent) -> Option<EditorCommand> {
        self.bindings.get(&KeyInput::from_event(event)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

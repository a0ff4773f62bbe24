use crate::core::input::{InputEvent, Key, MouseButton, MouseEvent, MouseEventKind};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Editor events
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Input(InputEvent),
    Resize(u16, u16),
    Mouse(MouseEvent),
    /// Text delivered through bracketed paste, line endings normalized to `\n`
    Paste(String),
    None,
}

/// Reads crossterm events and converts them to core input types
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> Result<bool, Box<dyn std::error::Error>> {
        Ok(event::poll(timeout)?)
    }

    /// Read the next event without blocking
    pub fn read(&mut self) -> Result<EditorEvent, Box<dyn std::error::Error>> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(EditorEvent::None);
        }
        Ok(match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Release => EditorEvent::None,
            Event::Key(key_event) => EditorEvent::Input(convert_key(key_event)),
            Event::Resize(cols, rows) => EditorEvent::Resize(cols, rows),
            Event::Mouse(mouse_event) => match convert_mouse(mouse_event) {
                Some(event) => EditorEvent::Mouse(event),
                None => EditorEvent::None,
            },
            Event::Paste(text) => EditorEvent::Paste(normalize_pasted(&text)),
            _ => EditorEvent::None,
        })
    }
}

/// Terminals send pasted line breaks as `\r`; the buffer uses `\n`
pub fn normalize_pasted(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn convert_button(btn: event::MouseButton) -> MouseButton {
    match btn {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert a crossterm mouse event; horizontal wheel events are dropped
pub fn convert_mouse(event: event::MouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        event::MouseEventKind::Down(btn) => MouseEventKind::Down(convert_button(btn)),
        event::MouseEventKind::Up(btn) => MouseEventKind::Up(convert_button(btn)),
        event::MouseEventKind::Drag(btn) => MouseEventKind::Drag(convert_button(btn)),
        event::MouseEventKind::Moved => MouseEventKind::Moved,
        event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        event::MouseEventKind::ScrollLeft | event::MouseEventKind::ScrollRight => return None,
    };
    Some(MouseEvent {
        column: event.column,
        row: event.row,
        kind,
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    })
}

/// Convert a crossterm key event
pub fn convert_key(key_event: event::KeyEvent) -> InputEvent {
    let modifiers = key_event.modifiers;
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    let key = match key_event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    };

    InputEvent {
        key,
        shift,
        alt,
        ctrl,
    }
}

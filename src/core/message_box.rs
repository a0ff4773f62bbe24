//! Informational message boxes shown from the About menu.

use crate::core::input::{InputEvent, Key};

/// A modal box with a title, a line of text and an OK button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub title: &'static str,
    pub message: &'static str,
}

impl MessageBox {
    pub fn about() -> Self {
        Self {
            title: "About SnakeEditor",
            message: "A simple Python-made text editor.",
        }
    }

    pub fn release_notes() -> Self {
        Self {
            title: "Release Notes",
            message: "Version 1.0 - Created by Enrico Maietti",
        }
    }

    /// Whether a key dismisses the box
    pub fn dismissed_by(event: &InputEvent) -> bool {
        matches!(event.key, Key::Enter | Key::Esc | Key::Char(' '))
    }
}

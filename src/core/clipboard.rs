//! Clipboard access.
//!
//! The shell talks to a [`Clipboard`] trait object. [`SystemClipboard`] wraps
//! `arboard` and mirrors every copy into a [`LocalClipboard`], so cut/copy/paste
//! keep working inside the editor when no system clipboard is reachable
//! (headless sessions, SSH, the Linux console).

use crate::core::error::{EditorError, Result};

/// Text clipboard used by cut, copy and paste
pub trait Clipboard {
    /// Current clipboard text, `None` when the clipboard holds no text
    fn get_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents
    fn set_text(&mut self, text: &str);
}

/// In-process clipboard
#[derive(Debug, Default, Clone)]
pub struct LocalClipboard {
    contents: Option<String>,
}

impl LocalClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard pre-filled with text
    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
        }
    }
}

impl Clipboard for LocalClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// System clipboard with an in-process mirror
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    local: LocalClipboard,
}

impl SystemClipboard {
    /// Connect to the system clipboard
    pub fn new() -> Result<Self> {
        let inner =
            arboard::Clipboard::new().map_err(|e| EditorError::Clipboard(e.to_string()))?;
        Ok(Self {
            inner,
            local: LocalClipboard::new(),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(arboard::Error::ContentNotAvailable) => self.local.get_text(),
            Err(e) => {
                tracing::warn!("system clipboard read failed: {}", e);
                self.local.get_text()
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        self.local.set_text(text);
        if let Err(e) = self.inner.set_text(text.to_string()) {
            tracing::warn!("system clipboard write failed: {}", e);
        }
    }
}

/// The system clipboard if one is reachable, otherwise an in-process one
pub fn system_or_local() -> Box<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!("{}; using an in-process clipboard", e);
            Box::new(LocalClipboard::new())
        }
    }
}

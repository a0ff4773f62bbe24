//! Specialized renderers for TUI components
//!
//! Each renderer draws one part of the screen into the back buffer of
//! `Display`.

pub mod dialog_renderer;
pub mod menu_renderer;
pub mod status_renderer;
pub mod text_renderer;

pub use dialog_renderer::DialogRenderer;
pub use menu_renderer::MenuRenderer;
pub use status_renderer::StatusRenderer;
pub use text_renderer::TextRenderer;

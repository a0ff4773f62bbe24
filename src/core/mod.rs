//! The headless, backend-agnostic core of SnakeEditor: the text buffer and
//! editor shell, clipboard access, the menu and dialog models, key bindings
//! and command dispatch.

pub mod app;
pub mod buffer;
pub mod clipboard;
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod file_dialog;
pub mod input;
pub mod menu;
pub mod message_box;
pub mod selection;
pub mod shell;
pub mod utf8;

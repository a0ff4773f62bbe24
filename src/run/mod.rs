//! Application execution modes.

mod tui;

pub use tui::run_terminal_mode;

//! Terminal rendering module
//!
//! This module handles the low-level rendering of the display buffer to the terminal,
//! using ANSI escape codes and crossterm for cursor control.

use std::io::Write;

use crossterm::{QueueableCommand, cursor, terminal::SetTitle};

use crate::terminal::display::Display;

/// Write the back buffer to the terminal, diffing against the front buffer.
///
/// Handles full redraws (e.g. after resize), skips unchanged cells, avoids
/// repeating color codes and leaves the cursor at `display.cursor_pos`.
pub fn render_display_to_terminal<W: Write>(
    display: &Display,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    // Hide cursor during update to prevent flickering
    write!(out, "\x1b[?25l")?;

    let needs_full = display.needs_full_redraw;
    if needs_full {
        write!(out, "\x1b[2J\x1b[H")?;
    }

    let front_buffer = &display.front_buffer;
    let back_buffer = &display.back_buffer;

    let mut last_fg = String::new();
    let mut last_bg = String::new();
    let mut cursor_moved = false;

    for y in 0..display.terminal_size.1 {
        for x in 0..display.terminal_size.0 {
            let new_cell = match back_buffer.get(x, y) {
                Some(cell) => cell,
                None => continue,
            };

            if !needs_full && front_buffer.get(x, y) == Some(new_cell) {
                continue;
            }
            if new_cell.hidden {
                continue;
            }

            write!(out, "\x1b[{};{}H", y + 1, x + 1)?;
            cursor_moved = true;

            let (fg, bg) = if display.truecolor {
                (new_cell.fg, new_cell.bg)
            } else {
                (new_cell.fg.to_ansi_fallback(), new_cell.bg.to_ansi_fallback())
            };
            let fg_code = fg.to_ansi_fg_code();
            let bg_code = bg.to_ansi_bg_code();

            if fg_code != last_fg || bg_code != last_bg {
                write!(out, "\x1b[{}m\x1b[{}m", fg_code, bg_code)?;
                last_fg = fg_code;
                last_bg = bg_code;
            }

            write!(out, "{}", new_cell.ch)?;
        }
    }

    if cursor_moved {
        write!(out, "\x1b[0m")?;
    }

    match display.cursor_pos {
        Some((cx, cy)) => {
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(cursor::Show)?;
        }
        None => {
            out.queue(cursor::Hide)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Set the terminal window title
pub fn set_title<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    out.queue(SetTitle(title))?;
    out.flush()
}

//! Terminal event handler module
//!
//! This module processes terminal events (input, resize, mouse) and dispatches
//! them to the appropriate editor components.

use crate::core::app::EditorApp;
use crate::core::dispatcher::DispatchResult;
use crate::core::input::{MouseButton, MouseEvent, MouseEventKind};
use crate::terminal::display::Display;
use crate::terminal::events::EditorEvent;
use crate::terminal::scrollbar::{self, ScrollbarHit};

/// Lines moved per wheel notch
const WHEEL_LINES: isize = 3;

/// Processes a single editor event and returns true if exit is requested.
pub fn process_terminal_event(
    app: &mut EditorApp,
    display: &mut Display,
    event: EditorEvent,
) -> Result<bool, Box<dyn std::error::Error>> {
    match event {
        EditorEvent::Input(key) => {
            let result = app.handle_key(&key);
            display.dirty = true;
            if result == DispatchResult::Exit {
                return Ok(true);
            }
        }
        EditorEvent::Resize(cols, rows) => {
            display.update_size(cols, rows);
            app.page_rows = display.text_rows().max(1);
            tracing::debug!(cols, rows, "terminal resized");
        }
        EditorEvent::Mouse(event) => {
            return Ok(handle_mouse(app, display, &event) == Some(DispatchResult::Exit));
        }
        EditorEvent::Paste(text) => {
            if app.handle_paste(&text) == DispatchResult::Success {
                display.dirty = true;
            }
        }
        EditorEvent::None => {}
    }
    Ok(false)
}

fn handle_mouse(app: &mut EditorApp, display: &mut Display, event: &MouseEvent) -> Option<DispatchResult> {
    let column = event.column as usize;
    let row = event.row as usize;

    // Modals are keyboard driven
    if app.modal.is_some() {
        return None;
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(result) = app.handle_menu_click(column, row) {
                display.selecting = false;
                display.dirty = true;
                return Some(result);
            }
            let layout = display.layout();
            if layout.text.contains(column, row) {
                let (line, visual_col) = display.text_position_at(column, row);
                app.shell.set_caret_at(line, visual_col, event.shift);
                display.selecting = true;
                display.dirty = true;
            } else if layout.scrollbar_x == Some(column)
                && row >= layout.text.y
                && row < layout.text.y + layout.text.height
            {
                scroll_by_click(app, display, row - layout.text.y);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if display.selecting => {
            let (line, visual_col) = display.text_position_at(column, row);
            app.shell.set_caret_at(line, visual_col, true);
            display.dirty = true;
        }
        MouseEventKind::Up(_) => {
            display.selecting = false;
        }
        MouseEventKind::Moved if app.menu_bar.is_open() => {
            if let Some(item) = app.menu_bar.item_at(column, row) {
                if let Some(menu) = app.menu_bar.active() {
                    menu.selected = Some(item);
                }
                display.dirty = true;
            }
        }
        MouseEventKind::ScrollDown => {
            display.scroll_lines(WHEEL_LINES, app.shell.buffer().line_count());
        }
        MouseEventKind::ScrollUp => {
            display.scroll_lines(-WHEEL_LINES, app.shell.buffer().line_count());
        }
        _ => {}
    }
    None
}

/// Scroll for a click `offset` rows below the top of the scrollbar
fn scroll_by_click(app: &EditorApp, display: &mut Display, offset: usize) {
    let height = display.text_rows();
    let line_count = app.shell.buffer().line_count();
    let page = height.max(1) as isize;
    let delta = match scrollbar::hit_test(offset, height, line_count, display.scroll_y) {
        Some(ScrollbarHit::LineUp) => -1,
        Some(ScrollbarHit::LineDown) => 1,
        Some(ScrollbarHit::PageUp) => -page,
        Some(ScrollbarHit::PageDown) => page,
        Some(ScrollbarHit::Thumb) | None => 0,
    };
    if delta != 0 {
        display.scroll_lines(delta, line_count);
    }
}

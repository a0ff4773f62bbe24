use crate::config::Config;
use crate::core::app::{EditorApp, Modal};
use crate::core::shell::EditorShell;
use crate::core::utf8;
use crate::terminal::layout::ScreenLayout;
use crate::terminal::renderers::{DialogRenderer, MenuRenderer, StatusRenderer, TextRenderer};
use crate::terminal::scrollbar;
use crate::terminal::theme::{Theme, ThemeManager};

pub use crate::terminal::color::Color;

/// Represents a single cell on the terminal screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    /// If true, this cell is covered by the previous wide character and should be skipped
    pub hidden: bool,
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self {
            ch,
            fg,
            bg,
            hidden: false,
        }
    }

    pub fn hidden() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
            hidden: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
            hidden: false,
        }
    }
}

/// Represents the state of the entire screen
#[derive(Clone, Debug)]
pub struct ScreenBuffer {
    pub cells: Vec<Cell>,
    pub width: u16,
    pub height: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::empty(); (width as usize) * (height as usize)];
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::empty();
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            self.cells[idx] = cell;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            Some(&self.cells[idx])
        } else {
            None
        }
    }

    /// Write a string left to right, clipped at `max_x`. Returns the next column.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, max_x: usize, fg: Color, bg: Color) -> usize {
        let mut col = x;
        for ch in text.chars() {
            let w = utf8::char_width(ch).max(1);
            if col + w > max_x {
                break;
            }
            self.set(col as u16, y as u16, Cell::new(ch, fg, bg));
            for extra in 1..w {
                self.set((col + extra) as u16, y as u16, Cell::hidden());
            }
            col += w;
        }
        col
    }

    /// Fill `width` cells of row `y` starting at `x`
    pub fn fill(&mut self, x: usize, y: usize, width: usize, ch: char, fg: Color, bg: Color) {
        for col in x..x + width {
            self.set(col as u16, y as u16, Cell::new(ch, fg, bg));
        }
    }

    /// Visible text of a row, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.hidden)
            .map(|c| c.ch)
            .collect()
    }
}

/// Manages the terminal display and rendering
pub struct Display {
    /// Terminal dimensions (cols, rows)
    pub terminal_size: (u16, u16),
    /// Whether the screen must be rebuilt
    pub dirty: bool,
    /// Whether a full screen clear is needed (e.g. after resize)
    pub needs_full_redraw: bool,
    /// Front buffer (currently displayed)
    pub front_buffer: ScreenBuffer,
    /// Back buffer (being drawn to)
    pub back_buffer: ScreenBuffer,
    pub theme: Theme,
    /// Emit 24-bit colors; otherwise fall back to the 16 ANSI colors
    pub truecolor: bool,
    pub show_status_line: bool,
    /// Where the terminal cursor goes after a frame, if shown
    pub cursor_pos: Option<(u16, u16)>,
    /// First visible line
    pub scroll_y: usize,
    /// First visible visual column
    pub scroll_x: usize,
    /// A left-button drag that started in the text area is in progress
    pub selecting: bool,
    /// Caret and buffer version seen by the last frame
    last_caret: Option<(usize, u64)>,
    /// Title most recently sent to the terminal
    current_title: Option<String>,
}

impl Display {
    pub fn new(width: u16, height: u16, config: &Config) -> Self {
        Self {
            terminal_size: (width, height),
            dirty: true,
            needs_full_redraw: true,
            front_buffer: ScreenBuffer::new(width, height),
            back_buffer: ScreenBuffer::new(width, height),
            theme: ThemeManager::new().resolve(config.theme()),
            truecolor: crate::terminal::color::detect_truecolor(),
            show_status_line: config.show_status_line(),
            cursor_pos: None,
            scroll_y: 0,
            scroll_x: 0,
            selecting: false,
            last_caret: None,
            current_title: None,
        }
    }

    /// Initialize the display with the current terminal size
    pub fn new_terminal(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(cols, rows, config))
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.terminal_size.0, self.terminal_size.1, self.show_status_line)
    }

    /// Number of visible text rows
    pub fn text_rows(&self) -> usize {
        self.layout().text.height
    }

    pub fn update_size(&mut self, cols: u16, rows: u16) {
        if cols == 0 || rows == 0 {
            return;
        }
        self.terminal_size = (cols, rows);
        // Fresh buffers avoid stale content; the full redraw repaints everything
        self.front_buffer = ScreenBuffer::new(cols, rows);
        self.back_buffer = ScreenBuffer::new(cols, rows);
        self.dirty = true;
        self.needs_full_redraw = true;
        // Re-center on the caret with the new geometry
        self.last_caret = None;
    }

    // ==================== Scrolling ====================

    /// Scroll so the caret is visible, but only when the caret or the text
    /// changed since the last frame. Wheel scrolling is kept otherwise.
    pub fn follow_caret(&mut self, shell: &EditorShell) {
        let key = (shell.caret(), shell.buffer().version);
        if self.last_caret != Some(key) {
            self.scroll_to_caret(shell);
            self.last_caret = Some(key);
        }
    }

    pub fn scroll_to_caret(&mut self, shell: &EditorShell) {
        let text = self.layout().text;
        let rows = text.height.max(1);
        let cols = text.width.max(1);

        let (line, col) = shell.caret_line_col();
        let line_text = shell.buffer().line_text(line);
        let vx = utf8::visual_col(&line_text, col, shell.tab_width());

        if line < self.scroll_y {
            self.scroll_y = line;
        } else if line >= self.scroll_y + rows {
            self.scroll_y = line + 1 - rows;
        }
        if vx < self.scroll_x {
            self.scroll_x = vx;
        } else if vx >= self.scroll_x + cols {
            self.scroll_x = vx + 1 - cols;
        }
    }

    /// Scroll by whole lines without moving the caret
    pub fn scroll_lines(&mut self, delta: isize, line_count: usize) {
        let max = line_count.saturating_sub(1);
        self.scroll_y = if delta < 0 {
            self.scroll_y.saturating_sub(delta.unsigned_abs())
        } else {
            (self.scroll_y + delta as usize).min(max)
        };
        self.dirty = true;
    }

    /// Buffer line and visual column under a screen cell, clamped to the
    /// text area so drags past its edges still select
    pub fn text_position_at(&self, column: usize, row: usize) -> (usize, usize) {
        let text = self.layout().text;
        let rel_y = row.saturating_sub(text.y).min(text.height.saturating_sub(1));
        let rel_x = column.saturating_sub(text.x).min(text.width);
        (self.scroll_y + rel_y, self.scroll_x + rel_x)
    }

    // ==================== Title ====================

    /// The new window title, if it differs from the last one sent
    pub fn title_change(&mut self, title: &str) -> Option<String> {
        if self.current_title.as_deref() == Some(title) {
            return None;
        }
        self.current_title = Some(title.to_string());
        Some(title.to_string())
    }

    // ==================== Rendering ====================

    /// Draw the whole editor into the back buffer
    pub fn render(&mut self, app: &EditorApp) {
        if !self.dirty {
            return;
        }
        self.follow_caret(&app.shell);

        let layout = self.layout();
        let theme = self.theme.clone();
        self.back_buffer.clear();

        // Text area and scrollbar
        self.cursor_pos = TextRenderer::render(
            &mut self.back_buffer,
            &app.shell,
            &layout.text,
            self.scroll_y,
            self.scroll_x,
            &theme,
        );
        if let Some(x) = layout.scrollbar_x {
            scrollbar::render_vertical(
                &mut self.back_buffer,
                x,
                layout.text.y,
                layout.text.height,
                app.shell.buffer().line_count(),
                self.scroll_y,
                theme.scrollbar_track(),
                theme.scrollbar_thumb(),
                theme.bg(),
            );
        }

        if let Some(row) = layout.status_row {
            StatusRenderer::render(&mut self.back_buffer, &app.shell, row, layout.screen.width, &theme);
        }

        MenuRenderer::render(
            &mut self.back_buffer,
            &app.menu_bar,
            &theme,
            layout.screen.width,
            layout.screen.height,
        );
        if app.menu_bar.is_open() {
            self.cursor_pos = None;
        }

        match &app.modal {
            Some(Modal::File(dialog)) => {
                self.cursor_pos =
                    DialogRenderer::render_file_dialog(&mut self.back_buffer, dialog, &layout.screen, &theme);
            }
            Some(Modal::Message(message)) => {
                DialogRenderer::render_message_box(&mut self.back_buffer, message, &layout.screen, &theme);
                self.cursor_pos = None;
            }
            None => {}
        }
    }

    /// Make the back buffer current after it was written to the terminal
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        self.dirty = false;
        self.needs_full_redraw = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::LocalClipboard;
    use crate::core::command::EditorCommand;

    fn app_with(text: &str) -> EditorApp {
        let mut app = EditorApp::initialize_with_config(
            &Config::load(),
            &[],
            Box::new(LocalClipboard::new()),
        );
        app.shell.replace_selection(text);
        app
    }

    #[test]
    fn test_screen_buffer_put_str_clips() {
        let mut buf = ScreenBuffer::new(5, 1);
        let next = buf.put_str(1, 0, "hello", 5, Color::Reset, Color::Reset);
        assert_eq!(next, 5);
        assert_eq!(buf.row_text(0), " hell");
    }

    #[test]
    fn test_wide_chars_hide_following_cell() {
        let mut buf = ScreenBuffer::new(4, 1);
        buf.put_str(0, 0, "日x", 4, Color::Reset, Color::Reset);
        assert!(buf.get(1, 0).unwrap().hidden);
        assert_eq!(buf.row_text(0), "日x ");
    }

    #[test]
    fn test_render_frame_layout() {
        let app = app_with("hello");
        let mut display = Display::new(40, 10, &Config::load());
        display.render(&app);

        let bar = display.back_buffer.row_text(0);
        assert!(bar.starts_with("  File   Edit   About"), "menu bar: {:?}", bar);
        assert!(display.back_buffer.row_text(1).starts_with("hello"));
        let status = display.back_buffer.row_text(9);
        assert!(status.contains("Untitled"), "status: {:?}", status);
        assert!(status.contains("[+]"));
        assert_eq!(display.cursor_pos, Some((5, 1)));
    }

    #[test]
    fn test_follow_caret_scrolls_vertically() {
        let text: String = (0..50).map(|i| format!("line {}\n", i)).collect();
        let mut app = app_with(&text);
        let mut display = Display::new(40, 10, &Config::load());
        display.render(&app);
        // 8 text rows; caret sits on the empty last line (50)
        assert_eq!(display.scroll_y, 43);

        app.execute(EditorCommand::BufferStart, false);
        display.dirty = true;
        display.render(&app);
        assert_eq!(display.scroll_y, 0);
        assert_eq!(display.cursor_pos, Some((0, 1)));
    }

    #[test]
    fn test_wheel_scroll_is_kept_until_caret_moves() {
        let text: String = (0..50).map(|i| format!("{}\n", i)).collect();
        let mut app = app_with(&text);
        app.execute(EditorCommand::BufferStart, false);
        let mut display = Display::new(40, 10, &Config::load());
        display.render(&app);

        display.scroll_lines(10, app.shell.buffer().line_count());
        display.render(&app);
        assert_eq!(display.scroll_y, 10);
        assert_eq!(display.cursor_pos, None); // caret scrolled out of view

        app.execute(EditorCommand::NextLine, false);
        display.dirty = true;
        display.render(&app);
        assert_eq!(display.scroll_y, 1);
    }

    #[test]
    fn test_horizontal_scroll() {
        let app = app_with(&"x".repeat(100));
        let mut display = Display::new(40, 10, &Config::load());
        display.render(&app);
        // 39 text columns; the caret at column 100 is the last visible cell
        assert_eq!(display.scroll_x, 62);
        assert_eq!(display.cursor_pos, Some((38, 1)));
    }

    #[test]
    fn test_title_change_reports_once() {
        let mut display = Display::new(40, 10, &Config::load());
        assert_eq!(
            display.title_change("Untitled - SnakeEditor").as_deref(),
            Some("Untitled - SnakeEditor")
        );
        assert_eq!(display.title_change("Untitled - SnakeEditor"), None);
        assert!(display.title_change("/tmp/a.txt - SnakeEditor").is_some());
    }

    #[test]
    fn test_text_position_clamps_to_text_area() {
        let mut display = Display::new(40, 10, &Config::load());
        display.scroll_y = 3;
        assert_eq!(display.text_position_at(5, 2), (4, 5));
        assert_eq!(display.text_position_at(5, 0), (3, 5));
        assert_eq!(display.text_position_at(5, 50), (10, 5));
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut display = Display::new(40, 10, &Config::load());
        display.update_size(0, 10);
        assert_eq!(display.terminal_size, (40, 10));
        display.update_size(100, 30);
        assert_eq!(display.terminal_size, (100, 30));
        assert_eq!(display.back_buffer.width, 100);
        assert!(display.needs_full_redraw);
    }
}

use unicode_segmentation::UnicodeSegmentation;

use crate::core::shell::EditorShell;
use crate::core::utf8;
use crate::terminal::display::{Cell, ScreenBuffer};
use crate::terminal::layout::Rect;
use crate::terminal::theme::Theme;

/// Renders the text area
pub struct TextRenderer;

impl TextRenderer {
    /// Draw the visible part of the buffer into `rect`.
    ///
    /// Returns the screen position of the caret when it is in view.
    pub fn render(
        screen_buffer: &mut ScreenBuffer,
        shell: &EditorShell,
        rect: &Rect,
        scroll_y: usize,
        scroll_x: usize,
        theme: &Theme,
    ) -> Option<(u16, u16)> {
        let buffer = shell.buffer();
        let selection = shell.selection().range();
        let tab_width = shell.tab_width().max(1);
        let fg = theme.fg();
        let bg = theme.bg();
        let sel_fg = theme.selection_fg();
        let sel_bg = theme.selection_bg();

        for y in 0..rect.height {
            let screen_y = rect.y + y;
            screen_buffer.fill(rect.x, screen_y, rect.width, ' ', fg, bg);

            let line_idx = scroll_y + y;
            if line_idx >= buffer.line_count() {
                continue;
            }
            let line_start = buffer.line_to_char(line_idx);
            let line_text = buffer.line_text(line_idx);

            let mut vx = 0;
            let mut char_off = 0;
            for g in line_text.graphemes(true) {
                let width = if g == "\t" {
                    tab_width - vx % tab_width
                } else {
                    utf8::grapheme_width(g).max(1)
                };
                let selected = selection.contains(&(line_start + char_off));
                let (cfg, cbg) = if selected { (sel_fg, sel_bg) } else { (fg, bg) };

                // Only cells fully inside the viewport are drawn
                if vx >= scroll_x && vx - scroll_x + width <= rect.width {
                    let x = rect.x + vx - scroll_x;
                    let ch = match g.chars().next() {
                        Some('\t') | None => ' ',
                        Some(c) if c.is_control() => ' ',
                        Some(c) => c,
                    };
                    screen_buffer.set(x as u16, screen_y as u16, Cell::new(ch, cfg, cbg));
                    for extra in 1..width {
                        let cell = if g == "\t" {
                            Cell::new(' ', cfg, cbg)
                        } else {
                            Cell::hidden()
                        };
                        screen_buffer.set((x + extra) as u16, screen_y as u16, cell);
                    }
                }

                vx += width;
                char_off += g.chars().count();
                if vx >= scroll_x + rect.width {
                    break;
                }
            }

            // A selected line break shows as one highlighted cell
            let eol = line_start + line_text.chars().count();
            if line_idx + 1 < buffer.line_count() && selection.contains(&eol) {
                let eol_vx = utf8::visual_col(&line_text, line_text.chars().count(), tab_width);
                if eol_vx >= scroll_x && eol_vx - scroll_x < rect.width {
                    let x = rect.x + eol_vx - scroll_x;
                    screen_buffer.set(x as u16, screen_y as u16, Cell::new(' ', sel_fg, sel_bg));
                }
            }
        }

        let (line, col) = shell.caret_line_col();
        if line < scroll_y || line >= scroll_y + rect.height {
            return None;
        }
        let caret_vx = utf8::visual_col(&buffer.line_text(line), col, tab_width);
        if caret_vx < scroll_x || caret_vx >= scroll_x + rect.width {
            return None;
        }
        Some(((rect.x + caret_vx - scroll_x) as u16, (rect.y + line - scroll_y) as u16))
    }
}

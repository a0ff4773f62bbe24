//! Modal rendering: the file picker and message boxes, drawn centered over
//! the editor.

use crate::core::file_dialog::{DialogFocus, FileDialog};
use crate::core::message_box::MessageBox;
use crate::terminal::color::Color;
use crate::terminal::display::{Cell, ScreenBuffer};
use crate::terminal::layout::Rect;
use crate::terminal::theme::Theme;

const FILE_DIALOG_WIDTH: usize = 64;
const FILE_DIALOG_HEIGHT: usize = 20;
/// Rows of a file dialog that are not the entry list
const FILE_DIALOG_CHROME_ROWS: usize = 6;

const OK_BUTTON: &str = "[ OK ]";

/// Renders modal dialogs
pub struct DialogRenderer;

impl DialogRenderer {
    /// Draw the file picker. Returns the cursor position when the name field
    /// has focus.
    pub fn render_file_dialog(
        buffer: &mut ScreenBuffer,
        dialog: &FileDialog,
        screen: &Rect,
        theme: &Theme,
    ) -> Option<(u16, u16)> {
        let area = screen.centered(
            FILE_DIALOG_WIDTH.min(screen.width.saturating_sub(2)),
            FILE_DIALOG_HEIGHT.min(screen.height.saturating_sub(2)),
        );
        if area.width < 20 || area.height <= FILE_DIALOG_CHROME_ROWS {
            return None;
        }

        let fg = theme.dialog_fg();
        let bg = theme.dialog_bg();
        let sel_fg = theme.selection_fg();
        let sel_bg = theme.selection_bg();
        Self::draw_frame(buffer, &area, dialog.mode().title(), fg, bg);

        let left = area.x + 2;
        let right = area.x + area.width - 2;
        let mut y = area.y + 1;

        // Current directory, keeping the tail when it does not fit
        let label = "Look in: ";
        let room = right.saturating_sub(left + label.len());
        let dir = tail(&dialog.dir().display().to_string(), room);
        let next = buffer.put_str(left, y, label, right, theme.dim(), bg);
        buffer.put_str(next, y, &dir, right, fg, bg);
        y += 1;

        // Entry list
        let list_height = area.height - FILE_DIALOG_CHROME_ROWS;
        let entries = dialog.entries();
        let offset = if dialog.selected() >= list_height {
            dialog.selected() + 1 - list_height
        } else {
            0
        };
        let list_focused = dialog.focus() == DialogFocus::Entries;
        for row in 0..list_height {
            let Some(entry) = entries.get(offset + row) else {
                break;
            };
            let is_selected = offset + row == dialog.selected();
            let (efg, ebg) = match (is_selected, list_focused) {
                (true, true) => (sel_fg, sel_bg),
                (true, false) => (fg, theme.scrollbar_track()),
                _ => (fg, bg),
            };
            buffer.fill(left, y + row, right - left, ' ', efg, ebg);
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            buffer.put_str(left + 1, y + row, &name, right, efg, ebg);
        }
        y += list_height;

        // Name field
        let label = "File name: ";
        let field_x = buffer.put_str(left, y, label, right, theme.dim(), bg);
        let field_width = right.saturating_sub(field_x);
        let name = tail(dialog.filename(), field_width.saturating_sub(1));
        let field_bg = if dialog.focus() == DialogFocus::Name {
            theme.bg()
        } else {
            bg
        };
        buffer.fill(field_x, y, field_width, ' ', fg, field_bg);
        let name_end = buffer.put_str(field_x, y, &name, right, fg, field_bg);
        let cursor = (dialog.focus() == DialogFocus::Name).then_some((name_end as u16, y as u16));
        y += 1;

        // Filter selector
        let label = "Files of type: ";
        let next = buffer.put_str(left, y, label, right, theme.dim(), bg);
        let filter = format!("< {} >", dialog.filter().display());
        let (ffg, fbg) = if dialog.focus() == DialogFocus::Filter {
            (sel_fg, sel_bg)
        } else {
            (fg, bg)
        };
        buffer.put_str(next, y, &filter, right, ffg, fbg);
        y += 1;

        // Feedback or key help
        match dialog.error() {
            Some(error) => {
                buffer.put_str(left, y, error, right, theme.error(), bg);
            }
            None => {
                let help = "Enter: choose  Tab: next field  Esc: cancel";
                buffer.put_str(left, y, help, right, theme.dim(), bg);
            }
        }

        cursor
    }

    /// Draw a message box with its OK button
    pub fn render_message_box(buffer: &mut ScreenBuffer, message: &MessageBox, screen: &Rect, theme: &Theme) {
        let text_width = message.title.chars().count().max(message.message.chars().count());
        let area = screen.centered(text_width + 6, 6);
        if area.width < 4 || area.height < 3 {
            return;
        }
        let fg = theme.dialog_fg();
        let bg = theme.dialog_bg();
        Self::draw_frame(buffer, &area, message.title, fg, bg);

        let right = area.x + area.width - 1;
        let inner = area.width - 2;
        let msg_len = message.message.chars().count();
        let msg_x = area.x + 1 + inner.saturating_sub(msg_len) / 2;
        buffer.put_str(msg_x, area.y + 2, message.message, right, fg, bg);

        if area.height >= 6 {
            let ok_x = area.x + 1 + inner.saturating_sub(OK_BUTTON.len()) / 2;
            buffer.put_str(ok_x, area.y + 4, OK_BUTTON, right, theme.selection_fg(), theme.selection_bg());
        }
    }

    /// Box border with the title in the top edge, interior cleared
    fn draw_frame(buffer: &mut ScreenBuffer, area: &Rect, title: &str, fg: Color, bg: Color) {
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        for y in area.y..=bottom {
            buffer.fill(area.x, y, area.width, ' ', fg, bg);
            buffer.set(area.x as u16, y as u16, Cell::new('│', fg, bg));
            buffer.set(right as u16, y as u16, Cell::new('│', fg, bg));
        }
        buffer.fill(area.x, area.y, area.width, '─', fg, bg);
        buffer.fill(area.x, bottom, area.width, '─', fg, bg);
        buffer.set(area.x as u16, area.y as u16, Cell::new('┌', fg, bg));
        buffer.set(right as u16, area.y as u16, Cell::new('┐', fg, bg));
        buffer.set(area.x as u16, bottom as u16, Cell::new('└', fg, bg));
        buffer.set(right as u16, bottom as u16, Cell::new('┘', fg, bg));

        let title = format!(" {} ", title);
        buffer.put_str(area.x + 2, area.y, &title, right, fg, bg);
    }
}

/// The last `width` chars of `text`, prefixed with `…` when cut
fn tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let skip = len - width + 1;
    std::iter::once('…').chain(text.chars().skip(skip)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_dialog::DialogMode;
    use std::fs;

    fn screen_text(buffer: &ScreenBuffer) -> String {
        (0..buffer.height)
            .map(|y| buffer.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("abc", 5), "abc");
        assert_eq!(tail("abcdef", 4), "…def");
        assert_eq!(tail("abcdef", 0), "");
    }

    #[test]
    fn test_save_dialog_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "n").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        let dialog = FileDialog::new(DialogMode::Save, dir.path().to_path_buf());

        let mut buffer = ScreenBuffer::new(80, 24);
        let screen = Rect::new(0, 0, 80, 24);
        let cursor = DialogRenderer::render_file_dialog(&mut buffer, &dialog, &screen, &Theme::dark());
        let text = screen_text(&buffer);

        assert!(text.contains(" Save As "));
        assert!(text.contains("Look in:"));
        assert!(text.contains("src/"));
        assert!(text.contains("notes.txt"));
        assert!(text.contains("File name: Untitled.txt"));
        assert!(text.contains("Files of type: < All Files (*.*) >"));
        assert!(cursor.is_some());
    }

    #[test]
    fn test_dialog_skipped_on_tiny_screen() {
        let dir = tempfile::tempdir().unwrap();
        let dialog = FileDialog::new(DialogMode::Open, dir.path().to_path_buf());
        let mut buffer = ScreenBuffer::new(10, 5);
        let screen = Rect::new(0, 0, 10, 5);
        assert_eq!(
            DialogRenderer::render_file_dialog(&mut buffer, &dialog, &screen, &Theme::dark()),
            None
        );
    }

    #[test]
    fn test_message_box() {
        let mut buffer = ScreenBuffer::new(80, 24);
        let screen = Rect::new(0, 0, 80, 24);
        DialogRenderer::render_message_box(&mut buffer, &MessageBox::about(), &screen, &Theme::dark());
        let text = screen_text(&buffer);
        assert!(text.contains(" About SnakeEditor "));
        assert!(text.contains("A simple Python-made text editor."));
        assert!(text.contains("[ OK ]"));
    }
}

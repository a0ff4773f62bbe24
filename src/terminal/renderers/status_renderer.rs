use crate::core::shell::{EditorShell, UNTITLED};
use crate::terminal::display::ScreenBuffer;
use crate::terminal::theme::Theme;

/// Renders the status line
pub struct StatusRenderer;

impl StatusRenderer {
    /// Render the status line on row `y`
    pub fn render(screen_buffer: &mut ScreenBuffer, shell: &EditorShell, y: usize, width: usize, theme: &Theme) {
        let fg = theme.status_fg();
        let bg = theme.status_bg();

        let filename = shell
            .filename()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| UNTITLED.to_string());
        let modified = if shell.buffer().modified { " [+]" } else { "" };
        let (line, col) = shell.caret_line_col();

        let left = format!(" {}{} ", filename, modified);
        let middle = shell.message().map(|m| format!(" {} ", m)).unwrap_or_default();
        let right = format!(" Ln {}, Col {} ", line + 1, col + 1);

        screen_buffer.fill(0, y, width, ' ', fg, bg);
        let right_len = right.chars().count();
        let right_x = width.saturating_sub(right_len);

        let next = screen_buffer.put_str(0, y, &left, right_x, fg, bg);
        if !middle.is_empty() {
            screen_buffer.put_str(next, y, &middle, right_x, theme.error(), bg);
        }
        screen_buffer.put_str(right_x, y, &right, width, fg, bg);
    }
}

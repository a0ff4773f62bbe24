//! Menubar rendering for TUI mode: menu titles and the open dropdown.

use crate::core::menu::{MENU_BAR_HEIGHT_CELLS, MenuBar, MenuItem};
use crate::terminal::display::{Cell, ScreenBuffer};
use crate::terminal::theme::Theme;

/// Renders the menu bar
pub struct MenuRenderer;

impl MenuRenderer {
    /// Render the menu bar to a screen buffer
    pub fn render(buffer: &mut ScreenBuffer, menu_bar: &MenuBar, theme: &Theme, width: usize, height: usize) {
        if height == 0 {
            return;
        }
        let menu_fg = theme.menu_fg();
        let menu_bg = theme.menu_bg();
        let active_fg = theme.selection_fg();
        let active_bg = theme.selection_bg();

        // Draw menu bar background
        buffer.fill(0, 0, width, ' ', menu_fg, menu_bg);

        // Draw menu titles
        let layout = menu_bar.layout();
        for (i, (title, start, end)) in layout.iter().enumerate() {
            let is_active = menu_bar.active_menu == Some(i);
            let fg = if is_active { active_fg } else { menu_fg };
            let bg = if is_active { active_bg } else { menu_bg };

            let end = (*end).min(width);
            if *start >= end {
                break;
            }
            buffer.fill(*start, 0, end - start, ' ', fg, bg);
            buffer.put_str(start + 1, 0, title, end, fg, bg);
        }

        // Draw dropdown menu if open
        let Some(active_idx) = menu_bar.active_menu else {
            return;
        };
        let Some((_, start_x, _)) = layout.get(active_idx) else {
            return;
        };
        let menu = &menu_bar.menus[active_idx];
        let menu_width = menu.render_width();
        let right = (start_x + menu_width).min(width);
        if *start_x >= right {
            return;
        }

        for (item_idx, item) in menu.items.iter().enumerate() {
            let y = MENU_BAR_HEIGHT_CELLS + item_idx;
            if y >= height {
                break;
            }

            let is_selected = menu.selected == Some(item_idx);
            let fg = if is_selected { active_fg } else { menu_fg };
            let bg = if is_selected { active_bg } else { menu_bg };

            match item {
                MenuItem::Separator => {
                    buffer.fill(*start_x, y, right - start_x, '─', theme.dim(), menu_bg);
                }
                MenuItem::Action { label, hotkey, .. } => {
                    buffer.fill(*start_x, y, right - start_x, ' ', fg, bg);
                    buffer.put_str(start_x + 1, y, label, right, fg, bg);
                    if let Some(hk) = hotkey {
                        let hk_start = (start_x + menu_width).saturating_sub(hk.len() + 1);
                        buffer.put_str(hk_start, y, hk, right, fg, bg);
                    }
                }
            }
        }

        // Right edge shadow
        for row in MENU_BAR_HEIGHT_CELLS..(MENU_BAR_HEIGHT_CELLS + menu.items.len()).min(height) {
            if right < width {
                buffer.set(right as u16, row as u16, Cell::new(' ', menu_fg, theme.scrollbar_track()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_on_first_row() {
        let bar = MenuBar::new();
        let mut screen = ScreenBuffer::new(30, 5);
        MenuRenderer::render(&mut screen, &bar, &Theme::dark(), 30, 5);
        assert_eq!(screen.row_text(0).trim_end(), "  File   Edit   About");
        assert_eq!(screen.row_text(1).trim(), "");
    }

    #[test]
    fn test_open_dropdown_lists_items_with_hotkeys() {
        let mut bar = MenuBar::new();
        bar.open_menu(0);
        let theme = Theme::dark();
        let mut screen = ScreenBuffer::new(40, 10);
        MenuRenderer::render(&mut screen, &bar, &theme, 40, 10);

        let first = screen.row_text(1);
        assert!(first.contains("New File"), "{:?}", first);
        assert!(first.contains("Ctrl+N"), "{:?}", first);
        assert!(screen.row_text(4).contains("Ctrl+Shift+S"));
        assert!(screen.row_text(5).contains('─'));
        assert!(screen.row_text(6).contains("Exit"));
        // highlighted first item and title
        assert_eq!(screen.get(2, 1).unwrap().bg, theme.selection_bg());
        assert_eq!(screen.get(2, 0).unwrap().bg, theme.selection_bg());
        assert_eq!(screen.get(2, 2).unwrap().bg, theme.menu_bg());
    }
}

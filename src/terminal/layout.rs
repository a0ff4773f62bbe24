//! Screen geometry: where the menu bar, text area, scrollbar and status line
//! sit for a given terminal size.

use crate::core::menu::MENU_BAR_HEIGHT_CELLS;

/// A rectangle in screen cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// A `width` x `height` rectangle centered in this one, clamped to fit
    pub fn centered(&self, width: usize, height: usize) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

/// Regions of the editor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub screen: Rect,
    /// Text area, excluding the scrollbar column
    pub text: Rect,
    /// Column of the vertical scrollbar, if there is room for one
    pub scrollbar_x: Option<usize>,
    pub status_row: Option<usize>,
}

impl ScreenLayout {
    pub fn compute(cols: u16, rows: u16, show_status_line: bool) -> Self {
        let width = cols as usize;
        let height = rows as usize;
        let status_rows = usize::from(show_status_line && height > MENU_BAR_HEIGHT_CELLS + 1);
        let text_height = height.saturating_sub(MENU_BAR_HEIGHT_CELLS + status_rows);

        let (text_width, scrollbar_x) = if width >= 2 {
            (width - 1, Some(width - 1))
        } else {
            (width, None)
        };

        Self {
            screen: Rect::new(0, 0, width, height),
            text: Rect::new(0, MENU_BAR_HEIGHT_CELLS, text_width, text_height),
            scrollbar_x,
            status_row: if status_rows == 1 {
                Some(height - 1)
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let layout = ScreenLayout::compute(80, 24, true);
        assert_eq!(layout.text, Rect::new(0, 1, 79, 22));
        assert_eq!(layout.scrollbar_x, Some(79));
        assert_eq!(layout.status_row, Some(23));
    }

    #[test]
    fn test_without_status_line() {
        let layout = ScreenLayout::compute(80, 24, false);
        assert_eq!(layout.text.height, 23);
        assert_eq!(layout.status_row, None);
    }

    #[test]
    fn test_tiny_terminal() {
        let layout = ScreenLayout::compute(1, 1, true);
        assert_eq!(layout.text.height, 0);
        assert_eq!(layout.scrollbar_x, None);
        assert_eq!(layout.status_row, None);
    }

    #[test]
    fn test_centered() {
        let outer = Rect::new(0, 0, 80, 24);
        assert_eq!(outer.centered(40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(outer.centered(100, 30), outer);
        assert!(outer.contains(79, 23));
        assert!(!outer.contains(80, 0));
    }
}

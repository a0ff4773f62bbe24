//! Vertical scrollbar next to the text area.

use crate::terminal::color::Color;
use crate::terminal::display::{Cell, ScreenBuffer};

/// Scrollbar glyphs
#[derive(Clone, Copy, Debug)]
pub struct ScrollbarTheme {
    pub track: char,
    pub thumb: char,
    pub arrow_up: char,
    pub arrow_down: char,
}

impl ScrollbarTheme {
    pub const HEAVY: Self = Self {
        track: '┃',
        thumb: '█',
        arrow_up: '▲',
        arrow_down: '▼',
    };
}

/// Thumb position and size within the track.
///
/// Returns (thumb_start, thumb_size) for `visible` rows out of `total`,
/// scrolled to `scroll_offset`, on a track of `track_size` cells.
pub fn thumb_range(
    visible: usize,
    total: usize,
    scroll_offset: usize,
    track_size: usize,
) -> (usize, usize) {
    if total == 0 || track_size == 0 {
        return (0, track_size.max(1));
    }

    let min_thumb_size = 2;
    let thumb_size = if total <= visible {
        track_size
    } else {
        (visible * track_size / total)
            .max(min_thumb_size)
            .min(track_size)
    };

    let scrollable_range = total.saturating_sub(visible);
    let thumb_start = if scrollable_range == 0 {
        0
    } else {
        let available_track = track_size.saturating_sub(thumb_size);
        (scroll_offset * available_track / scrollable_range).min(available_track)
    };

    (thumb_start, thumb_size)
}

/// What a click on the scrollbar column means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarHit {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Thumb,
}

/// Classify a click `row` (relative to the top of the bar) on a bar `height`
/// rows tall
pub fn hit_test(
    row: usize,
    height: usize,
    line_count: usize,
    scroll_offset: usize,
) -> Option<ScrollbarHit> {
    if height < 4 || row >= height {
        return None;
    }
    if row == 0 {
        return Some(ScrollbarHit::LineUp);
    }
    if row == height - 1 {
        return Some(ScrollbarHit::LineDown);
    }
    let track_height = height - 2;
    let (start, size) = thumb_range(height, line_count.max(1), scroll_offset, track_height);
    let track_row = row - 1;
    Some(if track_row < start {
        ScrollbarHit::PageUp
    } else if track_row >= start + size {
        ScrollbarHit::PageDown
    } else {
        ScrollbarHit::Thumb
    })
}

/// Draw the bar in column `x` from row `y` for `height` rows
#[allow(clippy::too_many_arguments)]
pub fn render_vertical(
    buffer: &mut ScreenBuffer,
    x: usize,
    y: usize,
    height: usize,
    line_count: usize,
    scroll_offset: usize,
    track_fg: Color,
    thumb_fg: Color,
    track_bg: Color,
) {
    let theme = ScrollbarTheme::HEAVY;
    if height < 4 {
        for row in 0..height {
            buffer.set(x as u16, (y + row) as u16, Cell::new(theme.track, track_fg, track_bg));
        }
        return;
    }

    let track_height = height - 2;
    let (thumb_start, thumb_size) =
        thumb_range(height, line_count.max(1), scroll_offset, track_height);

    for row in 0..height {
        let (ch, fg) = if row == 0 {
            (theme.arrow_up, thumb_fg)
        } else if row == height - 1 {
            (theme.arrow_down, thumb_fg)
        } else {
            let track_y = row - 1;
            if track_y >= thumb_start && track_y < thumb_start + thumb_size {
                (theme.thumb, thumb_fg)
            } else {
                (theme.track, track_fg)
            }
        };
        buffer.set(x as u16, (y + row) as u16, Cell::new(ch, fg, track_bg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumb_fills_track_when_everything_fits() {
        assert_eq!(thumb_range(20, 10, 0, 18), (0, 18));
    }

    #[test]
    fn test_thumb_moves_with_scroll() {
        let (start_top, size) = thumb_range(10, 100, 0, 10);
        assert_eq!((start_top, size), (0, 2));
        let (start_bottom, _) = thumb_range(10, 100, 90, 10);
        assert_eq!(start_bottom, 8);
        let (start_mid, _) = thumb_range(10, 100, 45, 10);
        assert_eq!(start_mid, 4);
    }

    #[test]
    fn test_hit_test() {
        assert_eq!(hit_test(0, 10, 100, 0), Some(ScrollbarHit::LineUp));
        assert_eq!(hit_test(9, 10, 100, 0), Some(ScrollbarHit::LineDown));
        assert_eq!(hit_test(1, 10, 100, 0), Some(ScrollbarHit::Thumb));
        assert_eq!(hit_test(5, 10, 100, 0), Some(ScrollbarHit::PageDown));
        assert_eq!(hit_test(1, 10, 100, 90), Some(ScrollbarHit::PageUp));
        assert_eq!(hit_test(1, 3, 100, 0), None);
    }
}

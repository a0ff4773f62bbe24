//! Grapheme and display-width helpers for caret movement and rendering.

use unicode_segmentation::UnicodeSegmentation;

/// Get the display width of a single character (for monospace terminal display)
/// Returns 0 for control characters, 1 for ASCII, 2 for wide CJK characters, etc.
pub fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Get the display width of a grapheme cluster (sum of all character widths)
pub fn grapheme_width(g: &str) -> usize {
    g.chars().map(char_width).sum()
}

/// Char offsets of grapheme boundaries in `text`, including 0 and the end
pub fn grapheme_boundaries(text: &str) -> Vec<usize> {
    let mut bounds = vec![0];
    let mut chars = 0;
    for g in text.graphemes(true) {
        chars += g.chars().count();
        bounds.push(chars);
    }
    bounds
}

/// Char offset of the grapheme boundary before `char_col`
pub fn prev_boundary(text: &str, char_col: usize) -> usize {
    grapheme_boundaries(text)
        .into_iter()
        .rev()
        .find(|&b| b < char_col)
        .unwrap_or(0)
}

/// Char offset of the grapheme boundary after `char_col`
pub fn next_boundary(text: &str, char_col: usize) -> usize {
    let bounds = grapheme_boundaries(text);
    let last = bounds.last().copied().unwrap_or(0);
    bounds.into_iter().find(|&b| b > char_col).unwrap_or(last)
}

/// Visual width of the first `char_col` chars of `text`, expanding tabs
pub fn visual_col(text: &str, char_col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_x = 0;
    for c in text.chars().take(char_col) {
        if c == '\t' {
            visual_x = (visual_x / tab_width + 1) * tab_width;
        } else {
            visual_x += char_width(c);
        }
    }
    visual_x
}

/// Char offset in `text` whose visual column is at or before `target_visual_x`.
/// This is the inverse of [`visual_col`], used for mouse clicks and Up/Down.
pub fn char_col_from_visual(text: &str, target_visual_x: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_x = 0;
    let bounds = grapheme_boundaries(text);
    for (i, g) in text.graphemes(true).enumerate() {
        let width = if g == "\t" {
            (visual_x / tab_width + 1) * tab_width - visual_x
        } else {
            grapheme_width(g)
        };
        if visual_x + width > target_visual_x {
            return bounds[i];
        }
        visual_x += width;
    }
    bounds.last().copied().unwrap_or(0)
}

//! Selection Model
//!
//! The caret and the selected range share one representation: an anchor
//! (where the selection started) and a cursor (the caret). When they are equal
//! nothing is selected. Positions are char indices into the buffer.

use std::cmp::{max, min};
use std::ops::Range;

/// A text selection in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Anchor position (where selection started)
    pub anchor: usize,
    /// Cursor position (the caret)
    pub cursor: usize,
}

impl Selection {
    /// Create a new selection at a single point (no selection)
    pub fn point(pos: usize) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
        }
    }

    /// Create a selection from anchor to cursor
    pub fn new(anchor: usize, cursor: usize) -> Self {
        Self { anchor, cursor }
    }

    /// Check if this is a point selection (no range)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }

    /// Get the start of the selection (smaller position)
    pub fn start(&self) -> usize {
        min(self.anchor, self.cursor)
    }

    /// Get the end of the selection (larger position)
    pub fn end(&self) -> usize {
        max(self.anchor, self.cursor)
    }

    /// Get the length of the selection
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// The selected range, start to end
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Check if a position is within the selection
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start() && pos < self.end()
    }

    /// Extend the selection to a new cursor position
    pub fn extend_to(&mut self, new_cursor: usize) {
        self.cursor = new_cursor;
    }

    /// Move the selection to a new position (collapses to point)
    pub fn move_to(&mut self, pos: usize) {
        self.anchor = pos;
        self.cursor = pos;
    }

    /// Move the caret, extending the selection or collapsing it
    pub fn set_cursor(&mut self, pos: usize, extend: bool) {
        if extend {
            self.extend_to(pos);
        } else {
            self.move_to(pos);
        }
    }

    /// Clamp both ends to a buffer length
    pub fn clamp(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.cursor = self.cursor.min(len);
    }
}

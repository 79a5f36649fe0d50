//! Scrolling selection window over a sorted list.

use std::ops::Range;

/// Default number of rows shown for suggestions and problems
pub const VISIBLE_ROWS: usize = 8;

/// Selected index plus the first visible row of a fixed-height list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub selected: usize,
    pub offset: usize,
    rows: usize,
}

impl ListWindow {
    pub fn new(rows: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            rows: rows.max(1),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Select `index`, then scroll it into view
    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index;
        self.fix(len);
    }

    /// Move the selection down one row, wrapping to the top
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.select((self.selected + 1) % len, len);
    }

    /// Move the selection up one row, wrapping to the bottom
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.select((self.selected + len - 1) % len, len);
    }

    /// Keep the selection inside the visible band without running past either end
    pub fn fix(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.selected = self.selected.min(len - 1);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        if self.selected >= self.offset + self.rows {
            self.offset = self.selected + 1 - self.rows;
        }
        self.offset = self.offset.min(len.saturating_sub(self.rows));
    }

    /// Indices currently shown
    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.rows).min(len)
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::new(VISIBLE_ROWS)
    }
}

//! Cursor and scroll bookkeeping for the picker's terminal view.
//!
//! A touch screen taps layouts directly; a terminal needs a cursor. This
//! module tracks which layout row and which category chip the keyboard is
//! on, and the first list row shown in the viewport. It knows nothing about
//! the catalog: callers pass lengths and row positions.

/// Keyboard navigation state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Index of the focused layout among the visible layouts.
    pub cursor: usize,

    /// Index of the focused category chip.
    pub category_cursor: usize,

    /// First list row (section headers and layouts) in the viewport.
    pub scroll_top: usize,

    /// Number of list rows the last render could show. Zero until the first
    /// resize, in which case no scroll adjustment is made.
    pub viewport_rows: usize,
}

impl Navigation {
    /// Moves the layout cursor down, wrapping to the top.
    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the layout cursor up, wrapping to the bottom.
    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    pub fn next_category(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.category_cursor = (self.category_cursor + 1) % len;
    }

    pub fn prev_category(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.category_cursor = if self.category_cursor == 0 {
            len - 1
        } else {
            self.category_cursor - 1
        };
    }

    /// Keeps cursors inside lists of the given lengths.
    pub fn clamp(&mut self, layouts: usize, categories: usize) {
        self.cursor = self.cursor.min(layouts.saturating_sub(1));
        self.category_cursor = self.category_cursor.min(categories.saturating_sub(1));
    }

    /// Scrolls by `delta` rows within a list of `total_rows`.
    ///
    /// Returns `true` if `scroll_top` changed.
    pub fn scroll_by(&mut self, delta: isize, total_rows: usize) -> bool {
        let max_top = total_rows.saturating_sub(1);
        let next = if delta.is_negative() {
            self.scroll_top.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_top.saturating_add(delta.unsigned_abs()).min(max_top)
        };
        let changed = next != self.scroll_top;
        self.scroll_top = next;
        changed
    }

    /// Adjusts `scroll_top` so `row` is inside the viewport.
    ///
    /// Returns `true` if `scroll_top` changed.
    pub fn ensure_visible(&mut self, row: usize) -> bool {
        if self.viewport_rows == 0 {
            return false;
        }
        let previous = self.scroll_top;
        if row < self.scroll_top {
            self.scroll_top = row;
        } else if row >= self.scroll_top + self.viewport_rows {
            self.scroll_top = row + 1 - self.viewport_rows;
        }
        previous != self.scroll_top
    }

    pub fn reset(&mut self) {
        let viewport_rows = self.viewport_rows;
        *self = Self {
            viewport_rows,
            ..Self::default()
        };
    }
}

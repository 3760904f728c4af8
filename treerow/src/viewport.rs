//! Scroll window of a virtualized grid over the index rows.
//!
//! A grid only ever materializes the rows inside its viewport. [`Viewport`]
//! tracks that window and keeps its row count in step with the index purely
//! from [`RowsChanged`] notifications, so the grid never has to recount.

use std::ops::Range;

use crate::index::{RowsChanged, TreeListener};
use crate::store::ChangeKind;

/// The visible window of a virtualized grid.
///
/// ```
/// use treerow::{RowsChanged, Viewport};
///
/// let mut viewport = Viewport::new(10);
/// viewport.apply(RowsChanged::reset(100));
/// viewport.scroll_to(42);
/// assert_eq!(viewport.range(), 33..43);
///
/// // Rows inserted above the window push it down with its content.
/// viewport.apply(RowsChanged::insert(5, 3));
/// assert_eq!(viewport.range(), 36..46);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First displayed row.
    offset: usize,
    /// Number of rows the grid can display.
    height: usize,
    /// Total row count, as last announced.
    rows: usize,
}

impl Viewport {
    /// Create an empty viewport showing `height` rows.
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height,
            rows: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total row count the viewport knows about.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Set the row count directly (when attaching to an index that already
    /// has rows).
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
        self.clamp();
    }

    /// Set the viewport height (called when the grid is resized).
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.clamp();
    }

    pub fn max_offset(&self) -> usize {
        self.rows.saturating_sub(self.height)
    }

    /// Rows to materialize.
    pub fn range(&self) -> Range<usize> {
        if self.rows == 0 || self.height == 0 {
            return 0..0;
        }
        let end = (self.offset + self.height).min(self.rows);
        self.offset..end
    }

    pub fn contains(&self, row: usize) -> bool {
        self.range().contains(&row)
    }

    /// Scroll the least amount that brings `row` into view.
    pub fn scroll_to(&mut self, row: usize) {
        if row >= self.rows || self.height == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.height {
            self.offset = row + 1 - self.height;
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Follow a change of the rows.
    ///
    /// Rows inserted or removed strictly above the window shift it so that
    /// the same content stays on screen; a reset scrolls back to the top.
    pub fn apply(&mut self, change: RowsChanged) {
        self.rows = change.apply_to_count(self.rows);
        match change.kind {
            ChangeKind::Insert => {
                if change.start_row < self.offset {
                    self.offset += change.count;
                }
            }
            ChangeKind::Remove => {
                if change.start_row < self.offset {
                    self.offset -= change.count.min(self.offset - change.start_row);
                }
            }
            ChangeKind::Reset => self.offset = 0,
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

impl<I> TreeListener<I> for Viewport {
    fn on_rows_changed(&mut self, change: RowsChanged) {
        self.apply(change);
    }
}

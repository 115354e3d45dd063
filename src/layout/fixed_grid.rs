//! Fixed-size virtualized grid.
//!
//! This is the single-axis virtualization primitive each pane wraps: given
//! counts, uniform cell sizes, the pane's own size and a scroll offset it
//! decides which cells intersect the window (plus overscan) and where they
//! land. It is also the only place that bounds scroll offsets.

use serde::{Deserialize, Serialize};

use super::{ScrollState, VisibleRange};

/// Rectangle of a cell relative to the pane's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A virtualized grid of uniformly sized cells
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSizeGrid {
    pub row_count: u32,
    pub column_count: u32,
    pub row_height: f32,
    pub column_width: f32,
    /// Pane width in pixels
    pub width: f32,
    /// Pane height in pixels
    pub height: f32,
    pub overscan_rows: u32,
    pub overscan_cols: u32,
}

impl FixedSizeGrid {
    /// Total width of the grid content
    #[allow(clippy::cast_precision_loss)]
    pub fn total_width(&self) -> f32 {
        self.column_count as f32 * self.column_width
    }

    /// Total height of the grid content
    #[allow(clippy::cast_precision_loss)]
    pub fn total_height(&self) -> f32 {
        self.row_count as f32 * self.row_height
    }

    /// Largest valid vertical offset
    pub fn max_scroll_top(&self) -> f32 {
        (self.total_height() - self.height).max(0.0)
    }

    /// Largest valid horizontal offset
    pub fn max_scroll_left(&self) -> f32 {
        (self.total_width() - self.width).max(0.0)
    }

    /// Clamp a scroll position to `[0, max]` on both axes. NaN becomes 0.
    pub fn clamp_scroll(&self, scroll: ScrollState) -> ScrollState {
        ScrollState {
            top: clamp_offset(scroll.top, self.max_scroll_top()),
            left: clamp_offset(scroll.left, self.max_scroll_left()),
        }
    }

    /// Half-open row window (overscan included) for a vertical offset
    pub fn visible_rows(&self, scroll_top: f32) -> (u32, u32) {
        let top = clamp_offset(scroll_top, self.max_scroll_top());
        window(
            top,
            self.height,
            self.row_height,
            self.row_count,
            self.overscan_rows,
        )
    }

    /// Half-open column window (overscan included) for a horizontal offset
    pub fn visible_cols(&self, scroll_left: f32) -> (u32, u32) {
        let left = clamp_offset(scroll_left, self.max_scroll_left());
        window(
            left,
            self.width,
            self.column_width,
            self.column_count,
            self.overscan_cols,
        )
    }

    /// Both windows at once
    pub fn visible_range(&self, scroll: ScrollState) -> VisibleRange {
        let (row_start, row_end) = self.visible_rows(scroll.top);
        let (col_start, col_end) = self.visible_cols(scroll.left);
        VisibleRange {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Topmost row lying entirely inside the pane at `scroll_top`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn first_fully_visible_row(&self, scroll_top: f32) -> Option<u32> {
        let top = clamp_offset(scroll_top, self.max_scroll_top());
        let row = (top / self.row_height).ceil() as u32;
        self.is_row_fully_visible(row, top).then_some(row)
    }

    /// True if both edges of `row` fall within `[0, height]` after scrolling
    #[allow(clippy::cast_precision_loss)]
    pub fn is_row_fully_visible(&self, row: u32, scroll_top: f32) -> bool {
        if row >= self.row_count {
            return false;
        }
        let top = clamp_offset(scroll_top, self.max_scroll_top());
        let y = row as f32 * self.row_height - top;
        y >= 0.0 && y + self.row_height <= self.height
    }

    /// Position of a cell relative to the pane, after scrolling
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_rect(&self, row: u32, col: u32, scroll: ScrollState) -> CellRect {
        let scroll = self.clamp_scroll(scroll);
        CellRect {
            x: col as f32 * self.column_width - scroll.left,
            y: row as f32 * self.row_height - scroll.top,
            width: self.column_width,
            height: self.row_height,
        }
    }
}

fn clamp_offset(offset: f32, max: f32) -> f32 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max)
}

/// Indices of the cells intersecting `[offset, offset + extent)`, widened
/// by `overscan` on each side.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn window(offset: f32, extent: f32, size: f32, count: u32, overscan: u32) -> (u32, u32) {
    if count == 0 || extent <= 0.0 || size <= 0.0 {
        return (0, 0);
    }
    let start = ((offset / size).floor() as u32).min(count - 1);
    let end = (((offset + extent) / size).ceil() as u32).clamp(start + 1, count);
    (
        start.saturating_sub(overscan),
        end.saturating_add(overscan).min(count),
    )
}

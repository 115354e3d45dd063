//! Viewport and scroll state records.
//!
//! [`ViewportState`] is written only by the viewport tracker and
//! [`ScrollState`] only by the scroll coordinator; every other component
//! reads copies. [`VisibleRange`] is derived per render and never stored.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// Measured size of the host container in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl ViewportState {
    /// Create a viewport state. Negative or non-finite sizes collapse to 0.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Pixel offsets of a pane's scrollable content
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub top: f32,
    pub left: f32,
}

impl ScrollState {
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

/// Half-open range of pane-local rows and columns to materialize,
/// overscan included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    pub row_start: u32,
    pub row_end: u32,
    pub col_start: u32,
    pub col_end: u32,
}

impl VisibleRange {
    /// True if the range contains no cell
    pub fn is_empty(&self) -> bool {
        self.row_start >= self.row_end || self.col_start >= self.col_end
    }

    pub fn row_count(&self) -> u32 {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn col_count(&self) -> u32 {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Number of cells in the range
    pub fn cell_count(&self) -> usize {
        usize::try_from(u64::from(self.row_count()) * u64::from(self.col_count()))
            .unwrap_or(usize::MAX)
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.row_start..self.row_end).contains(&row) && (self.col_start..self.col_end).contains(&col)
    }

    /// Iterate `(row, col)` pairs in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let (col_start, col_end) = (self.col_start, self.col_end);
        (self.row_start..self.row_end)
            .flat_map(move |row| (col_start..col_end).map(move |col| (row, col)))
    }
}

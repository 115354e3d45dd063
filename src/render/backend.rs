//! Render backend trait and the frame data handed to it.
//!
//! A [`GridFrame`] is everything a backend needs to paint one update: the
//! pane rectangles, each pane's offset and visible range, and the
//! materialized cells with their text and pixel rects. Backends (text,
//! Canvas 2D) only draw; they never compute ranges or touch scroll state.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{
    CellAddress, CellRect, Composition, PaneKind, PaneRect, ScrollState, ViewportState,
    VisibleRange,
};

/// Visual class of a cell, mirroring the component's CSS classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellClass {
    pub header: bool,
    pub pane: PaneKind,
}

impl CellClass {
    /// CSS class list, e.g. `"header-cell frozen-left"`
    pub fn class_name(&self) -> &'static str {
        match (self.header, self.pane) {
            (true, PaneKind::Main) => "header-cell",
            (true, PaneKind::LeftFrozen) => "header-cell frozen-left",
            (true, PaneKind::RightFrozen) => "header-cell frozen-right",
            (false, PaneKind::Main) => "cell",
            (false, PaneKind::LeftFrozen) => "cell frozen-left",
            (false, PaneKind::RightFrozen) => "cell frozen-right",
        }
    }
}

/// One materialized cell of a pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedCell {
    pub local_row: u32,
    pub local_col: u32,
    pub address: CellAddress,
    pub text: String,
    pub class: CellClass,
    /// Position relative to the pane's top-left corner, after scrolling
    pub rect: CellRect,
}

/// Everything materialized for one pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneFrame {
    pub kind: PaneKind,
    pub rect: PaneRect,
    pub offset: ScrollState,
    pub range: VisibleRange,
    /// Topmost fully visible data row, if any
    pub first_data_row: Option<u32>,
    pub cells: Vec<RenderedCell>,
}

impl PaneFrame {
    /// Cells that intersect the pane's rect (overscan excluded)
    pub fn visible_cells(&self) -> impl Iterator<Item = &RenderedCell> {
        let (width, height) = (self.rect.width, self.rect.height);
        self.cells.iter().filter(move |c| {
            c.rect.x + c.rect.width > 0.0
                && c.rect.x < width
                && c.rect.y + c.rect.height > 0.0
                && c.rect.y < height
        })
    }

    /// Header cells in column order
    pub fn headers(&self) -> impl Iterator<Item = &RenderedCell> {
        self.cells.iter().filter(|c| c.class.header)
    }
}

/// One full update of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFrame {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
    pub composition: Composition,
    /// Panes in paint order: main, left, right
    pub panes: Vec<PaneFrame>,
}

impl GridFrame {
    pub fn pane(&self, kind: PaneKind) -> Option<&PaneFrame> {
        self.panes.iter().find(|p| p.kind == kind)
    }

    /// Total number of materialized cells
    pub fn cell_count(&self) -> usize {
        self.panes.iter().map(|p| p.cells.len()).sum()
    }
}

/// Trait for render backends
///
/// Implementations handle the actual drawing for a rendering technology
/// (plain text, Canvas 2D).
pub trait RenderBackend {
    /// Initialize the backend
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Resize the render surface
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Draw a frame
    fn render(&mut self, frame: &GridFrame) -> Result<()>;

    /// Get the current width
    fn width(&self) -> u32;

    /// Get the current height
    fn height(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_match_component_css() {
        let class = CellClass {
            header: true,
            pane: PaneKind::Main,
        };
        assert_eq!(class.class_name(), "header-cell");
        let class = CellClass {
            header: false,
            pane: PaneKind::RightFrozen,
        };
        assert_eq!(class.class_name(), "cell frozen-right");
    }
}

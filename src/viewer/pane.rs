//! Pane renderer, parameterized by [`PaneKind`].
//!
//! Each pane wraps a [`FixedSizeGrid`] over its own column subset. The three
//! panes share one code path; only the column count, width, overscan and the
//! column offset of the cell address differ.

use crate::config::GridConfig;
use crate::layout::{
    CellAddress, FixedSizeGrid, GridGeometry, LogicalRow, PaneKind, ScrollState, ViewportState,
    VisibleRange,
};
use crate::render::{CellClass, RenderedCell};
use crate::source::DataSource;

/// A pane sized for one viewport
#[derive(Debug, Clone)]
pub struct Pane<'g> {
    kind: PaneKind,
    geometry: &'g GridGeometry,
    grid: FixedSizeGrid,
}

impl<'g> Pane<'g> {
    pub fn new(kind: PaneKind, geometry: &'g GridGeometry, viewport: ViewportState) -> Self {
        let config: &GridConfig = geometry.config();
        let overscan = config.overscan();
        let (overscan_rows, overscan_cols) = match kind {
            PaneKind::Main => (overscan.main_rows, overscan.main_cols),
            // The frozen column window never moves
            PaneKind::LeftFrozen | PaneKind::RightFrozen => (overscan.frozen_rows, 0),
        };

        let grid = FixedSizeGrid {
            row_count: geometry.row_count_with_header(),
            column_count: geometry.pane_column_count(kind),
            row_height: config.row_height(),
            column_width: config.col_width(),
            width: geometry.pane_width(kind, viewport.width),
            height: viewport.height,
            overscan_rows,
            overscan_cols,
        };

        Self {
            kind,
            geometry,
            grid,
        }
    }

    pub fn kind(&self) -> PaneKind {
        self.kind
    }

    /// The virtualization primitive backing this pane
    pub fn grid(&self) -> &FixedSizeGrid {
        &self.grid
    }

    /// Local rows and columns to materialize at `offset`, overscan included
    pub fn visible_range(&self, offset: ScrollState) -> VisibleRange {
        self.grid.visible_range(offset)
    }

    /// Topmost fully visible data row (local row 0 is the header)
    pub fn first_visible_data_row(&self, offset: ScrollState) -> Option<u32> {
        self.grid
            .first_fully_visible_row(offset.top)
            .map(|row| row.max(1))
            .filter(|&row| self.grid.is_row_fully_visible(row, offset.top))
            .and_then(|row| LogicalRow::from_local(row).data_index())
    }

    /// Logical address of a pane-local cell
    pub fn address(&self, local_row: u32, local_col: u32) -> CellAddress {
        self.geometry.address(self.kind, local_row, local_col)
    }

    /// Content of one pane-local cell: a `Col N` header label on row 0,
    /// otherwise the data source's value.
    pub fn render_cell<S: DataSource + ?Sized>(
        &self,
        local_row: u32,
        local_col: u32,
        source: &S,
    ) -> String {
        let address = self.address(local_row, local_col);
        match address.row {
            LogicalRow::Header => header_label(address.col),
            LogicalRow::Data(row) => source.cell_value(row, address.col).into_owned(),
        }
    }

    /// Materialize every cell in the visible range at `offset`
    pub fn render<S: DataSource + ?Sized>(
        &self,
        offset: ScrollState,
        source: &S,
    ) -> Vec<RenderedCell> {
        let range = self.visible_range(offset);
        let mut cells = Vec::with_capacity(range.cell_count());
        for (local_row, local_col) in range.cells() {
            cells.push(RenderedCell {
                local_row,
                local_col,
                address: self.address(local_row, local_col),
                text: self.render_cell(local_row, local_col, source),
                class: CellClass {
                    header: local_row == 0,
                    pane: self.kind,
                },
                rect: self.grid.cell_rect(local_row, local_col, offset),
            });
        }
        cells
    }
}

/// Header label for a logical column: `Col 1`, `Col 2`, ...
pub fn header_label(logical_col: u32) -> String {
    format!("Col {}", u64::from(logical_col) + 1)
}

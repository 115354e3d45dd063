//! Pure geometry derived from a [`GridConfig`].
//!
//! Pane widths, column counts and the per-pane column translation live here.
//! Nothing in this module has side effects or failure modes: the config's
//! invariants are established when it is built.

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;

/// One of the three independently virtualized regions of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaneKind {
    /// Scrollable middle region
    Main,
    /// Leading frozen columns, pinned to the left edge
    LeftFrozen,
    /// Trailing frozen columns, pinned to the right edge
    RightFrozen,
}

impl PaneKind {
    /// All panes in paint order (main first, frozen panes on top)
    pub const ALL: [PaneKind; 3] = [PaneKind::Main, PaneKind::LeftFrozen, PaneKind::RightFrozen];

    pub fn is_frozen(self) -> bool {
        !matches!(self, PaneKind::Main)
    }
}

/// Logical row addressed by a pane-local row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "index")]
pub enum LogicalRow {
    /// Pane-local row 0
    Header,
    /// Data row, zero-based
    Data(u32),
}

impl LogicalRow {
    /// Map a pane-local row; row 0 is reserved for the header
    pub fn from_local(local_row: u32) -> Self {
        match local_row.checked_sub(1) {
            Some(row) => LogicalRow::Data(row),
            None => LogicalRow::Header,
        }
    }

    pub fn data_index(self) -> Option<u32> {
        match self {
            LogicalRow::Header => None,
            LogicalRow::Data(row) => Some(row),
        }
    }
}

/// Logical coordinate of a pane-local cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: LogicalRow,
    pub col: u32,
}

/// Grid geometry over a validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    config: GridConfig,
}

impl GridGeometry {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Width of one frozen pane: `frozen_count * col_width`
    pub fn frozen_pane_width(&self) -> f32 {
        cells_extent(self.config.frozen_count(), self.config.col_width())
    }

    /// Width left for the main pane, clamped to zero when the viewport is
    /// narrower than both frozen panes combined.
    pub fn main_pane_width(&self, viewport_width: f32) -> f32 {
        (viewport_width - 2.0 * self.frozen_pane_width()).max(0.0)
    }

    /// Number of scrollable (non-frozen) columns
    pub fn main_column_count(&self) -> u32 {
        self.config.col_count() - 2 * self.config.frozen_count()
    }

    /// Rows handed to the virtualization primitive: data rows plus the header
    pub fn row_count_with_header(&self) -> u32 {
        self.config.row_count() + 1
    }

    /// Number of columns a pane materializes
    pub fn pane_column_count(&self, kind: PaneKind) -> u32 {
        match kind {
            PaneKind::Main => self.main_column_count(),
            PaneKind::LeftFrozen | PaneKind::RightFrozen => self.config.frozen_count(),
        }
    }

    /// First logical column owned by a pane
    fn column_offset(&self, kind: PaneKind) -> u32 {
        match kind {
            PaneKind::Main => self.config.frozen_count(),
            PaneKind::LeftFrozen => 0,
            PaneKind::RightFrozen => self.config.col_count() - self.config.frozen_count(),
        }
    }

    /// Translate a pane-local column into a logical column
    pub fn logical_col(&self, kind: PaneKind, local_col: u32) -> u32 {
        self.column_offset(kind) + local_col
    }

    /// Map a pane-local `(row, col)` to its logical address
    pub fn address(&self, kind: PaneKind, local_row: u32, local_col: u32) -> CellAddress {
        CellAddress {
            row: LogicalRow::from_local(local_row),
            col: self.logical_col(kind, local_col),
        }
    }

    /// Translate a logical column into a pane-local column, if the pane owns it
    pub fn local_col(&self, kind: PaneKind, logical_col: u32) -> Option<u32> {
        let local = logical_col.checked_sub(self.column_offset(kind))?;
        (local < self.pane_column_count(kind)).then_some(local)
    }

    /// The pane that renders a logical column
    pub fn pane_for_column(&self, logical_col: u32) -> Option<PaneKind> {
        PaneKind::ALL
            .into_iter()
            .find(|&kind| self.local_col(kind, logical_col).is_some())
    }

    /// Rendered width of a pane for the given viewport width
    pub fn pane_width(&self, kind: PaneKind, viewport_width: f32) -> f32 {
        match kind {
            PaneKind::Main => self.main_pane_width(viewport_width),
            PaneKind::LeftFrozen | PaneKind::RightFrozen => self.frozen_pane_width(),
        }
    }

    /// Full scrollable width of a pane's content
    pub fn content_width(&self, kind: PaneKind) -> f32 {
        cells_extent(self.pane_column_count(kind), self.config.col_width())
    }

    /// Full scrollable height of every pane's content (header included)
    pub fn content_height(&self) -> f32 {
        cells_extent(self.row_count_with_header(), self.config.row_height())
    }
}

/// `count * size` in pixels
#[allow(clippy::cast_precision_loss)]
fn cells_extent(count: u32, size: f32) -> f32 {
    count as f32 * size
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn scenario() -> GridGeometry {
        GridGeometry::new(GridConfig::new(1000, 50, 2, 40.0, 120.0).unwrap())
    }

    #[test]
    fn test_pane_widths() {
        let geom = scenario();
        assert_eq!(geom.frozen_pane_width(), 240.0);
        assert_eq!(geom.main_pane_width(800.0), 320.0);
        assert_eq!(geom.main_pane_width(600.0), 120.0);
        assert_eq!(geom.main_pane_width(300.0), 0.0);
    }

    #[test]
    fn test_column_counts() {
        let geom = scenario();
        assert_eq!(geom.main_column_count(), 46);
        assert_eq!(geom.pane_column_count(PaneKind::LeftFrozen), 2);
        assert_eq!(geom.pane_column_count(PaneKind::RightFrozen), 2);
        assert_eq!(geom.row_count_with_header(), 1001);
    }

    #[test]
    fn test_column_translation() {
        let geom = scenario();
        assert_eq!(geom.logical_col(PaneKind::Main, 0), 2);
        assert_eq!(geom.logical_col(PaneKind::LeftFrozen, 1), 1);
        assert_eq!(geom.logical_col(PaneKind::RightFrozen, 0), 48);

        assert_eq!(geom.local_col(PaneKind::Main, 2), Some(0));
        assert_eq!(geom.local_col(PaneKind::Main, 48), None);
        assert_eq!(geom.local_col(PaneKind::RightFrozen, 49), Some(1));
        assert_eq!(geom.local_col(PaneKind::LeftFrozen, 2), None);
    }

    #[test]
    fn test_address_reserves_header_row() {
        let geom = scenario();
        let header = geom.address(PaneKind::Main, 0, 0);
        assert_eq!(header.row, LogicalRow::Header);
        assert_eq!(header.col, 2);

        let cell = geom.address(PaneKind::RightFrozen, 11, 1);
        assert_eq!(cell.row, LogicalRow::Data(10));
        assert_eq!(cell.col, 49);
        assert_eq!(cell.row.data_index(), Some(10));
    }

    #[test]
    fn test_every_column_has_exactly_one_pane() {
        let geom = scenario();
        for col in 0..50 {
            let owners = PaneKind::ALL
                .iter()
                .filter(|&&k| geom.local_col(k, col).is_some())
                .count();
            assert_eq!(owners, 1, "column {col}");
        }
        assert_eq!(geom.pane_for_column(0), Some(PaneKind::LeftFrozen));
        assert_eq!(geom.pane_for_column(25), Some(PaneKind::Main));
        assert_eq!(geom.pane_for_column(49), Some(PaneKind::RightFrozen));
        assert_eq!(geom.pane_for_column(50), None);
    }

    #[test]
    fn test_no_frozen_columns() {
        let geom = GridGeometry::new(GridConfig::new(5, 3, 0, 10.0, 10.0).unwrap());
        assert_eq!(geom.frozen_pane_width(), 0.0);
        assert_eq!(geom.main_column_count(), 3);
        assert_eq!(geom.pane_for_column(0), Some(PaneKind::Main));
        assert_eq!(geom.content_width(PaneKind::Main), 30.0);
        assert_eq!(geom.content_height(), 60.0);
    }
}

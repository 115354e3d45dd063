//! Common test utilities and assertion helpers.
//!
//! Provides a data source that records which coordinates the grid asked
//! for, mounting helpers, and proptest strategies for valid configs and
//! container sizes.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_lossless
)]

use std::borrow::Cow;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use proptest::prelude::*;

use frozengrid::{
    DataSource, FrozenGrid, GridConfig, GridFrame, ManualResizeHost, PaneKind, SyntheticSource,
    ViewportState,
};

// ============================================================================
// Recording data source
// ============================================================================

/// Synthetic source that remembers the largest coordinate requested
pub struct RecordingSource {
    inner: SyntheticSource,
    max_row: Cell<Option<u32>>,
    max_col: Cell<Option<u32>>,
    calls: Cell<usize>,
}

impl RecordingSource {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            inner: SyntheticSource::new(rows, cols),
            max_row: Cell::new(None),
            max_col: Cell::new(None),
            calls: Cell::new(0),
        }
    }

    pub fn max_row(&self) -> Option<u32> {
        self.max_row.get()
    }

    pub fn max_col(&self) -> Option<u32> {
        self.max_col.get()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DataSource for RecordingSource {
    fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    fn cell_value(&self, row: u32, col: u32) -> Cow<'_, str> {
        self.calls.set(self.calls.get() + 1);
        self.max_row
            .set(Some(self.max_row.get().map_or(row, |m| m.max(row))));
        self.max_col
            .set(Some(self.max_col.get().map_or(col, |m| m.max(col))));
        self.inner.cell_value(row, col)
    }
}

// ============================================================================
// Mounting helpers
// ============================================================================

/// Config used throughout the scenarios: 1000 x 50, 2 frozen, 40 x 120 px
#[must_use]
pub fn scenario_config() -> GridConfig {
    GridConfig::new(1000, 50, 2, 40.0, 120.0).expect("valid scenario config")
}

/// Mount a grid with a recording source over `config`
pub fn mount(
    config: GridConfig,
    width: f32,
    height: f32,
) -> (Rc<ManualResizeHost>, FrozenGrid<RecordingSource>) {
    let source = RecordingSource::new(config.row_count(), config.col_count());
    let host = Rc::new(ManualResizeHost::new(ViewportState::new(width, height)));
    let grid = FrozenGrid::mount(config, source, Rc::<ManualResizeHost>::clone(&host))
        .expect("mount should succeed");
    (host, grid)
}

/// Mount the scenario config at the given container size
pub fn mount_scenario(width: f32, height: f32) -> (Rc<ManualResizeHost>, FrozenGrid<RecordingSource>) {
    mount(scenario_config(), width, height)
}

// ============================================================================
// Frame inspection
// ============================================================================

/// Distinct logical columns materialized by a pane
pub fn logical_columns(frame: &GridFrame, kind: PaneKind) -> BTreeSet<u32> {
    frame
        .pane(kind)
        .expect("pane present")
        .cells
        .iter()
        .map(|c| c.address.col)
        .collect()
}

/// Header texts of a pane in column order
pub fn header_texts(frame: &GridFrame, kind: PaneKind) -> Vec<String> {
    frame
        .pane(kind)
        .expect("pane present")
        .headers()
        .map(|c| c.text.clone())
        .collect()
}

/// Topmost fully visible data row of a pane
pub fn first_data_row(frame: &GridFrame, kind: PaneKind) -> Option<u32> {
    frame.pane(kind).expect("pane present").first_data_row
}

// ============================================================================
// Strategies
// ============================================================================

/// A valid config with small dimensions: `frozen_count * 2 < col_count`
pub fn config_strategy() -> impl Strategy<Value = GridConfig> {
    (3u32..=62)
        .prop_flat_map(|cols| {
            (
                Just(cols),
                0..cols.div_ceil(2),
                0u32..3000,
                10u32..60,
                30u32..230,
            )
        })
        .prop_map(|(cols, frozen, rows, row_height, col_width)| {
            GridConfig::new(rows, cols, frozen, row_height as f32, col_width as f32)
                .expect("generated config is valid")
        })
}

/// A mounted grid's inputs: config, container size and scroll position as
/// fractions of the maximum offsets
#[derive(Debug, Clone)]
pub struct GridCase {
    pub config: GridConfig,
    pub width: f32,
    pub height: f32,
    pub top_frac: f32,
    pub left_frac: f32,
}

pub fn grid_case_strategy() -> impl Strategy<Value = GridCase> {
    (
        config_strategy(),
        0.0f32..2500.0,
        1.0f32..1500.0,
        0.0f32..=1.0,
        0.0f32..=1.0,
    )
        .prop_map(|(config, width, height, top_frac, left_frac)| GridCase {
            config,
            width,
            height,
            top_frac,
            left_frac,
        })
}

/// One step of a resize storm: new container size, then a scroll
pub fn resize_step_strategy() -> impl Strategy<Value = (f32, f32, f32, f32)> {
    (0.0f32..3000.0, 0.0f32..2000.0, 0.0f32..=1.0, 0.0f32..=1.0)
}

//! Layout engine for pane geometry, virtualization windows and composition.
//!
//! This module handles:
//! - Pane widths, column counts and column translation ([`GridGeometry`])
//! - Viewport/scroll state records and derived visible ranges
//! - The fixed-size virtualization primitive ([`FixedSizeGrid`])
//! - Placement of the three panes inside the container ([`compose`])

mod composition;
mod fixed_grid;
mod geometry;
mod viewport;

pub use composition::{compose, Composition, PaneRect};
pub use fixed_grid::{CellRect, FixedSizeGrid};
pub use geometry::{CellAddress, GridGeometry, LogicalRow, PaneKind};
pub use viewport::{ScrollState, ViewportState, VisibleRange};

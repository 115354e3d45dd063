//! The mounted grid: viewport tracking, scroll coordination and pane
//! rendering wired together.
//!
//! [`FrozenGrid`] owns one [`ViewportTracker`] and one [`ScrollCoordinator`]
//! and builds the three panes fresh for every frame from their current
//! state, so visible ranges are never cached and cannot drift.
//!
//! On wasm32, [`FrozenGridView`] exposes the same grid to JavaScript with a
//! Canvas 2D backend and a `ResizeObserver`-backed viewport.

mod pane;
mod resize;
mod scroll;
#[cfg(target_arch = "wasm32")]
mod web;

use std::rc::Rc;

use log::{debug, info, warn};

pub use pane::{header_label, Pane};
pub use resize::{ListenerId, ManualResizeHost, ResizeHost, ResizeListener, ViewportTracker};
pub use scroll::ScrollCoordinator;
#[cfg(target_arch = "wasm32")]
pub use web::{DomResizeHost, FrozenGridView};

use crate::config::GridConfig;
use crate::error::Result;
use crate::layout::{compose, Composition, GridGeometry, PaneKind, ScrollState, ViewportState};
use crate::render::{GridFrame, PaneFrame};
use crate::source::DataSource;

/// A mounted frozen-pane grid over a data source
pub struct FrozenGrid<S> {
    geometry: GridGeometry,
    tracker: ViewportTracker,
    coordinator: ScrollCoordinator,
    source: S,
    needs_render: bool,
}

impl<S: DataSource> FrozenGrid<S> {
    /// Mount a grid: measure the host, register for resizes, start at the
    /// unscrolled origin.
    ///
    /// # Errors
    /// Fails if the host cannot be measured or cannot deliver resize
    /// notifications.
    pub fn mount(config: GridConfig, source: S, host: Rc<dyn ResizeHost>) -> Result<Self> {
        let (rows, cols) = source.dimensions();
        if rows < config.row_count() || cols < config.col_count() {
            warn!(
                "data source is {rows}x{cols} but the grid declares {}x{}; missing cells are up to the source",
                config.row_count(),
                config.col_count()
            );
        }

        let tracker = ViewportTracker::mount(host)?;
        info!(
            "mounted grid: {} rows x {} cols, {} frozen each side",
            config.row_count(),
            config.col_count(),
            config.frozen_count()
        );

        Ok(Self {
            geometry: GridGeometry::new(config),
            tracker,
            coordinator: ScrollCoordinator::new(),
            source,
            needs_render: true,
        })
    }

    /// Release the resize listener and hand back the data source
    pub fn unmount(self) -> S {
        let Self { tracker, source, .. } = self;
        drop(tracker);
        source
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &GridConfig {
        self.geometry.config()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swap the data source; scroll and viewport are kept
    pub fn set_source(&mut self, source: S) {
        self.source = source;
        self.needs_render = true;
    }

    /// Latest measured viewport
    pub fn viewport(&self) -> ViewportState {
        self.tracker.current()
    }

    /// Authoritative scroll state
    pub fn scroll_state(&self) -> ScrollState {
        self.coordinator.state()
    }

    /// Pane placement for the current viewport
    pub fn composition(&self) -> Composition {
        compose(&self.geometry, self.viewport())
    }

    /// A pane sized for the current viewport
    pub fn pane(&self, kind: PaneKind) -> pane::Pane<'_> {
        pane::Pane::new(kind, &self.geometry, self.viewport())
    }

    /// Largest scroll offsets the main pane accepts
    pub fn max_scroll(&self) -> ScrollState {
        let main = self.pane(PaneKind::Main);
        ScrollState::new(main.grid().max_scroll_top(), main.grid().max_scroll_left())
    }

    /// Scroll notification from a pane's virtualization primitive.
    ///
    /// Only main-pane events are accepted, clamped to the main pane's
    /// content. Returns `true` if applied.
    pub fn on_scroll(&mut self, origin: PaneKind, scroll_top: f32, scroll_left: f32) -> bool {
        let clamped = self
            .pane(PaneKind::Main)
            .grid()
            .clamp_scroll(ScrollState::new(scroll_top, scroll_left));
        let applied = self.coordinator.on_scroll(origin, clamped.top, clamped.left);
        self.needs_render |= applied;
        applied
    }

    /// Scroll the main pane to an absolute position, clamped to its content
    pub fn scroll_to(&mut self, top: f32, left: f32) -> ScrollState {
        self.on_scroll(PaneKind::Main, top, left);
        self.scroll_state()
    }

    /// Scroll the main pane by a delta, clamped to its content
    pub fn scroll_by(&mut self, delta_top: f32, delta_left: f32) -> ScrollState {
        let current = self.scroll_state();
        self.scroll_to(current.top + delta_top, current.left + delta_left)
    }

    /// True if state changed since the last frame
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Pick up a pending resize. A larger viewport can shrink the scrollable
    /// extent, so the main pane re-reports its clamped offset.
    fn sync_viewport(&mut self) {
        if !self.tracker.take_changed() {
            return;
        }
        self.needs_render = true;
        let current = self.scroll_state();
        let clamped = self.pane(PaneKind::Main).grid().clamp_scroll(current);
        if clamped != current {
            debug!(
                "viewport change clamps scroll from ({}, {}) to ({}, {})",
                current.top, current.left, clamped.top, clamped.left
            );
            self.coordinator
                .on_scroll(PaneKind::Main, clamped.top, clamped.left);
        }
    }

    /// Materialize all three panes for the current state.
    ///
    /// Every pane reads the same scroll state in this call, so the frozen
    /// panes never lag the main pane.
    pub fn frame(&mut self) -> GridFrame {
        self.sync_viewport();

        let viewport = self.viewport();
        let composition = compose(&self.geometry, viewport);
        let panes = PaneKind::ALL
            .into_iter()
            .map(|kind| {
                let pane = pane::Pane::new(kind, &self.geometry, viewport);
                let offset = pane.grid().clamp_scroll(self.coordinator.offset_for(kind));
                let range = pane.visible_range(offset);
                debug!(
                    "{kind:?} pane: rows {}..{} cols {}..{}",
                    range.row_start, range.row_end, range.col_start, range.col_end
                );
                PaneFrame {
                    kind,
                    rect: composition.rect(kind),
                    offset,
                    range,
                    first_data_row: pane.first_visible_data_row(offset),
                    cells: pane.render(offset, &self.source),
                }
            })
            .collect();

        self.needs_render = false;
        GridFrame {
            viewport,
            scroll: self.scroll_state(),
            composition,
            panes,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::source::SyntheticSource;

    fn mount(host: &Rc<ManualResizeHost>) -> FrozenGrid<SyntheticSource> {
        FrozenGrid::mount(
            GridConfig::default(),
            SyntheticSource::new(1000, 50),
            Rc::<ManualResizeHost>::clone(host),
        )
        .unwrap()
    }

    #[test]
    fn test_mount_starts_unscrolled() {
        let host = Rc::new(ManualResizeHost::default());
        let grid = mount(&host);
        assert_eq!(grid.scroll_state(), ScrollState::default());
        assert!(grid.needs_render());
        assert_eq!(grid.viewport(), ViewportState::new(800.0, 400.0));
    }

    #[test]
    fn test_frame_clears_needs_render() {
        let host = Rc::new(ManualResizeHost::default());
        let mut grid = mount(&host);
        let frame = grid.frame();
        assert_eq!(frame.panes.len(), 3);
        assert!(!grid.needs_render());

        grid.scroll_by(40.0, 0.0);
        assert!(grid.needs_render());
        host.set_size(700.0, 400.0);
        grid.frame();
        assert!(!grid.needs_render());
    }

    #[test]
    fn test_scroll_to_clamps() {
        let host = Rc::new(ManualResizeHost::default());
        let mut grid = mount(&host);
        let applied = grid.scroll_to(1e9, -5.0);
        assert_eq!(applied, ScrollState::new(grid.max_scroll().top, 0.0));
        assert_eq!(grid.scroll_state().top, 1001.0 * 40.0 - 400.0);
    }

    #[test]
    fn test_growing_viewport_reclamps_scroll() {
        let host = Rc::new(ManualResizeHost::default());
        let mut grid = mount(&host);
        grid.scroll_to(0.0, 1e9);
        assert_eq!(grid.scroll_state().left, 46.0 * 120.0 - 320.0);

        host.set_size(1280.0, 400.0);
        let frame = grid.frame();
        assert_eq!(frame.scroll.left, 46.0 * 120.0 - 800.0);
    }

    #[test]
    fn test_unmount_releases_listener() {
        let host = Rc::new(ManualResizeHost::default());
        let grid = mount(&host);
        assert_eq!(host.listener_count(), 1);
        let source = grid.unmount();
        assert_eq!(source.dimensions(), (1000, 50));
        assert_eq!(host.listener_count(), 0);
    }
}

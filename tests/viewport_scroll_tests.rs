//! Tests for viewport tracking, scroll bounds and recomputation on resize.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

mod common;

use std::rc::Rc;

use common::{
    grid_case_strategy, mount, mount_scenario, resize_step_strategy, scenario_config,
    RecordingSource,
};
use frozengrid::viewer::{ListenerId, ResizeListener};
use frozengrid::{FrozenGrid, GridError, PaneKind, ResizeHost, ScrollState, ViewportState};
use proptest::prelude::*;
use test_case::test_case;

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_800_to_600_shrinks_main_pane() {
    let (host, mut grid) = mount_scenario(800.0, 400.0);
    let before = grid.frame();
    let main_before = before.pane(PaneKind::Main).unwrap();
    assert_eq!(main_before.rect.width, 320.0);
    assert_eq!(main_before.visible_cells().filter(|c| c.class.header).count(), 3);

    host.set_size(600.0, 400.0);
    let after = grid.frame();
    let main_after = after.pane(PaneKind::Main).unwrap();
    assert_eq!(after.viewport, ViewportState::new(600.0, 400.0));
    assert_eq!(main_after.rect.width, 600.0 - 2.0 * 2.0 * 120.0);
    assert_eq!(main_after.visible_cells().filter(|c| c.class.header).count(), 1);
    assert!(main_after.range.col_count() < main_before.range.col_count());
}

#[test_case(480.0 ; "exactly both frozen panes")]
#[test_case(300.0 ; "narrower than both frozen panes")]
#[test_case(0.0 ; "zero width")]
fn test_narrow_viewport_clamps_main_pane(width: f32) {
    let (host, mut grid) = mount_scenario(800.0, 400.0);
    host.set_size(width, 400.0);
    let frame = grid.frame();

    let main = frame.pane(PaneKind::Main).unwrap();
    assert_eq!(main.rect.width, 0.0);
    assert_eq!(main.visible_cells().count(), 0);
    // Frozen panes keep their width
    assert_eq!(frame.pane(PaneKind::LeftFrozen).unwrap().rect.width, 240.0);
}

#[test]
fn test_every_resize_is_applied() {
    let (host, mut grid) = mount_scenario(800.0, 400.0);
    for (w, h) in [(1024.0, 768.0), (500.0, 200.0), (801.0, 401.0)] {
        host.set_size(w, h);
        assert_eq!(grid.viewport(), ViewportState::new(w, h));
        assert_eq!(grid.frame().viewport, ViewportState::new(w, h));
    }
}

proptest! {
    #[test]
    fn test_resize_storm_keeps_scroll_in_bounds(
        steps in prop::collection::vec(resize_step_strategy(), 1..40)
    ) {
        let (host, mut grid) = mount_scenario(800.0, 400.0);
        for (width, height, top_frac, left_frac) in steps {
            host.set_size(width, height);
            let max = grid.max_scroll();
            grid.scroll_to(max.top * top_frac, max.left * left_frac);
            let frame = grid.frame();
            prop_assert_eq!(frame.viewport, ViewportState::new(width, height));
            prop_assert!(frame.scroll.top <= grid.max_scroll().top);
            prop_assert!(frame.scroll.left <= grid.max_scroll().left);
            prop_assert_eq!(frame.scroll, frame.pane(PaneKind::Main).unwrap().offset);
        }
    }
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_same_viewport_gives_same_ranges() {
    let (host, mut grid) = mount_scenario(800.0, 400.0);
    grid.on_scroll(PaneKind::Main, 1234.0, 567.0);

    host.set_size(1000.0, 500.0);
    let first = grid.frame();
    host.set_size(1000.0, 500.0);
    let second = grid.frame();
    let third = grid.frame();

    for kind in PaneKind::ALL {
        let a = first.pane(kind).unwrap().range;
        assert_eq!(second.pane(kind).unwrap().range, a);
        assert_eq!(third.pane(kind).unwrap().range, a);
    }
    assert_eq!(first, third);
}

// ============================================================================
// Scroll bounds
// ============================================================================

#[test]
fn test_initial_scroll_state_is_origin() {
    let (_host, mut grid) = mount_scenario(800.0, 400.0);
    assert_eq!(grid.scroll_state(), ScrollState::default());
    let frame = grid.frame();
    for kind in PaneKind::ALL {
        assert_eq!(frame.pane(kind).unwrap().offset, ScrollState::default());
    }
}

#[test]
fn test_max_scroll_never_requests_out_of_range() {
    let (_host, mut grid) = mount_scenario(800.0, 400.0);
    let max = grid.max_scroll();
    assert_eq!(max, ScrollState::new(1001.0 * 40.0 - 400.0, 46.0 * 120.0 - 320.0));

    grid.on_scroll(PaneKind::Main, max.top, max.left);
    grid.frame();
    assert_eq!(grid.source().max_row(), Some(999));
    assert_eq!(grid.source().max_col(), Some(49));
}

#[test]
fn test_overshooting_scroll_is_clamped() {
    let (_host, mut grid) = mount_scenario(800.0, 400.0);
    grid.on_scroll(PaneKind::Main, 1e9, 1e9);
    let frame = grid.frame();
    assert_eq!(frame.pane(PaneKind::Main).unwrap().offset, grid.max_scroll());
    assert!(grid.source().max_row().unwrap() < 1000);
    assert!(grid.source().max_col().unwrap() < 50);
}

#[test]
fn test_published_scroll_matches_main_offset() {
    let (_host, mut grid) = mount_scenario(800.0, 400.0);
    for (top, left) in [(-50.0, 1e9), (f32::NAN, f32::NAN), (1e9, -1.0)] {
        grid.on_scroll(PaneKind::Main, top, left);
        let frame = grid.frame();
        let main = frame.pane(PaneKind::Main).unwrap();
        assert_eq!(frame.scroll, main.offset, "event ({top}, {left})");
        assert!(frame.scroll.top >= 0.0 && frame.scroll.left >= 0.0);
        assert_eq!(grid.scroll_state(), frame.scroll);
    }

    grid.on_scroll(PaneKind::Main, -50.0, 1e9);
    assert_eq!(grid.scroll_state(), ScrollState::new(0.0, 5200.0));

    // NaN never reaches the JSON output
    grid.on_scroll(PaneKind::Main, f32::NAN, 120.0);
    let json = serde_json::to_string(&grid.frame()).unwrap();
    assert!(!json.contains("null"));
}

proptest! {
    #[test]
    fn test_bounds_hold_for_random_configs(case in grid_case_strategy()) {
        let (rows, cols) = (case.config.row_count(), case.config.col_count());
        let (_host, mut grid) = mount(case.config, case.width, case.height);
        let max = grid.max_scroll();
        grid.on_scroll(PaneKind::Main, max.top * case.top_frac, max.left * case.left_frac);
        grid.frame();

        if let Some(row) = grid.source().max_row() {
            prop_assert!(row < rows);
        }
        if let Some(col) = grid.source().max_col() {
            prop_assert!(col < cols);
        }
    }
}

#[test]
fn test_only_window_is_materialized() {
    let (_host, mut grid) = mount_scenario(800.0, 400.0);
    grid.on_scroll(PaneKind::Main, 20_000.0, 2_000.0);
    let frame = grid.frame();

    // Header row is off screen, so every cell is a source lookup:
    // main 20 rows x 10 cols, frozen 12 rows x 2 cols each
    assert_eq!(grid.source().calls(), frame.cell_count());
    assert_eq!(frame.cell_count(), 20 * 10 + 2 * 12 * 2);
}

// ============================================================================
// Mount and teardown
// ============================================================================

struct BrokenHost;

impl ResizeHost for BrokenHost {
    fn measure(&self) -> frozengrid::Result<ViewportState> {
        Ok(ViewportState::default())
    }

    fn add_listener(&self, _listener: ResizeListener) -> frozengrid::Result<ListenerId> {
        Err(GridError::HostUnsupported("no ResizeObserver".into()))
    }

    fn remove_listener(&self, _id: ListenerId) {}
}

#[test]
fn test_listener_failure_fails_mount() {
    let result = FrozenGrid::mount(
        scenario_config(),
        RecordingSource::new(1000, 50),
        Rc::new(BrokenHost),
    );
    assert!(matches!(result, Err(GridError::HostUnsupported(_))));
}

#[test]
fn test_unmount_releases_listener() {
    let (host, grid) = mount_scenario(800.0, 400.0);
    assert_eq!(host.listener_count(), 1);
    drop(grid);
    assert_eq!(host.listener_count(), 0);
    // Resizes after teardown reach nobody
    host.set_size(10.0, 10.0);
}

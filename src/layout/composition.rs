//! Placement of the three panes inside the container.
//!
//! Frozen panes overlay the main pane's edges: the main pane is inset by one
//! frozen pane width on each side, the left pane is pinned to the left edge
//! and the right pane to the right edge. Widths never go negative.

use serde::{Deserialize, Serialize};

use super::{GridGeometry, PaneKind, ViewportState};

/// Position and size of a pane inside the container, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Stacking order; higher paints later
    pub z_index: u8,
}

impl PaneRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True if the pane has no drawable area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Rectangles of all three panes for one viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub main: PaneRect,
    pub left: PaneRect,
    pub right: PaneRect,
}

impl Composition {
    pub fn rect(&self, kind: PaneKind) -> PaneRect {
        match kind {
            PaneKind::Main => self.main,
            PaneKind::LeftFrozen => self.left,
            PaneKind::RightFrozen => self.right,
        }
    }
}

/// Lay out the panes for the given viewport
pub fn compose(geometry: &GridGeometry, viewport: ViewportState) -> Composition {
    let frozen_width = geometry.frozen_pane_width();
    let height = viewport.height.max(0.0);

    Composition {
        main: PaneRect {
            x: frozen_width,
            y: 0.0,
            width: geometry.main_pane_width(viewport.width),
            height,
            z_index: 0,
        },
        left: PaneRect {
            x: 0.0,
            y: 0.0,
            width: frozen_width,
            height,
            z_index: 1,
        },
        right: PaneRect {
            // Pinned to the right edge even when that overlaps the left pane
            x: viewport.width - frozen_width,
            y: 0.0,
            width: frozen_width,
            height,
            z_index: 2,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    fn geometry() -> GridGeometry {
        GridGeometry::new(GridConfig::new(1000, 50, 2, 40.0, 120.0).unwrap())
    }

    #[test]
    fn test_compose_scenario() {
        let comp = compose(&geometry(), ViewportState::new(800.0, 400.0));
        assert_eq!(comp.left.x, 0.0);
        assert_eq!(comp.left.width, 240.0);
        assert_eq!(comp.main.x, 240.0);
        assert_eq!(comp.main.width, 320.0);
        assert_eq!(comp.main.right(), comp.right.x);
        assert_eq!(comp.right.x, 560.0);
        assert_eq!(comp.right.right(), 800.0);
        for kind in PaneKind::ALL {
            assert_eq!(comp.rect(kind).height, 400.0);
        }
    }

    #[test]
    fn test_narrow_viewport_clamps_main_pane() {
        let comp = compose(&geometry(), ViewportState::new(300.0, 400.0));
        assert_eq!(comp.main.width, 0.0);
        assert!(comp.main.is_empty());
        assert_eq!(comp.right.right(), 300.0);
    }

    #[test]
    fn test_frozen_panes_overlay_above_main() {
        let comp = compose(&geometry(), ViewportState::default());
        assert!(comp.left.z_index > comp.main.z_index);
        assert!(comp.right.z_index > comp.left.z_index);
    }
}

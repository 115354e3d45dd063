//! Scroll coordination between the three panes.
//!
//! The main pane is the only origin of scroll events. Its vertical offset is
//! imposed on both frozen panes on every frame; its horizontal offset never
//! leaves the main pane.

use log::debug;

use crate::layout::{PaneKind, ScrollState};

/// Single writer of [`ScrollState`]
#[derive(Debug, Clone, Default)]
pub struct ScrollCoordinator {
    state: ScrollState,
    /// Accepted events since mount
    generation: u64,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current authoritative scroll state
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Number of accepted scroll events
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply a scroll notification reported by a pane's virtualization primitive.
    ///
    /// Only the main pane may originate scroll events; anything else is
    /// dropped so frozen panes cannot feed their imposed offset back in.
    /// Returns `true` if the state was replaced.
    pub fn on_scroll(&mut self, origin: PaneKind, scroll_top: f32, scroll_left: f32) -> bool {
        if origin != PaneKind::Main {
            debug!("ignoring scroll event from {origin:?} pane (top={scroll_top}, left={scroll_left})");
            return false;
        }
        self.state = ScrollState::new(scroll_top, scroll_left);
        self.generation += 1;
        debug!(
            "scroll #{}: top={scroll_top} left={scroll_left}",
            self.generation
        );
        true
    }

    /// Offset a pane must render at.
    ///
    /// Frozen panes get the main pane's vertical offset and no horizontal one.
    pub fn offset_for(&self, kind: PaneKind) -> ScrollState {
        match kind {
            PaneKind::Main => self.state,
            PaneKind::LeftFrozen | PaneKind::RightFrozen => ScrollState::new(self.state.top, 0.0),
        }
    }
}

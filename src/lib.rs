//! frozengrid - virtualized data grid with frozen columns on both sides
//!
//! A large grid (1000 rows x 50 columns by default) where the first and last
//! few columns stay pinned while the middle scrolls both ways:
//! - Three panes (left frozen, main, right frozen) over one data source
//! - Only the visible window plus overscan is ever materialized
//! - Vertical scroll of the main pane is imposed on the frozen panes
//! - Pane widths follow the container through resize notifications
//!
//! # Usage (Rust)
//!
//! ```
//! use std::rc::Rc;
//! use frozengrid::{FrozenGrid, GridConfig, ManualResizeHost, SyntheticSource};
//!
//! let host = Rc::new(ManualResizeHost::default());
//! let mut grid = FrozenGrid::mount(GridConfig::default(), SyntheticSource::new(1000, 50), host)?;
//! grid.on_scroll(frozengrid::PaneKind::Main, 400.0, 0.0);
//! let frame = grid.frame();
//! assert_eq!(frame.panes.len(), 3);
//! # Ok::<(), frozengrid::GridError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { FrozenGridView } from 'frozengrid';
//! await init();
//! const view = new FrozenGridView(container, canvas, { rowCount: 1000 }, devicePixelRatio);
//! view.scrollTo(400, 0);
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod layout;
pub mod render;
pub mod source;
pub mod viewer;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub use config::{GridConfig, Overscan};
pub use error::{GridError, Result};
pub use layout::{
    compose, CellAddress, Composition, FixedSizeGrid, GridGeometry, LogicalRow, PaneKind,
    PaneRect, ScrollState, ViewportState, VisibleRange,
};
pub use render::{GridFrame, PaneFrame, RenderBackend, RenderedCell, TextRenderer};
pub use source::{DataSource, MatrixSource, SyntheticSource};
pub use viewer::{FrozenGrid, ManualResizeHost, Pane, ResizeHost, ScrollCoordinator};
#[cfg(target_arch = "wasm32")]
pub use viewer::{DomResizeHost, FrozenGridView};

/// Compute one frame of synthetic data without mounting anything in the DOM.
///
/// `config_json` is a camelCase config object (empty string for defaults).
/// Returns the frame as a JSON string.
///
/// # Errors
/// Returns an error if the config is invalid.
#[wasm_bindgen]
pub fn compute_frame(
    config_json: &str,
    width: f32,
    height: f32,
    scroll_top: f32,
    scroll_left: f32,
) -> std::result::Result<String, JsValue> {
    frame_json(config_json, width, height, scroll_top, scroll_left)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn frame_json(
    config_json: &str,
    width: f32,
    height: f32,
    scroll_top: f32,
    scroll_left: f32,
) -> Result<String> {
    let config = if config_json.trim().is_empty() {
        GridConfig::default()
    } else {
        GridConfig::from_json(config_json)?
    };
    let source = SyntheticSource::new(config.row_count(), config.col_count());
    let host = Rc::new(ManualResizeHost::new(ViewportState::new(width, height)));
    let mut grid = FrozenGrid::mount(config, source, host)?;
    grid.scroll_to(scroll_top, scroll_left);
    Ok(serde_json::to_string(&grid.frame())?)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_json_defaults() {
        let json = frame_json("", 800.0, 400.0, 400.0, 0.0).unwrap();
        let frame: GridFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame.panes.len(), 3);
        assert_eq!(frame.pane(PaneKind::Main).unwrap().first_data_row, Some(9));
    }

    #[test]
    fn test_frame_json_rejects_bad_config() {
        let err = frame_json(r#"{"colCount": 4, "frozenCount": 2}"#, 800.0, 400.0, 0.0, 0.0);
        assert!(matches!(err, Err(GridError::InvalidConfig(_))));
    }
}

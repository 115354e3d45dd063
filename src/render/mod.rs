//! Rendering with pluggable backends.
//!
//! This module provides:
//! - The frame data handed to backends ([`GridFrame`], [`PaneFrame`])
//! - A plain-text backend for terminals and tests
//! - A Canvas 2D backend (wasm32 only)

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

pub use backend::{CellClass, GridFrame, PaneFrame, RenderBackend, RenderedCell};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use text::TextRenderer;

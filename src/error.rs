//! Structured error types for frozengrid.

/// All errors that can surface while building or mounting a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The grid configuration violates one of its invariants.
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// The host environment cannot deliver resize or scroll notifications.
    #[error("Host environment unsupported: {0}")]
    HostUnsupported(String),

    /// Malformed tabular input handed to a data source loader.
    #[error("Data source: {0}")]
    DataSource(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

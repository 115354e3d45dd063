//! Grid configuration, fixed at mount.
//!
//! A [`GridConfig`] can only be obtained through validation, either from
//! [`GridConfig::new`] or from JSON via [`GridConfig::from_json`], so every
//! other module may rely on its invariants without re-checking them.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default number of data rows.
pub const DEFAULT_ROW_COUNT: u32 = 1000;
/// Default number of logical columns.
pub const DEFAULT_COL_COUNT: u32 = 50;
/// Default number of frozen columns on each side.
pub const DEFAULT_FROZEN_COUNT: u32 = 2;
/// Default row height in pixels (header and data rows).
pub const DEFAULT_ROW_HEIGHT: f32 = 40.0;
/// Default column width in pixels.
pub const DEFAULT_COL_WIDTH: f32 = 120.0;
/// Viewport width assumed before the host has been measured.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
/// Viewport height assumed before the host has been measured.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 400.0;

/// Extra rows/columns rendered beyond the strictly visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Overscan {
    /// Rows above and below the main pane's visible window
    pub main_rows: u32,
    /// Columns left and right of the main pane's visible window
    pub main_cols: u32,
    /// Rows above and below the frozen panes' visible window
    pub frozen_rows: u32,
}

impl Default for Overscan {
    fn default() -> Self {
        Self {
            main_rows: 5,
            main_cols: 3,
            frozen_rows: 1,
        }
    }
}

/// Immutable grid configuration.
///
/// Invariants: `frozen_count * 2 < col_count`, `row_height` and `col_width`
/// are finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig", rename_all = "camelCase")]
pub struct GridConfig {
    row_count: u32,
    col_count: u32,
    frozen_count: u32,
    row_height: f32,
    col_width: f32,
    overscan: Overscan,
}

/// Unvalidated form used for deserialization. Omitted fields take defaults.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawGridConfig {
    row_count: u32,
    col_count: u32,
    frozen_count: u32,
    row_height: f32,
    col_width: f32,
    overscan: Overscan,
}

impl Default for RawGridConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            col_count: DEFAULT_COL_COUNT,
            frozen_count: DEFAULT_FROZEN_COUNT,
            row_height: DEFAULT_ROW_HEIGHT,
            col_width: DEFAULT_COL_WIDTH,
            overscan: Overscan::default(),
        }
    }
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = GridError;

    fn try_from(raw: RawGridConfig) -> Result<Self> {
        GridConfig::new(
            raw.row_count,
            raw.col_count,
            raw.frozen_count,
            raw.row_height,
            raw.col_width,
        )
        .map(|config| config.with_overscan(raw.overscan))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            col_count: DEFAULT_COL_COUNT,
            frozen_count: DEFAULT_FROZEN_COUNT,
            row_height: DEFAULT_ROW_HEIGHT,
            col_width: DEFAULT_COL_WIDTH,
            overscan: Overscan::default(),
        }
    }
}

impl GridConfig {
    /// Build a validated configuration with default overscan.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidConfig`] when the frozen columns would not
    /// leave at least one scrollable column, or when a cell dimension is not a
    /// finite positive number.
    pub fn new(
        row_count: u32,
        col_count: u32,
        frozen_count: u32,
        row_height: f32,
        col_width: f32,
    ) -> Result<Self> {
        if u64::from(frozen_count) * 2 >= u64::from(col_count) {
            return Err(GridError::config(format!(
                "frozen_count * 2 must be less than col_count (frozen_count={frozen_count}, col_count={col_count})"
            )));
        }
        if row_count == u32::MAX {
            return Err(GridError::config(
                "row_count leaves no room for the header row",
            ));
        }
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(GridError::config(format!(
                "row_height must be a positive number, got {row_height}"
            )));
        }
        if !col_width.is_finite() || col_width <= 0.0 {
            return Err(GridError::config(format!(
                "col_width must be a positive number, got {col_width}"
            )));
        }
        Ok(Self {
            row_count,
            col_count,
            frozen_count,
            row_height,
            col_width,
            overscan: Overscan::default(),
        })
    }

    /// Replace the overscan margins.
    #[must_use]
    pub fn with_overscan(mut self, overscan: Overscan) -> Self {
        self.overscan = overscan;
        self
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// Returns [`GridError::Json`] for malformed JSON and
    /// [`GridError::InvalidConfig`] for a violated invariant.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawGridConfig = serde_json::from_str(json)?;
        GridConfig::try_from(raw)
    }

    /// Number of data rows (excluding the header row)
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of logical columns across all panes
    pub fn col_count(&self) -> u32 {
        self.col_count
    }

    /// Number of frozen columns on each side
    pub fn frozen_count(&self) -> u32 {
        self.frozen_count
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn col_width(&self) -> f32 {
        self.col_width
    }

    pub fn overscan(&self) -> Overscan {
        self.overscan
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_original_component() {
        let config = GridConfig::default();
        assert_eq!(config.row_count(), 1000);
        assert_eq!(config.col_count(), 50);
        assert_eq!(config.frozen_count(), 2);
        assert_eq!(config.row_height(), 40.0);
        assert_eq!(config.col_width(), 120.0);
        assert_eq!(config.overscan(), Overscan::default());
    }

    #[test]
    fn test_frozen_columns_must_leave_scrollable_column() {
        assert!(GridConfig::new(10, 4, 2, 20.0, 50.0).is_err());
        assert!(GridConfig::new(10, 5, 2, 20.0, 50.0).is_ok());
        assert!(GridConfig::new(10, 1, 0, 20.0, 50.0).is_ok());
        assert!(GridConfig::new(10, 0, 0, 20.0, 50.0).is_err());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(GridConfig::new(10, 5, 1, 0.0, 50.0).is_err());
        assert!(GridConfig::new(10, 5, 1, -1.0, 50.0).is_err());
        assert!(GridConfig::new(10, 5, 1, f32::NAN, 50.0).is_err());
        assert!(GridConfig::new(10, 5, 1, 20.0, f32::INFINITY).is_err());
        assert!(GridConfig::new(u32::MAX, 5, 1, 20.0, 50.0).is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GridConfig::from_json(r#"{"rowCount": 20, "overscan": {"mainRows": 2}}"#)
            .expect("valid config");
        assert_eq!(config.row_count(), 20);
        assert_eq!(config.col_count(), DEFAULT_COL_COUNT);
        assert_eq!(config.overscan().main_rows, 2);
        assert_eq!(config.overscan().main_cols, 3);
    }

    #[test]
    fn test_from_json_validates() {
        let err = GridConfig::from_json(r#"{"colCount": 4, "frozenCount": 2}"#).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
        assert!(err.to_string().contains("frozen_count"));
    }

    #[test]
    fn test_json_roundtrip_preserves_config() {
        let config = GridConfig::new(12, 9, 1, 25.0, 80.0).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"rowCount\":12"));
        assert_eq!(GridConfig::from_json(&json).unwrap(), config);
    }
}

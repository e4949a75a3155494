use serde::{Deserialize, Serialize};

use crate::axis::AxisKind;
use crate::error::GridError;

/// Default number of rows
pub const DEFAULT_ROW_COUNT: usize = 3_000;
/// Default number of columns
pub const DEFAULT_COLUMN_COUNT: usize = 10_000;
/// Default row height in pixels (40px cell plus 2px margin on each side)
pub const DEFAULT_ROW_HEIGHT: f64 = 44.0;
/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 180.0;
/// Default spacing between columns in pixels
pub const DEFAULT_COLUMN_SPACING: f64 = 8.0;
/// Items rendered beyond each edge of the viewport
pub const DEFAULT_BUFFER_COUNT: usize = 10;
/// Width reserved for the synthetic scrollbar before the real gap is measured
pub const DEFAULT_SCROLLBAR_GAP: f64 = 16.0;
/// Distance from the bar's maximum that triggers the end-of-range correction
pub const DEFAULT_END_OF_RANGE_TOLERANCE: f64 = 80.0;
/// Offsets closer than this are considered already in sync
pub const DEFAULT_SYNC_THRESHOLD: f64 = 1.0;

/// Grid session configuration.
///
/// Every field has a default, so a partial JSON object such as
/// `{"rowCount": 200, "columnCount": 100}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub row_count: usize,
    pub column_count: usize,
    pub row_height: f64,
    pub column_width: f64,
    pub column_spacing: f64,
    pub buffer_count: usize,
    pub default_scrollbar_gap: f64,
    pub end_of_range_tolerance: f64,
    pub sync_threshold: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            column_count: DEFAULT_COLUMN_COUNT,
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
            column_spacing: DEFAULT_COLUMN_SPACING,
            buffer_count: DEFAULT_BUFFER_COUNT,
            default_scrollbar_gap: DEFAULT_SCROLLBAR_GAP,
            end_of_range_tolerance: DEFAULT_END_OF_RANGE_TOLERANCE,
            sync_threshold: DEFAULT_SYNC_THRESHOLD,
        }
    }
}

impl GridConfig {
    /// Create a configuration with the given dimensions and default sizing
    pub fn with_dimensions(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Horizontal pitch of one column: its width plus the spacing after it
    pub fn column_item_size(&self) -> f64 {
        self.column_width + self.column_spacing
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if !is_positive(self.row_height) {
            return Err(GridError::InvalidItemSize {
                axis: AxisKind::Rows,
                size: self.row_height,
            });
        }
        if !is_positive(self.column_item_size()) || !self.column_spacing.is_finite() {
            return Err(GridError::InvalidItemSize {
                axis: AxisKind::Columns,
                size: self.column_item_size(),
            });
        }
        if !is_non_negative(self.default_scrollbar_gap) {
            return Err(GridError::InvalidConfig(format!(
                "defaultScrollbarGap must be >= 0, got {}",
                self.default_scrollbar_gap
            )));
        }
        if !is_non_negative(self.end_of_range_tolerance) {
            return Err(GridError::InvalidConfig(format!(
                "endOfRangeTolerance must be >= 0, got {}",
                self.end_of_range_tolerance
            )));
        }
        if !is_non_negative(self.sync_threshold) {
            return Err(GridError::InvalidConfig(format!(
                "syncThreshold must be >= 0, got {}",
                self.sync_threshold
            )));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

use thiserror::Error;

use crate::axis::AxisKind;

/// Errors raised by the fallible parts of the engine (configuration, checked cell access)
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid {axis} size: {size}px")]
    InvalidItemSize { axis: AxisKind, size: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GridError {
    /// Stable machine-readable code, forwarded to JavaScript alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            GridError::InvalidItemSize { .. } => "INVALID_ITEM_SIZE",
            GridError::InvalidConfig(_) => "INVALID_CONFIG",
            GridError::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            GridError::Parse(_) => "PARSE_ERROR",
        }
    }
}

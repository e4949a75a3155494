use serde::{Deserialize, Serialize};
use std::fmt;

use crate::label::cell_name;

/// Represents a single cell position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Neighbouring position, or `None` when it would fall before row/column 0.
    /// The upper bound is not checked here.
    pub fn offset(&self, delta_row: isize, delta_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(delta_row)?,
            col: self.col.checked_add_signed(delta_col)?,
        })
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", cell_name(self.row, self.col))
    }
}

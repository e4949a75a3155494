use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Seed text used when no explicit seeder is given: `R{row+1}-C{col+1}`
pub fn default_seed(row: usize, col: usize) -> String {
    format!("R{}-C{}", row + 1, col + 1)
}

/// Dense in-memory cell store.
///
/// Columns are the outer dimension, matching the natively virtualized axis:
/// the renderer materializes one node per visible column and then reads a
/// contiguous slice of rows from it. The shape is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMatrix {
    columns: Vec<Vec<String>>,
    row_count: usize,
}

impl GridMatrix {
    /// Build a matrix, calling `seed(row, col)` for every cell
    pub fn new<F>(column_count: usize, row_count: usize, mut seed: F) -> Self
    where
        F: FnMut(usize, usize) -> String,
    {
        let columns = (0..column_count)
            .map(|col| (0..row_count).map(|row| seed(row, col)).collect())
            .collect();

        Self { columns, row_count }
    }

    /// Build a matrix with every cell set to `value`
    pub fn filled(column_count: usize, row_count: usize, value: &str) -> Self {
        Self::new(column_count, row_count, |_, _| value.to_string())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.row_count && col < self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.columns
            .get(col)
            .and_then(|column| column.get(row))
            .map(String::as_str)
    }

    /// Checked write
    pub fn set(&mut self, row: usize, col: usize, value: String) -> Result<(), GridError> {
        let (rows, cols) = (self.row_count, self.columns.len());
        let cell = self
            .columns
            .get_mut(col)
            .and_then(|column| column.get_mut(row))
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            })?;
        *cell = value;
        Ok(())
    }

    /// Text of an in-range cell.
    ///
    /// Out-of-range access is a caller bug: it asserts in debug builds and
    /// reads as an empty string in release builds.
    pub fn cell_text(&self, row: usize, col: usize) -> &str {
        debug_assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.row_count,
            self.columns.len()
        );
        match self.get(row, col) {
            Some(text) => text,
            None => {
                tracing::warn!(row, col, "read outside grid bounds");
                ""
            }
        }
    }

    /// Overwrite an in-range cell. Same contract as [`GridMatrix::cell_text`].
    pub fn set_cell_text(&mut self, row: usize, col: usize, value: String) {
        debug_assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.row_count,
            self.columns.len()
        );
        if let Err(err) = self.set(row, col, value) {
            tracing::warn!(%err, "write dropped");
        }
    }

    /// All rows of one column
    pub fn column(&self, col: usize) -> Option<&[String]> {
        self.columns.get(col).map(Vec::as_slice)
    }
}

//! Coordinate mapping seam
//!
//! The overlay is absolutely positioned in pixels; the editor speaks rows
//! and columns. The render grid owns the conversion.

/// Maps editor rows/columns to pixel coordinates.
pub trait CoordinateGrid: Send + Sync {
    fn row_to_y(&self, row: usize) -> f64;
    fn col_to_x(&self, col: usize) -> f64;
}

/// Fixed-size cell grid, the common monospace case.
#[derive(Debug, Clone, Copy)]
pub struct CellGrid {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl CoordinateGrid for CellGrid {
    fn row_to_y(&self, row: usize) -> f64 {
        row as f64 * self.cell_height
    }

    fn col_to_x(&self, col: usize) -> f64 {
        col as f64 * self.cell_width
    }
}

//! Bounds-checked 2-D cell storage.
//!
//! Logically the whole simulation shares one grid; physically each worker
//! only ever mutates its own row band. Rows are stored contiguously so a
//! boundary row can be sent over a transport as a single slice.

use crate::cell::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-background grid of fixed dimensions.
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid {
            rows,
            cols,
            cells: vec![Cell::background(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Writes a cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = cell;
        }
    }

    /// Borrow a full row, e.g. as a halo send buffer.
    ///
    /// # Panics
    /// Panics if `row` is out of range; callers only pass rows of their
    /// own band, which the partitioner guarantees are in range.
    pub fn row(&self, row: usize) -> &[Cell] {
        assert!(row < self.rows, "row {} out of range {}", row, self.rows);
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellKind};

    #[test]
    fn starts_as_background() {
        let grid = Grid::new(3, 4);
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(grid.get(row, col), Some(Cell::background()));
            }
        }
    }

    #[test]
    fn get_and_set_are_bounds_checked() {
        let mut grid = Grid::new(2, 2);
        let cell = Cell::new(CellKind::Aggressor, 42);
        grid.set(1, 1, cell);
        assert_eq!(grid.get(1, 1), Some(cell));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
        // silently ignored, not a panic
        grid.set(5, 5, cell);
    }

    #[test]
    fn row_slice_matches_cells() {
        let mut grid = Grid::new(2, 3);
        grid.set(1, 2, Cell::new(CellKind::Defender, 9));
        let row = grid.row(1);
        assert_eq!(row.len(), 3);
        assert_eq!(row[2], Cell::new(CellKind::Defender, 9));
    }
}

//! Board module - manages the game grid
//!
//! The board is a W x H grid (15x20 by default) where each cell is either empty or holds
//! the color token of the piece that was merged there.
//! Uses a flat row-major vector; the dimensions never change after construction.
//! Coordinates: (x, y) where x ranges 0..W (left to right), y ranges 0..H (top to bottom).

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Dimensions are expected to come from a validated [`EngineConfig`](crate::EngineConfig).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// Borrow row `y`, or `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Fill every cell of row `y` with `color`.
    pub fn fill_row(&mut self, y: usize, color: Color) {
        if y >= self.height {
            return;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].fill(Some(color));
    }

    /// Remove row `y`, shift every row above it down by one and insert an empty row at the top.
    pub fn remove_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is examined again,
    /// because the row above has just shifted into it.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy the board into a vector of rows (top to bottom).
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH as usize, BOARD_HEIGHT as usize)
    }
}

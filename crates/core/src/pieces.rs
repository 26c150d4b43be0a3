//! Pieces module - shape matrices, the piece catalog and matrix rotation
//!
//! Shapes are small boolean matrices with explicit dimensions (up to 4x4), stored in
//! fixed arrays. Rotation builds a new matrix instead of mutating in place so callers
//! can keep the original around for atomic rollback.
//!
//! There are no wall kicks: the engine recenters the anchor after rotating and then
//! either accepts or rejects the result.

use arrayvec::ArrayVec;

use crate::error::ShapeError;
use crate::types::{PieceKind, MAX_SHAPE_SIZE};

/// Occupied cell of a shape as `(row, col)`.
pub type ShapeCell = (usize, usize);

/// Occupied cells of a shape in row-major order.
pub type ShapeCells = ArrayVec<ShapeCell, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// A rectangular boolean matrix of at most 4x4 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Cells outside `rows x cols` are always `false`.
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

/// Build a catalog shape from a literal matrix. Catalog entries are checked in tests.
const fn matrix<const R: usize, const C: usize>(m: [[u8; C]; R]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut r = 0;
    while r < R {
        let mut c = 0;
        while c < C {
            cells[r][c] = m[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape {
        rows: R as u8,
        cols: C as u8,
        cells,
    }
}

const I_SHAPE: Shape = matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: Shape = matrix([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
const L_SHAPE: Shape = matrix([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);
const O_SHAPE: Shape = matrix([[1, 1], [1, 1]]);
const S_SHAPE: Shape = matrix([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const T_SHAPE: Shape = matrix([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const Z_SHAPE: Shape = matrix([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);
const SPECIAL_SHAPE: Shape = matrix([[1]]);

/// Get the spawn shape for a piece kind.
pub const fn catalog_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::Special => SPECIAL_SHAPE,
    }
}

impl Shape {
    /// Build a shape from rows of `0`/non-zero values.
    ///
    /// # Examples
    ///
    /// ```
    /// use gioco_core::{Shape, ShapeError};
    ///
    /// let bar = Shape::from_rows(&[[1u8, 1, 1]]).unwrap();
    /// assert_eq!((bar.height(), bar.width()), (1, 3));
    ///
    /// let ragged: [&[u8]; 2] = [&[1, 1], &[1]];
    /// assert!(matches!(Shape::from_rows(&ragged), Err(ShapeError::RaggedRow { .. })));
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if height > MAX_SHAPE_SIZE || width > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge {
                rows: height,
                cols: width,
                max: MAX_SHAPE_SIZE,
            });
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ShapeError::RaggedRow {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }

        let shape = Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        };
        if shape.cell_count() == 0 {
            return Err(ShapeError::NoCells);
        }
        Ok(shape)
    }

    /// Number of matrix rows.
    pub fn height(&self) -> usize {
        self.rows as usize
    }

    /// Number of matrix columns.
    pub fn width(&self) -> usize {
        self.cols as usize
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for r in 0..self.height() {
            for c in 0..self.width() {
                if self.cells[r][c] {
                    out.push((r, c));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&v| v).count())
            .sum()
    }

    /// Rotate 90° clockwise.
    ///
    /// An R x C matrix becomes C x R with `rotated[c][r] = original[R-1-r][c]`.
    pub fn rotated_cw(&self) -> Shape {
        let (rows, cols) = (self.height(), self.width());
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for c in 0..cols {
            for r in 0..rows {
                cells[c][r] = self.cells[rows - 1 - r][c];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Copy into nested vectors (row-major), mostly for rendering and tests.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        (0..self.height())
            .map(|r| self.cells[r][..self.width()].to_vec())
            .collect()
    }
}

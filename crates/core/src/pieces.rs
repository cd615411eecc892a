//! Pieces module - tetromino catalog and matrix rotation
//!
//! Each piece kind has one fixed spawn matrix. Every other orientation is produced on
//! demand by [`rotate_clockwise`], so there are no per-rotation tables and no kick
//! tables: the session tries the rotated matrix in place, then one column left, then
//! one column right.

use crate::error::{EngineError, Result};
use crate::rng::PieceDraw;
use crate::types::{Cell, PieceKind, PIECE_KINDS};

/// One rotation state of a piece: a rectangular matrix of cells
///
/// Occupied cells carry the piece kind, so a shape can be locked onto the board
/// without any side information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    /// Row-major cells (r * cols + c)
    cells: Vec<Cell>,
}

impl Shape {
    /// Build a shape from rows of flags, tagging occupied cells with `kind`
    ///
    /// Fails on an empty matrix or rows of unequal length.
    pub fn new(kind: PieceKind, rows: &[&[bool]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return Err(EngineError::InvalidShape);
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&filled| filled.then_some(kind)))
            .collect();
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Catalog constructor: digits, `0` is empty
    fn from_catalog(kind: PieceKind, rows: &[&[u8]]) -> Self {
        let cols = rows[0].len();
        debug_assert!(rows.iter().all(|row| row.len() == cols), "catalog shape for {kind:?} is not rectangular");
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| (v != 0).then_some(kind)))
            .collect();
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (r, c), `None` when empty or outside the matrix
    pub fn get(&self, r: usize, c: usize) -> Cell {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        self.cells[r * self.cols + c]
    }

    /// Offsets `(dr, dc)` of every occupied cell, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(move |(idx, _)| ((idx / cols) as i32, (idx % cols) as i32))
    }

    /// Rotated copy, see [`rotate_clockwise`]
    pub fn rotated_cw(&self) -> Self {
        rotate_clockwise(self)
    }
}

/// Rotate a shape 90° clockwise
///
/// An `h×w` matrix becomes `w×h`; input cell `(r, c)` lands on `(c, h - 1 - r)`.
/// Placement is not checked here.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let (h, w) = (shape.rows, shape.cols);
    let mut cells = vec![None; h * w];
    for r in 0..h {
        for c in 0..w {
            // Output is w rows by h cols.
            cells[c * h + (h - 1 - r)] = shape.cells[r * w + c];
        }
    }
    Shape {
        rows: w,
        cols: h,
        cells,
    }
}

/// Spawn orientation for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_catalog(kind, &[&[1, 1, 1, 1]]),
        PieceKind::J => Shape::from_catalog(kind, &[&[2, 0, 0], &[2, 2, 2]]),
        PieceKind::L => Shape::from_catalog(kind, &[&[0, 0, 3], &[3, 3, 3]]),
        PieceKind::O => Shape::from_catalog(kind, &[&[4, 4], &[4, 4]]),
        PieceKind::S => Shape::from_catalog(kind, &[&[0, 5, 5], &[5, 5, 0]]),
        PieceKind::T => Shape::from_catalog(kind, &[&[6, 6, 6], &[0, 6, 0]]),
        PieceKind::Z => Shape::from_catalog(kind, &[&[7, 7, 0], &[0, 7, 7]]),
    }
}

/// Pick a piece kind uniformly with one draw from `draw`
///
/// Draws outside `[0, 7)` are folded back into range.
pub fn random_piece<D: PieceDraw + ?Sized>(draw: &mut D) -> (Shape, PieceKind) {
    let kind = PieceKind::ALL[draw.next_index() % PIECE_KINDS];
    (spawn_shape(kind), kind)
}

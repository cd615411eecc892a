//! Board module - manages the game grid
//!
//! The board is a `height × width` grid where each cell can be empty or filled with a
//! piece kind. Uses a flat buffer for cache locality; dimensions are fixed at
//! construction.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left edge.
//! Piece anchors may have negative rows while a piece pokes above the board.

use crate::error::{EngineError, Result};
use crate::pieces::Shape;
use crate::types::{cell_id, Cell, PieceKind};

/// The game board using flat buffer storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat buffer of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                min_width: 1,
            });
        }
        let (width, height) = (usize::from(width), usize::from(height));
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Parse a board from text rows, top row first
    ///
    /// `.` and `0` are empty; piece letters (any case) or ids `1`-`7` are filled.
    ///
    /// ```
    /// use blockfall_core::Board;
    /// use blockfall_core::types::PieceKind;
    ///
    /// let board = Board::from_rows(&["....", "ii.t"]).unwrap();
    /// assert_eq!(board.get(1, 3), Some(Some(PieceKind::T)));
    /// assert_eq!(board.get(1, 2), Some(None));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || rows.iter().any(|row| row.chars().count() != width) {
            return Err(EngineError::InvalidShape);
        }
        // Dimensions are reported as u16; larger text must not wrap around.
        let (Ok(_), Ok(_)) = (u16::try_from(width), u16::try_from(rows.len())) else {
            return Err(EngineError::InvalidDimensions {
                width: u16::try_from(width).unwrap_or(u16::MAX),
                height: u16::try_from(rows.len()).unwrap_or(u16::MAX),
                min_width: 1,
            });
        };
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            for ch in row.chars() {
                let cell = match ch {
                    '.' | '0' => None,
                    '1'..='7' => PieceKind::from_id(ch as u8 - b'0'),
                    _ => Some(
                        PieceKind::from_str(ch.encode_utf8(&mut [0; 4]))
                            .ok_or(EngineError::InvalidCell(ch))?,
                    ),
                };
                cells.push(cell);
            }
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width as u16
    }

    pub fn height(&self) -> u16 {
        self.height as u16
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Cells of one row, left to right
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Whether `shape` fits with its top-left corner at (row, col)
    ///
    /// Every occupied cell must land in `[0, width)` horizontally and above the floor.
    /// Cells above row 0 are only checked against the side walls, which lets a piece
    /// spawn partially above the board.
    pub fn is_valid_position(&self, shape: &Shape, row: i32, col: i32) -> bool {
        shape.occupied().all(|(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            if c < 0 || c as usize >= self.width || r >= self.height as i32 {
                return false;
            }
            r < 0 || !self.is_occupied(r, c)
        })
    }

    /// Write `kind` under every occupied cell of `shape` at (row, col)
    ///
    /// Cells that fall outside the board are dropped.
    pub fn lock_piece(&mut self, shape: &Shape, kind: PieceKind, row: i32, col: i32) {
        for (dr, dc) in shape.occupied() {
            self.set(row + dr, col + dc, Some(kind));
        }
    }

    /// Remove every full row and return how many were removed
    ///
    /// Two-pointer compaction: `read` walks up from the floor, surviving rows are
    /// copied down to `write`, and whatever is left above `write` is blanked. Full rows
    /// anywhere on the board cascade correctly in a single pass.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut write = self.height;
        let mut cleared = 0;

        for read in (0..self.height).rev() {
            if self.is_row_full(read) {
                cleared += 1;
                continue;
            }
            write -= 1;
            if write != read {
                // Rows are disjoint slices of the buffer, copy_within never aliases them.
                self.cells
                    .copy_within(read * width..(read + 1) * width, write * width);
            }
        }

        for cell in &mut self.cells[..write * width] {
            *cell = None;
        }

        cleared
    }

    /// Count of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Board as rows of numeric ids (0 = empty)
    pub fn to_ids(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&cell| cell_id(cell)).collect())
            .collect()
    }
}

use serde::Serialize;

use crate::session::ActivePiece;
use crate::types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub row: i32,
    pub col: i32,
    /// Absolute (row, col) of every occupied cell
    pub cells: Vec<(i32, i32)>,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind,
            row: value.row,
            col: value.col,
            cells: value.cells().collect(),
        }
    }
}

/// Owned, serializable view of a session for renderers and headless tools
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells as piece ids, 0 = empty
    pub board: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Id shown at (row, col): the active piece wins over the locked board
    pub fn visible_id(&self, row: usize, col: usize) -> u8 {
        if let Some(active) = &self.active {
            if active
                .cells
                .iter()
                .any(|&(r, c)| r == row as i32 && c == col as i32)
            {
                return active.kind.id();
            }
        }
        self.board
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(0)
    }
}

//! Shared types module - plain data used by every crate in the workspace
//!
//! Everything here is pure data with no behavior beyond parsing and naming, so the
//! core engine, the terminal integrator and the tests can agree on one vocabulary.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Row 0 is the top of the board.
//! Sessions may be configured with other sizes; these are only the defaults.
//!
//! # Gravity Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_INTERVAL_MS` | 500 | Gravity interval of a fresh session |
//! | `MIN_INTERVAL_MS` | 50 | Gravity never gets faster than this |
//! | `INTERVAL_STEP_MS` | 10 | Speed-up per cleared row |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.id(), 6);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(DEFAULT_WIDTH, 10);
//! assert_eq!(DEFAULT_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Default board width in cells
pub const DEFAULT_WIDTH: u16 = 10;

/// Default board height in cells
pub const DEFAULT_HEIGHT: u16 = 20;

/// Gravity interval of a fresh session
pub const INITIAL_INTERVAL_MS: u32 = 500;

/// Lower bound for the gravity interval
pub const MIN_INTERVAL_MS: u32 = 50;

/// Interval reduction per cleared row
pub const INTERVAL_STEP_MS: u32 = 10;

/// Number of distinct piece kinds
pub const PIECE_KINDS: usize = 7;

/// The seven tetromino piece kinds
///
/// The declaration order is the catalog order used by random draws, and the
/// numeric id is `index + 1`:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; PIECE_KINDS] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color/type id, always in `1..=7`
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(4), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Numeric encoding of a cell: 0 for empty, otherwise the piece id
#[inline]
pub fn cell_id(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::id)
}

/// Discrete inputs a session accepts
///
/// Each command is applied synchronously and independently of gravity timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down; locks immediately when blocked
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with a left/right kick fallback
    Rotate,
    /// Suspend or resume gravity
    TogglePause,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotate" => Some(Command::Rotate),
            "togglepause" | "pause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
            Command::TogglePause => "togglePause",
        }
    }

    /// Whether the command moves or turns the active piece
    pub fn is_directional(&self) -> bool {
        !matches!(self, Command::TogglePause)
    }
}

/// One external event delivered to the engine
///
/// The integrator merges its clock and its input devices into a single ordered
/// stream of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Gravity interval elapsed
    Tick,
    /// Player input
    Command(Command),
    /// Start a fresh session
    Reset,
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Event::Command(command)
    }
}

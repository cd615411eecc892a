//! Construction errors
//!
//! Runtime play never fails: blocked moves are plain `false` outcomes and game over is
//! a state. These errors only cover malformed input handed to constructors.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("Board dimensions {width}x{height} are invalid (need width >= {min_width}, height >= 1)")]
    InvalidDimensions {
        width: u16,
        height: u16,
        min_width: u16,
    },
    #[error("Shape must be a non-empty rectangle")]
    InvalidShape,
    #[error("Unknown cell character {0:?}")]
    InvalidCell(char),
    #[error("Gravity interval {initial_ms}ms must be >= the {min_ms}ms floor, and the floor must be positive")]
    InvalidInterval { initial_ms: u32, min_ms: u32 },
    #[error("Board is {actual_width}x{actual_height}, session expects {width}x{height}")]
    BoardMismatch {
        width: u16,
        height: u16,
        actual_width: u16,
        actual_height: u16,
    },
}

pub type Result<T> = core::result::Result<T, EngineError>;

//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the grid, the piece catalog, the
//! spawn/fall/lock/clear cycle and the gravity speed-up. It has **zero dependencies**
//! on terminals, timers or I/O:
//!
//! - **Deterministic**: piece choice comes from an injected [`PieceDraw`]
//! - **Synchronous**: every tick or command completes within the call
//! - **Portable**: the integrator owns the clock and the screen
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision checks and line clearing
//! - [`pieces`]: the seven spawn matrices and clockwise matrix rotation
//! - [`session`]: active piece, gravity interval, pause and game-over state
//! - [`gravity`]: interval speed-up rule applied after each lock
//! - [`rng`]: draw sources (seeded LCG and scripted sequences)
//! - [`snapshot`]: owned, serializable state for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, column `width / 2 - 2`; a blocked spawn ends the game
//! - Rotation is clockwise only, trying the same column, then one left, then one right
//! - A blocked downward step (gravity or soft drop) locks the piece immediately
//! - Each cleared row shortens the gravity interval by 10ms, down to 50ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::{ScriptedDraw, Session, SessionConfig};
//! use blockfall_core::types::Command;
//!
//! // Always draw the I piece.
//! let mut session = Session::new(SessionConfig::default(), ScriptedDraw::repeat(0)).unwrap();
//!
//! session.command(Command::MoveRight);
//! let outcome = session.command(Command::HardDrop);
//!
//! assert!(outcome.locked());
//! assert_eq!(session.pieces_locked(), 1);
//! assert_eq!(session.interval_ms(), 500);
//! ```
//!
//! # Timing
//!
//! The session never measures time. The integrator calls
//! [`Session::tick`](session::Session::tick) every
//! [`interval_ms`](session::Session::interval_ms) milliseconds and stops calling it
//! while the session is paused or over.

pub mod board;
pub mod config;
pub mod error;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::SessionConfig;
pub use error::{EngineError, Result};
pub use pieces::{random_piece, rotate_clockwise, spawn_shape, Shape};
pub use rng::{PieceDraw, ScriptedDraw, SimpleRng};
pub use session::{ActivePiece, Phase, Session, SessionEvent, StepOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot};

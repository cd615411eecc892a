//! Terminal rendering module.
//!
//! A deliberately small view layer: a pure [`GameView`] turns a snapshot into text
//! lines tagged with piece ids, and [`TerminalRenderer`] flushes them with crossterm.
//! The core never calls into this crate.

pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use game_view::{Frame, GameView, Glyph};
pub use renderer::{encode_full_into, piece_color, TerminalRenderer};

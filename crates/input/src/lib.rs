//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Event`]s. There is no key
//! repeat handling here: the terminal's own auto-repeat delivers repeated presses and
//! every press is one discrete command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};

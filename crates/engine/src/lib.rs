//! Engine-facing event plumbing.
//!
//! This crate sits between the pure core and whatever drives it. The [`Mediator`]
//! turns one ordered stream of ticks, commands and resets into session operations,
//! and [`script`] gives headless runs a one-character-per-event notation.

pub mod mediator;
pub mod script;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use mediator::{Mediator, RunSummary};
pub use script::{event_for_key, parse_script, ScriptError};

//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `blockfall::{core,engine,input,term,types}` so the binary, the integration tests
//! and the benches share a single import path.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

//! Session configuration

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, INITIAL_INTERVAL_MS, INTERVAL_STEP_MS, MIN_INTERVAL_MS};

/// Narrowest board a session accepts: the spawn column `width / 2 - 2` must be
/// non-negative and the flat I piece must fit.
pub const MIN_SESSION_WIDTH: u16 = 4;

/// Tunables for a [`Session`](crate::Session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    /// Gravity interval of a fresh session (and after reset)
    pub initial_interval_ms: u32,
    /// Floor for the gravity interval
    pub min_interval_ms: u32,
    /// Interval reduction per cleared row
    pub interval_step_ms: u32,
    /// Whether move/rotate/drop commands still apply while paused
    pub accept_input_while_paused: bool,
}

impl SessionConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_initial_interval_ms(mut self, ms: u32) -> Self {
        self.initial_interval_ms = ms;
        self
    }

    pub fn with_accept_input_while_paused(mut self, accept: bool) -> Self {
        self.accept_input_while_paused = accept;
        self
    }

    /// Reject configurations the session cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_SESSION_WIDTH || self.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min_width: MIN_SESSION_WIDTH,
            });
        }
        if self.min_interval_ms == 0 || self.initial_interval_ms < self.min_interval_ms {
            return Err(EngineError::InvalidInterval {
                initial_ms: self.initial_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }
        Ok(())
    }

    /// Column where new pieces are anchored
    pub fn spawn_col(&self) -> i32 {
        i32::from(self.width) / 2 - 2
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_interval_ms: INITIAL_INTERVAL_MS,
            min_interval_ms: MIN_INTERVAL_MS,
            interval_step_ms: INTERVAL_STEP_MS,
            accept_input_while_paused: true,
        }
    }
}

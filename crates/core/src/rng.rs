//! RNG module - piece draw sources
//!
//! The session never touches a global generator. Whoever builds it hands over a
//! [`PieceDraw`], so tests can script the exact piece sequence and the terminal runner
//! can seed a reproducible one.
//!
//! Also provides a simple LCG for deterministic play.

use crate::types::PIECE_KINDS;

/// Source of uniform draws over `[0, 7)`, one per spawn
pub trait PieceDraw {
    fn next_index(&mut self) -> usize;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits; the low bits of a power-of-two LCG cycle
    /// with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Current state (restart a sequence from here with `SimpleRng::new`)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceDraw for SimpleRng {
    fn next_index(&mut self) -> usize {
        self.next_range(PIECE_KINDS as u32) as usize
    }
}

/// Replays a fixed list of draws, cycling when exhausted
///
/// An empty script always yields 0 (the I piece).
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraw {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedDraw {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, pos: 0 }
    }

    /// Always yield the same index
    pub fn repeat(index: usize) -> Self {
        Self::new(vec![index])
    }

    /// Number of draws taken so far
    pub fn taken(&self) -> usize {
        self.pos
    }
}

impl PieceDraw for ScriptedDraw {
    fn next_index(&mut self) -> usize {
        let value = if self.script.is_empty() {
            0
        } else {
            self.script[self.pos % self.script.len()]
        };
        self.pos += 1;
        value
    }
}

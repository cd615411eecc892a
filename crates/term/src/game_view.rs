//! GameView: maps a `core::GameSnapshot` into plain text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;

/// One terminal character tagged with the piece id that colors it (0 = plain)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub id: u8,
}

impl Glyph {
    fn plain(ch: char) -> Self {
        Self { ch, id: 0 }
    }
}

/// Rendered lines, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<Vec<Glyph>>,
}

impl Frame {
    pub fn lines(&self) -> &[Vec<Glyph>] {
        &self.lines
    }

    /// Text of one line without styling
    pub fn line_text(&self, y: usize) -> String {
        self.lines
            .get(y)
            .map(|line| line.iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }

    fn push_text(&mut self, text: &str) {
        self.lines.push(text.chars().map(Glyph::plain).collect());
    }
}

/// A lightweight text view of the board and status
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    filled: [char; 2],
    empty: [char; 2],
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell compensates for the usual glyph aspect ratio.
        Self {
            filled: ['[', ']'],
            empty: [' ', '.'],
        }
    }
}

impl GameView {
    pub fn render(&self, snap: &GameSnapshot) -> Frame {
        let mut frame = Frame::default();
        let width = usize::from(snap.width);
        let border = format!("+{}+", "-".repeat(width * 2));

        frame.push_text(&border);
        for row in 0..usize::from(snap.height) {
            let mut line = Vec::with_capacity(width * 2 + 2);
            line.push(Glyph::plain('|'));
            for col in 0..width {
                let id = snap.visible_id(row, col);
                let pair = if id == 0 { self.empty } else { self.filled };
                line.extend(pair.iter().map(|&ch| Glyph { ch, id }));
            }
            line.push(Glyph::plain('|'));
            frame.lines.push(line);
        }
        frame.push_text(&border);

        frame.push_text(&format!(
            "lines {}  pieces {}  gravity {}ms",
            snap.lines_cleared, snap.pieces_locked, snap.interval_ms
        ));
        let status = if snap.playable() {
            "arrows: move  up: rotate  space: drop  p: pause  q: quit"
        } else if snap.game_over {
            "GAME OVER  r: restart  q: quit"
        } else {
            "PAUSED  p: resume  q: quit"
        };
        frame.push_text(status);
        frame
    }
}

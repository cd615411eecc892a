//! TerminalRenderer: flushes a text frame to a real terminal.
//!
//! Full redraws only. Callers skip `draw` when nothing changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::game_view::Frame;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_full_into(frame, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue a clear-and-repaint of `frame` into `out`, one color change per id run
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<u8> = None;
    for (y, line) in frame.lines().iter().enumerate() {
        for glyph in line {
            if current != Some(glyph.id) {
                out.queue(SetForegroundColor(piece_color(glyph.id)))?;
                current = Some(glyph.id);
            }
            out.queue(Print(glyph.ch))?;
        }
        if y + 1 < frame.lines().len() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Foreground color per piece id (0 = board chrome)
pub fn piece_color(id: u8) -> Color {
    let (r, g, b) = match id {
        1 => (0, 240, 240),   // I cyan
        2 => (40, 80, 240),   // J blue
        3 => (240, 160, 0),   // L orange
        4 => (240, 240, 0),   // O yellow
        5 => (0, 220, 60),    // S green
        6 => (200, 40, 220),  // T magenta
        7 => (240, 40, 40),   // Z red
        _ => (150, 150, 160),
    };
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedDraw, Session, SessionConfig};
    use crate::game_view::GameView;

    #[test]
    fn encodes_frame_without_terminal() {
        let snap = Session::new(SessionConfig::default(), ScriptedDraw::repeat(0))
            .unwrap()
            .snapshot();
        let frame = GameView::default().render(&snap);
        let mut out = Vec::new();
        encode_full_into(&frame, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("[][][][]"));
        assert!(text.contains("gravity 500ms"));
    }

    #[test]
    fn every_piece_has_distinct_color() {
        let colors: Vec<Color> = (1..=7).map(piece_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

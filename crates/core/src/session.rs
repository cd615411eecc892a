//! Session module - the spawn → fall → lock → clear cycle
//!
//! This module ties together the board, the piece catalog and the injected draw
//! source. It owns the active piece, the gravity interval, the pause flag and the
//! game-over flag. Every public operation runs to completion synchronously and
//! reports what happened as a [`StepOutcome`]; there are no internal timers.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::SessionConfig;
use crate::error::{EngineError, Result};
use crate::gravity::next_interval_ms;
use crate::pieces::{random_piece, rotate_clockwise, Shape};
use crate::rng::PieceDraw;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, PieceKind};

/// Column offsets tried, in order, when placing a rotated piece
const ROTATION_KICKS: [i32; 3] = [0, -1, 1];

/// Upper bound on events from one operation: lock, clear, speed-up, spawn/game over.
pub const MAX_EVENTS: usize = 4;

/// Falling piece: one rotation state plus its top-left anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub kind: PieceKind,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    /// Absolute (row, col) of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }
}

/// Something the integrator may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The active piece was written into the board at its anchor
    Locked { kind: PieceKind, row: i32, col: i32 },
    /// Full rows were removed after a lock
    LinesCleared { count: usize },
    /// Gravity sped up; the scheduler should use `to_ms` from now on
    IntervalChanged { from_ms: u32, to_ms: u32 },
    /// A new piece entered at the top
    Spawned { kind: PieceKind },
    /// The spawn position was blocked; the session is now terminal
    GameOver,
}

/// Result of a single tick, command or reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether session state changed at all
    pub changed: bool,
    pub events: ArrayVec<SessionEvent, MAX_EVENTS>,
}

impl StepOutcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn from_changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// True if this step ended the game
    pub fn game_over(&self) -> bool {
        self.events.contains(&SessionEvent::GameOver)
    }

    /// True if this step locked a piece
    pub fn locked(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, SessionEvent::Locked { .. }))
    }

    /// Rows cleared during this step
    pub fn lines_cleared(&self) -> usize {
        self.events
            .iter()
            .find_map(|event| match event {
                SessionEvent::LinesCleared { count } => Some(*count),
                _ => None,
            })
            .unwrap_or(0)
    }
}

/// Coarse session phase for readers
///
/// Spawning, locking and line clearing happen inside a single step, so a reader only
/// ever observes one of these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Paused,
    GameOver,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session<D> {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    interval_ms: u32,
    paused: bool,
    game_over: bool,
    lines_cleared: u32,
    pieces_locked: u32,
    draw: D,
}

impl<D: PieceDraw> Session<D> {
    /// Start a session on an empty board and spawn the first piece
    pub fn new(config: SessionConfig, draw: D) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        Self::with_board(config, board, draw)
    }

    /// Start a session on a pre-filled board
    ///
    /// If the first spawn is blocked the session starts in game over.
    pub fn with_board(config: SessionConfig, board: Board, draw: D) -> Result<Self> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(EngineError::BoardMismatch {
                width: config.width,
                height: config.height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }

        let mut session = Self {
            config,
            board,
            active: None,
            interval_ms: config.initial_interval_ms,
            paused: false,
            game_over: false,
            lines_cleared: 0,
            pieces_locked: 0,
            draw,
        };
        session.spawn(&mut StepOutcome::unchanged());
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Current gravity interval; the scheduler ticks at this rate
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Falling
        }
    }

    pub fn draw_source(&self) -> &D {
        &self.draw
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board = self.board.to_ids();
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.interval_ms = self.interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.lines_cleared = self.lines_cleared;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// One gravity step: move down, or lock and spawn when blocked
    ///
    /// Suppressed entirely while paused or after game over.
    pub fn tick(&mut self) -> StepOutcome {
        if self.game_over || self.paused {
            return StepOutcome::unchanged();
        }
        if self.try_move(0, 1) {
            return StepOutcome::from_changed(true);
        }
        let mut out = StepOutcome::from_changed(true);
        self.lock_and_spawn(&mut out);
        out
    }

    /// Apply one discrete input
    pub fn command(&mut self, command: Command) -> StepOutcome {
        if self.game_over {
            return StepOutcome::unchanged();
        }
        if self.paused && command.is_directional() && !self.config.accept_input_while_paused {
            trace!(command = command.as_str(), "ignored while paused");
            return StepOutcome::unchanged();
        }
        trace!(command = command.as_str(), "command");

        match command {
            Command::MoveLeft => StepOutcome::from_changed(self.try_move(-1, 0)),
            Command::MoveRight => StepOutcome::from_changed(self.try_move(1, 0)),
            Command::SoftDrop => {
                let mut out = StepOutcome::from_changed(true);
                if !self.try_move(0, 1) {
                    self.lock_and_spawn(&mut out);
                }
                out
            }
            Command::HardDrop => {
                let mut out = StepOutcome::from_changed(true);
                self.hard_drop(&mut out);
                out
            }
            Command::Rotate => StepOutcome::from_changed(self.rotate()),
            Command::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
                StepOutcome::from_changed(true)
            }
        }
    }

    /// Wipe the board and start over with the configured interval
    pub fn reset(&mut self) -> StepOutcome {
        self.board.clear();
        self.active = None;
        self.interval_ms = self.config.initial_interval_ms;
        self.paused = false;
        self.game_over = false;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        info!("session reset");

        let mut out = StepOutcome::from_changed(true);
        self.spawn(&mut out);
        out
    }

    /// Shift the active piece by (dx, dy) if the target is free
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let (row, col) = (active.row + dy, active.col + dx);
        if !self.board.is_valid_position(&active.shape, row, col) {
            return false;
        }
        active.row = row;
        active.col = col;
        true
    }

    /// Rotate clockwise, kicking one column left then right if needed
    ///
    /// Returns false and leaves the piece untouched when no placement fits.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let rotated = rotate_clockwise(&active.shape);
        let Some(col) = ROTATION_KICKS
            .iter()
            .map(|dc| active.col + dc)
            .find(|&col| self.board.is_valid_position(&rotated, active.row, col))
        else {
            return false;
        };

        self.active = Some(ActivePiece {
            shape: rotated,
            kind: active.kind,
            row: active.row,
            col,
        });
        true
    }

    fn hard_drop(&mut self, out: &mut StepOutcome) {
        // Terminates: each move increases the row and the floor bounds it.
        while self.try_move(0, 1) {}
        self.lock_and_spawn(out);
    }

    fn lock_and_spawn(&mut self, out: &mut StepOutcome) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock_piece(&active.shape, active.kind, active.row, active.col);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!(kind = active.kind.as_str(), row = active.row, col = active.col, "locked");
        out.push(SessionEvent::Locked {
            kind: active.kind,
            row: active.row,
            col: active.col,
        });

        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.lines_cleared = self.lines_cleared.saturating_add(cleared as u32);
            debug!(cleared, total = self.lines_cleared, "lines cleared");
            out.push(SessionEvent::LinesCleared { count: cleared });
        }

        let next = next_interval_ms(
            self.interval_ms,
            cleared,
            self.config.interval_step_ms,
            self.config.min_interval_ms,
        );
        if next != self.interval_ms {
            debug!(from_ms = self.interval_ms, to_ms = next, "gravity sped up");
            out.push(SessionEvent::IntervalChanged {
                from_ms: self.interval_ms,
                to_ms: next,
            });
            self.interval_ms = next;
        }

        self.spawn(out);
    }

    fn spawn(&mut self, out: &mut StepOutcome) {
        let (shape, kind) = random_piece(&mut self.draw);
        let (row, col) = (0, self.config.spawn_col());

        if !self.board.is_valid_position(&shape, row, col) {
            self.active = None;
            self.game_over = true;
            info!(
                kind = kind.as_str(),
                pieces = self.pieces_locked,
                lines = self.lines_cleared,
                "spawn blocked, game over"
            );
            out.push(SessionEvent::GameOver);
            return;
        }

        debug!(kind = kind.as_str(), "spawned");
        self.active = Some(ActivePiece {
            shape,
            kind,
            row,
            col,
        });
        out.push(SessionEvent::Spawned { kind });
    }
}

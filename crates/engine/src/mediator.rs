//! Mediator: feeds clock ticks and player input into a [`Session`]
//!
//! The mediator owns the session and the draw source. It does not own a timer either;
//! it only tells the runtime loop how long to wait before the next tick.

use std::time::Duration;

use tracing::{debug, info};

use crate::core::{GameSnapshot, PieceDraw, Result, Session, SessionConfig, SessionEvent, StepOutcome};
use crate::types::{Command, Event};

/// Totals from [`Mediator::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: usize,
    pub changed: usize,
    pub locks: usize,
    pub lines: usize,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Mediator<D> {
    session: Session<D>,
    ticks: u64,
    commands: u64,
}

impl<D: PieceDraw> Mediator<D> {
    pub fn new(config: SessionConfig, draw: D) -> Result<Self> {
        Ok(Self::from_session(Session::new(config, draw)?))
    }

    pub fn from_session(session: Session<D>) -> Self {
        Self {
            session,
            ticks: 0,
            commands: 0,
        }
    }

    pub fn session(&self) -> &Session<D> {
        &self.session
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    /// Ticks delivered since construction (including suppressed ones)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Commands delivered since construction (including ignored ones)
    pub fn commands(&self) -> u64 {
        self.commands
    }

    /// Delay the scheduler should use for the next tick
    ///
    /// `None` while paused or after game over: the timer is stopped.
    pub fn next_tick_delay(&self) -> Option<Duration> {
        if self.session.paused() || self.session.game_over() {
            return None;
        }
        Some(Duration::from_millis(u64::from(self.session.interval_ms())))
    }

    /// Time left before the next tick is due, given the time since the last one
    ///
    /// Zero means a tick is due now.
    pub fn time_until_tick(&self, since_last_tick: Duration) -> Option<Duration> {
        self.next_tick_delay()
            .map(|delay| delay.saturating_sub(since_last_tick))
    }

    pub fn dispatch(&mut self, event: Event) -> StepOutcome {
        match event {
            Event::Tick => self.on_tick(),
            Event::Command(command) => self.on_command(command),
            Event::Reset => self.on_reset(),
        }
    }

    pub fn on_tick(&mut self) -> StepOutcome {
        self.ticks += 1;
        let outcome = self.session.tick();
        self.observe(&outcome);
        outcome
    }

    pub fn on_command(&mut self, command: Command) -> StepOutcome {
        self.commands += 1;
        let outcome = self.session.command(command);
        self.observe(&outcome);
        outcome
    }

    pub fn on_reset(&mut self) -> StepOutcome {
        let outcome = self.session.reset();
        self.observe(&outcome);
        outcome
    }

    /// Deliver a whole event stream in order
    pub fn run<I>(&mut self, events: I) -> RunSummary
    where
        I: IntoIterator<Item = Event>,
    {
        let mut summary = RunSummary::default();
        for event in events {
            let outcome = self.dispatch(event);
            summary.events += 1;
            summary.changed += usize::from(outcome.changed);
            summary.locks += usize::from(outcome.locked());
            summary.lines += outcome.lines_cleared();
        }
        summary.game_over = self.session.game_over();
        summary
    }

    fn observe(&self, outcome: &StepOutcome) {
        for event in &outcome.events {
            match *event {
                SessionEvent::IntervalChanged { from_ms, to_ms } => {
                    debug!(from_ms, to_ms, "reschedule gravity");
                }
                SessionEvent::GameOver => {
                    info!(
                        ticks = self.ticks,
                        commands = self.commands,
                        lines = self.session.lines_cleared(),
                        "game over"
                    );
                }
                _ => {}
            }
        }
    }
}

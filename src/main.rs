//! Terminal runner (default binary).
//!
//! This is the integrator around the engine: it owns the clock, polls the keyboard,
//! and redraws the board. `headless` runs a key script without a terminal and prints
//! the resulting state as JSON.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use tracing::info;

use blockfall::core::{SessionConfig, SimpleRng};
use blockfall::engine::{parse_script, Mediator};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{GameView, TerminalRenderer};
use blockfall::types::{Event, DEFAULT_HEIGHT, DEFAULT_WIDTH, INITIAL_INTERVAL_MS};

/// Poll timeout while the gravity timer is stopped (paused or game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Falling-block puzzle in the terminal")]
struct Cli {
    /// Board width in cells
    #[arg(long, env = "BLOCKFALL_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: u16,

    /// Board height in cells
    #[arg(long, env = "BLOCKFALL_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: u16,

    /// Piece sequence seed (defaults to the clock)
    #[arg(long, env = "BLOCKFALL_SEED")]
    seed: Option<u32>,

    /// Starting gravity interval in milliseconds
    #[arg(long, env = "BLOCKFALL_INTERVAL_MS", default_value_t = INITIAL_INTERVAL_MS)]
    interval_ms: u32,

    /// Ignore move/rotate/drop input while paused
    #[arg(long)]
    pause_blocks_input: bool,

    /// Append debug logs to this file
    #[arg(long, env = "BLOCKFALL_LOG")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Play interactively (default)
    Play,
    /// Run a key script (L R D H U P . X) and print the final state as JSON
    Headless {
        #[arg(long, default_value = "")]
        script: String,
        /// Extra gravity ticks after the script
        #[arg(long, default_value_t = 0)]
        ticks: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let config = SessionConfig::new(cli.width, cli.height)
        .with_initial_interval_ms(cli.interval_ms)
        .with_accept_input_while_paused(!cli.pause_blocks_input);
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut mediator =
        Mediator::new(config, SimpleRng::new(seed)).context("invalid game configuration")?;
    info!(seed, width = cli.width, height = cli.height, "session started");

    match cli.mode.unwrap_or(Mode::Play) {
        Mode::Play => play(&mut mediator),
        Mode::Headless { script, ticks } => headless(&mut mediator, &script, ticks),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn headless(mediator: &mut Mediator<SimpleRng>, script: &str, ticks: u32) -> Result<()> {
    let events = parse_script(script).context("invalid --script")?;
    let extra = std::iter::repeat(Event::Tick).take(ticks as usize);
    let summary = mediator.run(events.into_iter().chain(extra));

    let report = serde_json::json!({
        "events": summary.events,
        "changed": summary.changed,
        "locks": summary.locks,
        "lines": summary.lines,
        "game_over": summary.game_over,
        "config": mediator.session().config(),
        "snapshot": mediator.snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn play(mediator: &mut Mediator<SimpleRng>) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, mediator);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mediator: &mut Mediator<SimpleRng>) -> Result<()> {
    let view = GameView::default();
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            term.draw(&view.render(&mediator.snapshot()))?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = mediator
            .time_until_tick(last_tick.elapsed())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(input) = handle_key_event(key) {
                        let was_running = mediator.next_tick_delay().is_some();
                        dirty |= mediator.dispatch(input).changed;
                        // A stopped timer restarts from zero when gravity resumes.
                        if !was_running && mediator.next_tick_delay().is_some() {
                            last_tick = Instant::now();
                        }
                    }
                }
                TermEvent::Resize(..) => dirty = true,
                _ => {}
            }
        }

        // Tick.
        if mediator.time_until_tick(last_tick.elapsed()) == Some(Duration::ZERO) {
            last_tick = Instant::now();
            dirty |= mediator.on_tick().changed;
        }
    }
}

//! Terminal memory game runner (default binary).
//!
//! crossterm for input, a framebuffer-based renderer for output, and a
//! fixed-timestep loop driving the session clock.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_memory::cli::Cli;
use tui_memory::core::{GameSnapshot, GameState, Session};
use tui_memory::input::{handle_key_event, should_quit};
use tui_memory::store::JsonFileStore;
use tui_memory::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_memory::tick_clock::TickClock;
use tui_memory::types::TICK_MS;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_path {
        init_logging(path)?;
    }

    let store = JsonFileStore::from_config(&cli.store_config());
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(
        difficulty = %cli.difficulty,
        seed,
        scores = %store.path().display(),
        "starting"
    );
    let session = Session::new(cli.difficulty, seed, store)?;
    let mut game_state = GameState::new(session);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game_state);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

fn run(term: &mut TerminalRenderer, game_state: &mut GameState<JsonFileStore>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut clock = TickClock::new(Instant::now(), Duration::from_millis(TICK_MS as u64));

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = clock.timeout(Instant::now());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Err(err) = game_state.apply_action(action) {
                            warn!(%err, ?action, "could not build a new board");
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if let Some(elapsed_ms) = clock.advance(Instant::now()) {
            game_state.tick(elapsed_ms);
        }
    }
}

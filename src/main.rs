//! Terminal runner (default binary).
//!
//! Fixed 16ms timestep: render, wait for input until the next tick, apply actions,
//! advance the session. The high-score ledger is saved on exit.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, warn};

use gioco::core::{GameSession, HighScoreLedger};
use gioco::input::{handle_key_event, should_quit};
use gioco::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gioco::types::TICK_MS;
use gioco::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let high_scores = match HighScoreLedger::load(&config.highscores_path) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!("ignoring unreadable high scores: {e}");
            HighScoreLedger::new()
        }
    };
    let mut session = GameSession::new(config.engine_config(), high_scores)
        .context("invalid board configuration")?;
    info!(
        "starting {}x{} session with seed {}",
        config.width,
        config.height,
        session.engine().seed()
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session);
    // Always try to restore terminal state.
    let _ = term.exit();

    session
        .high_scores()
        .save(&config.highscores_path)
        .context("saving high scores")?;
    result
}

/// Logs go to `GIOCO_LOG_PATH` when set. Otherwise only an explicit `RUST_LOG` enables
/// output, since stderr shares the screen with the game.
fn init_logging(config: &AppConfig) -> Result<()> {
    let mut builder = match &config.log_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    let _ = builder.format_timestamp_secs().try_init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = session.snapshot();

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}

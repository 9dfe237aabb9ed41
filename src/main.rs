//! Terminal 2048 runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout). Set `RUST_LOG` to see engine/store logs on
//! stderr.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::warn;

use tui_2048::core::SimpleRng;
use tui_2048::engine::{ActionResult, Engine};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::store::{ScoreRecord, Store};
use tui_2048::term::{FrameBuffer, GameView, ScorePanel, TerminalRenderer, Viewport};
use tui_2048::types::NEW_TILE_DELAY_MS;
use tui_2048::Config;

/// Poll interval while nothing is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let store = config.open_store().unwrap_or_else(|e| {
        warn!(
            "Cannot use data directory {}: {}; scores will not be saved",
            config.data_dir.display(),
            e
        );
        Store::in_memory()
    });
    let mut engine = Engine::open(store, SimpleRng::new(config.seed()));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let settle_delay = Duration::from_millis(NEW_TILE_DELAY_MS);

    // Set while a move has slid but its new tile is not placed yet.
    let mut settle_at: Option<Instant> = None;
    let mut history = load_history(engine);
    let mut best = engine.best_score();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let panel = ScorePanel {
            best,
            history: &history,
        };
        view.render_into(&engine.snapshot(), &panel, Viewport::new(w, h), &mut fb);
        term.draw(&mut fb)?;

        let timeout = settle_at
            .map(|t| t.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        // Persist a move that is still waiting for its tile.
                        engine.settle();
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match engine.apply(action) {
                            ActionResult::Moved(outcome) if outcome.moved => {
                                settle_at = Some(Instant::now() + settle_delay);
                            }
                            ActionResult::Moved(outcome) if outcome.game_over => {
                                history = load_history(engine);
                                best = engine.best_score();
                            }
                            ActionResult::Restarted => {
                                settle_at = None;
                                history = load_history(engine);
                                best = engine.best_score();
                            }
                            _ => {}
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if settle_at.is_some_and(|t| Instant::now() >= t) {
            settle_at = None;
            if engine.settle().is_some_and(|s| s.game_over) {
                history = load_history(engine);
                best = engine.best_score();
            }
        }
    }
}

fn load_history(engine: &Engine) -> Vec<u64> {
    engine
        .score_history()
        .iter()
        .map(ScoreRecord::score)
        .collect()
}

//! Terminal 2048 runner (default binary).
//!
//! Configuration comes from `TUI2048_SIZE`, `TUI2048_WIN_TILE` and
//! `TUI2048_SEED`; logging goes to stderr through `env_logger` (`RUST_LOG`,
//! default `warn`). Redirect stderr when raising the log level, or it will
//! draw over the board.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;
use rand::rngs::StdRng;

use tui_2048::core::{GameConfig, GameSnapshot, GameState};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::from_env().context("invalid TUI2048_* configuration")?;
    let mut game = GameState::from_config(config).context("failed to deal the first board")?;
    info!(
        "starting {}x{} game, goal {}, seed {:?}",
        config.size, config.size, config.win_tile, config.seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();

    if result.is_ok() && game.moves() > 0 {
        println!("{}", game.snapshot().summary());
    }
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState<StdRng>) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        match event::read().context("read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    game.apply_action(action);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

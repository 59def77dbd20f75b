//! Headless match-3 runner (default binary).
//!
//! Plays a level by always taking the first matching swap, advancing time in
//! fixed `TICK_MS` steps instead of sleeping. Usage:
//!
//! ```text
//! match3 [level.json]
//! ```
//!
//! Set `RUST_LOG=debug` to see every board and session event.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use match3::core::LevelConfig;
use match3::engine::{hint, Game, GameEvent};
use match3::types::{SessionEvent, TICK_MS};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let level = match std::env::args().nth(1) {
        Some(path) => LevelConfig::from_path(&path)
            .with_context(|| format!("failed to load level from {path}"))?,
        None => LevelConfig::default(),
    };

    let mut game = Game::new(level).context("invalid level configuration")?;
    run(&mut game)?;

    for row in game.board().grid().to_pattern() {
        println!("{row}");
    }
    println!("{}", game.snapshot().to_json()?);
    Ok(())
}

fn run(game: &mut Game) -> Result<()> {
    let report = game.start();
    info!(
        seed = game.level().seed,
        width = game.board().width(),
        height = game.board().height(),
        placed = report.placed,
        exhausted = report.exhausted.len(),
        "level started"
    );
    log_events(game)?;

    let mut elapsed_ms: u64 = 0;
    while !game.is_game_over() {
        let Some((a, b)) = hint::find_matching_swap(game.board().grid()) else {
            warn!(
                score = game.session().score(),
                moves_remaining = game.session().moves_remaining(),
                "no matching swap left on the board"
            );
            break;
        };

        game.try_swap(a, b).map_err(|rejection| {
            anyhow::anyhow!("swap {a:?}-{b:?} rejected: {}", rejection.message())
        })?;

        while game.board().is_resolving() {
            game.tick(TICK_MS);
            elapsed_ms += u64::from(TICK_MS);
        }
        log_events(game)?;
    }

    info!(
        state = ?game.state(),
        score = game.session().score(),
        moves_remaining = game.session().moves_remaining(),
        cycles = game.board().cycles_completed(),
        elapsed_ms,
        "run finished"
    );
    Ok(())
}

fn log_events(game: &mut Game) -> Result<()> {
    for event in game.drain_events() {
        if let GameEvent::Session(SessionEvent::ScoreChanged { score }) = event {
            info!(score, "score changed");
        }
        debug!(event = %serde_json::to_string(&event)?, "event");
    }
    Ok(())
}

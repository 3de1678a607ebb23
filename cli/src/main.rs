//! Duel - play the bundled games against the minimax engine
//!
//! Each side is either the engine (depth-bounded alpha-beta search with a
//! transposition table shared across its turns) or a human typing moves at
//! the terminal. The board is printed after every move.

use std::io;

use anyhow::Result;
use clap::Parser;
use engine_games::{GameKind, TextGame};
use games_connect4::Connect4;
use games_tictactoe::TicTacToe;
use tracing::info;

mod config;
mod human;
mod runner;

use crate::config::Config;
use crate::human::HumanInput;
use crate::runner::{run_match, MatchPlan};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn play<G: TextGame>(game: &G, plan: &MatchPlan) -> Result<()> {
    let stdin = io::stdin();
    let mut human = HumanInput::new(stdin.lock(), io::stdout());
    let mut out = io::stdout();
    run_match(game, plan, &mut human, &mut out)?;
    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;

    let kind = config.game_kind()?;
    let plan = MatchPlan {
        players: config.players()?,
        search: config.search_config()?,
        max_turns: config.max_turns(),
    };
    info!(
        game = %kind,
        depth = plan.search.depth,
        use_cache = plan.search.use_cache,
        depth_policy = %plan.search.depth_policy,
        root_window = %plan.search.root_window,
        "Starting duel"
    );

    match kind {
        GameKind::Connect4 => play(&Connect4::new(), &plan),
        GameKind::TicTacToe => play(&TicTacToe::new(), &plan),
    }
}

//! Command-line configuration for the duel binary
//!
//! Defaults come from config.toml (with `DUEL_<SECTION>_<KEY>` overrides).
//! CLI arguments take highest priority.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use engine_games::GameKind;
use minimax::{DepthPolicy, PlayerKind, RootWindow, SearchConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_game() -> String {
    CENTRAL_CONFIG.common.game.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_depth() -> u32 {
    CENTRAL_CONFIG.search.depth
}

fn default_depth_policy() -> String {
    CENTRAL_CONFIG.search.depth_policy.clone()
}

fn default_root_window() -> String {
    CENTRAL_CONFIG.search.root_window.clone()
}

fn default_red() -> String {
    CENTRAL_CONFIG.play.red.clone()
}

fn default_yellow() -> String {
    CENTRAL_CONFIG.play.yellow.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "duel")]
#[command(about = "Play Connect 4 or Tic-Tac-Toe against a minimax engine")]
#[command(
    long_about = "Runs a match between two players, each either the minimax engine or a
human typing moves at the terminal. The board is printed after every move.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Game to play (connect4, tictactoe)
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Search depth in plies for engine moves
    #[arg(long, default_value_t = default_depth())]
    pub depth: u32,

    /// Who plays the first side (engine, human)
    #[arg(long, default_value_t = default_red())]
    pub red: String,

    /// Who plays the second side (engine, human)
    #[arg(long, default_value_t = default_yellow())]
    pub yellow: String,

    /// Disable the transposition table
    #[arg(long)]
    pub no_cache: bool,

    /// Stop after this many moves
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Cache depth policy (exact, at_least)
    #[arg(long, default_value_t = default_depth_policy())]
    pub depth_policy: String,

    /// Root search window (fresh, shared)
    #[arg(long, default_value_t = default_root_window())]
    pub root_window: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.game_kind()?;
        self.players()?;
        self.search_config()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.max_turns == Some(0) {
            return Err(anyhow!("max_turns must be greater than 0"));
        }

        Ok(())
    }

    pub fn game_kind(&self) -> Result<GameKind> {
        Ok(self.game.parse()?)
    }

    /// Player kinds indexed by side, first mover first
    pub fn players(&self) -> Result<[PlayerKind; 2]> {
        let red = self.red.parse::<PlayerKind>().context("invalid --red")?;
        let yellow = self.yellow.parse::<PlayerKind>().context("invalid --yellow")?;
        Ok([red, yellow])
    }

    /// Turn limit from the command line, falling back to config.toml
    pub fn max_turns(&self) -> Option<u32> {
        self.max_turns.or(CENTRAL_CONFIG.play.max_turns)
    }

    pub fn search_config(&self) -> Result<SearchConfig> {
        let depth_policy: DepthPolicy = self.depth_policy.parse()?;
        let root_window: RootWindow = self.root_window.parse()?;
        let use_cache = CENTRAL_CONFIG.search.use_cache && !self.no_cache;

        Ok(SearchConfig::default()
            .with_depth(self.depth)
            .with_depth_policy(depth_policy)
            .with_root_window(root_window)
            .with_cache(use_cache)
            .with_cache_sizing(
                CENTRAL_CONFIG.search.cache_capacity,
                CENTRAL_CONFIG.search.max_load_factor,
            ))
    }
}

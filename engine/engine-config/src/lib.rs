//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the engine front ends.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`DUEL_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! DUEL_<SECTION>_<KEY>=value
//!
//! Examples:
//!     DUEL_COMMON_GAME=tictactoe
//!     DUEL_SEARCH_DEPTH=8
//!     DUEL_SEARCH_DEPTH_POLICY=at_least
//!     DUEL_MATCH_MAX_TURNS=20
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;

//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so the binary and the
//! checked-in file can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    #[serde(rename = "match")]
    play: MatchDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    game: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    depth: u32,
    use_cache: bool,
    cache_capacity: usize,
    max_load_factor: f64,
    depth_policy: String,
    root_window: String,
}

#[derive(Debug, Deserialize)]
struct MatchDefaults {
    red: String,
    yellow: String,
    #[serde(default)]
    max_turns: Option<u32>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn game() -> &'static str {
    &DEFAULTS.common.game
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn depth() -> u32 {
    DEFAULTS.search.depth
}
pub fn use_cache() -> bool {
    DEFAULTS.search.use_cache
}
pub fn cache_capacity() -> usize {
    DEFAULTS.search.cache_capacity
}
pub fn max_load_factor() -> f64 {
    DEFAULTS.search.max_load_factor
}
pub fn depth_policy() -> &'static str {
    &DEFAULTS.search.depth_policy
}
pub fn root_window() -> &'static str {
    &DEFAULTS.search.root_window
}

// Match
pub fn red() -> &'static str {
    &DEFAULTS.play.red
}
pub fn yellow() -> &'static str {
    &DEFAULTS.play.yellow
}
pub fn max_turns() -> Option<u32> {
    DEFAULTS.play.max_turns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(game(), "connect4");
        assert_eq!(log_level(), "info");
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(depth(), 6);
        assert!(use_cache());
        assert_eq!(cache_capacity(), 1024);
        assert!((max_load_factor() - 0.75).abs() < f64::EPSILON);
        assert_eq!(depth_policy(), "exact");
        assert_eq!(root_window(), "fresh");
    }

    #[test]
    fn test_match_defaults() {
        assert_eq!(red(), "human");
        assert_eq!(yellow(), "engine");
        assert_eq!(max_turns(), None);
    }
}

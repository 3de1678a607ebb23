//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_game() -> String {
    defaults::game().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_depth() -> u32 {
    defaults::depth()
}
fn d_use_cache() -> bool {
    defaults::use_cache()
}
fn d_cache_capacity() -> usize {
    defaults::cache_capacity()
}
fn d_max_load_factor() -> f64 {
    defaults::max_load_factor()
}
fn d_depth_policy() -> String {
    defaults::depth_policy().into()
}
fn d_root_window() -> String {
    defaults::root_window().into()
}
fn d_red() -> String {
    defaults::red().into()
}
fn d_yellow() -> String {
    defaults::yellow().into()
}
fn d_max_turns() -> Option<u32> {
    defaults::max_turns()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default, rename = "match")]
    pub play: MatchSettings,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_game")]
    pub game: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            game: defaults::game().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Engine search settings.
///
/// `depth_policy` and `root_window` are kept as strings here and parsed by
/// the search crate.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchSettings {
    #[serde(default = "d_depth")]
    pub depth: u32,
    #[serde(default = "d_use_cache")]
    pub use_cache: bool,
    #[serde(default = "d_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "d_max_load_factor")]
    pub max_load_factor: f64,
    #[serde(default = "d_depth_policy")]
    pub depth_policy: String,
    #[serde(default = "d_root_window")]
    pub root_window: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            depth: defaults::depth(),
            use_cache: defaults::use_cache(),
            cache_capacity: defaults::cache_capacity(),
            max_load_factor: defaults::max_load_factor(),
            depth_policy: defaults::depth_policy().into(),
            root_window: defaults::root_window().into(),
        }
    }
}

/// Who plays each side and how long a match may run
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MatchSettings {
    /// Player kind of the side moving first
    #[serde(default = "d_red")]
    pub red: String,
    /// Player kind of the side moving second
    #[serde(default = "d_yellow")]
    pub yellow: String,
    #[serde(default = "d_max_turns")]
    pub max_turns: Option<u32>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            red: defaults::red().into(),
            yellow: defaults::yellow().into(),
            max_turns: defaults::max_turns(),
        }
    }
}

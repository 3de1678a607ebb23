//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.game, "connect4");
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.play.red, "human");
    assert_eq!(config.play.yellow, "engine");
    assert_eq!(config.play.max_turns, None);
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.search.depth, 6);
    assert!(config.search.use_cache);
    assert_eq!(config.search.cache_capacity, 1024);
    assert!((config.search.max_load_factor - 0.75).abs() < f64::EPSILON);
    assert_eq!(config.search.depth_policy, "exact");
    assert_eq!(config.search.root_window, "fresh");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
game = "tictactoe"
log_level = "debug"

[search]
depth = 9
use_cache = false
depth_policy = "at_least"

[match]
red = "engine"
yellow = "engine"
max_turns = 20
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.game, "tictactoe");
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.search.depth, 9);
    assert!(!config.search.use_cache);
    assert_eq!(config.search.depth_policy, "at_least");
    assert_eq!(config.play.red, "engine");
    assert_eq!(config.play.max_turns, Some(20));
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[search]
depth = 4
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.search.depth, 4);
    assert!(config.search.use_cache); // Default
    assert_eq!(config.search.cache_capacity, 1024); // Default
    assert_eq!(config.common.game, "connect4"); // Default
    assert_eq!(config.play.yellow, "engine"); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[common]
game = "tictactoe"

[search]
cache_capacity = 4096
max_load_factor = 0.5
"#
    )
    .unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.common.game, "tictactoe");
    assert_eq!(config.search.cache_capacity, 4096);
    assert!((config.search.max_load_factor - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[search\ndepth = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.search.cache_capacity, 1024);
    assert_eq!(config.common.game, "connect4");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config.common.game, "connect4");
}

#[test]
fn test_search_env_overrides() {
    std::env::set_var("DUEL_SEARCH_DEPTH", "3");
    std::env::set_var("DUEL_SEARCH_ROOT_WINDOW", "shared");
    std::env::set_var("DUEL_SEARCH_USE_CACHE", "not-a-bool");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.search.depth, 3);
    assert_eq!(config.search.root_window, "shared");
    // Unparseable values leave the field alone
    assert!(config.search.use_cache);

    std::env::remove_var("DUEL_SEARCH_DEPTH");
    std::env::remove_var("DUEL_SEARCH_ROOT_WINDOW");
    std::env::remove_var("DUEL_SEARCH_USE_CACHE");
}

#[test]
fn test_match_env_overrides() {
    std::env::set_var("DUEL_MATCH_MAX_TURNS", "12");
    std::env::set_var("DUEL_MATCH_RED", "engine");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.play.max_turns, Some(12));
    assert_eq!(config.play.red, "engine");

    std::env::remove_var("DUEL_MATCH_MAX_TURNS");
    std::env::remove_var("DUEL_MATCH_RED");
}

#[test]
fn test_explicit_config_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[common]\nlog_level = \"trace\"").unwrap();

    std::env::set_var(CONFIG_PATH_ENV, file.path());
    let config = load_config();
    std::env::remove_var(CONFIG_PATH_ENV);

    assert_eq!(config.common.log_level, "trace");
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.game, cloned.common.game);
    assert_eq!(config.search.depth, cloned.search.depth);
}

//! Depth-bounded minimax search for two-player, zero-sum, perfect-information
//! games.
//!
//! This crate provides a game-agnostic searcher that works with any game
//! implementing the `engine-core` [`GameCapability`](engine_core::GameCapability)
//! trait.
//!
//! # Overview
//!
//! - [`minimax_ab`]: value of a position searched to a fixed depth with
//!   alpha-beta pruning
//! - [`get_best_move`]: best root move for the side to move
//! - [`TranspositionTable`]: generic fingerprint + equality keyed table,
//!   used as [`SearchCache`] to reuse values of repeated positions
//! - [`Match`] / [`play_match`]: turn loop between engine and external
//!   players
//!
//! # Usage
//!
//! ```rust
//! use minimax::{get_best_move, SearchCache};
//! use games_connect4::{Action, Connect4};
//! use engine_core::GameCapability;
//!
//! let game = Connect4::new();
//! let state = game.initial_state();
//! let mut cache = SearchCache::new();
//!
//! let best = get_best_move(&game, &state, 4, Some(&mut cache)).unwrap();
//! assert!(matches!(best, Some(Action::Drop(_))));
//! ```
//!
//! # Caching
//!
//! Cached values are tagged with the remaining depth they were computed at
//! and with the kind of bound the alpha-beta window produced. Under the
//! default [`DepthPolicy::Exact`] a cached search returns exactly what an
//! uncached search of the same depth returns.

pub mod config;
pub mod driver;
pub mod search;
pub mod stats;
pub mod transposition;


// Re-export main types
pub use config::{DepthPolicy, ParsePolicyError, RootWindow, SearchConfig};
pub use driver::{
    play_match, Match, MatchError, MatchOutcome, MatchResult, MoveSource, NoMoveSource,
    PlayerKind, Turn,
};
pub use search::{
    get_best_move, minimax_ab, Bound, CacheEntry, RootAnalysis, SearchCache, SearchError,
    Searcher, SCORE_INFINITY,
};
pub use stats::SearchStats;
pub use transposition::{TableStats, TranspositionTable};

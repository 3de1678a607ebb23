//! Minimax search with alpha-beta pruning.
//!
//! Scores are always from the `Max` side's point of view: `Max` nodes take
//! the largest child value, `Min` nodes the smallest. Pruning is fail-soft,
//! so a node cut off early returns a bound on its true value rather than a
//! clamped one. Children are visited in generation order and the first child
//! reaching an extremum keeps it.

use std::time::Instant;

use engine_core::{CapabilityError, GameCapability, MoveSequence, Side};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::{DepthPolicy, RootWindow, SearchConfig};
use crate::stats::SearchStats;
use crate::transposition::TranspositionTable;

/// Score bound used as the initial window. `-SCORE_INFINITY` is still
/// negatable.
pub const SCORE_INFINITY: i32 = i32::MAX;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves in a non-terminal position")]
    NoLegalMoves,

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

/// How a cached value relates to the true value of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The true value
    Exact,
    /// True value is at least this (search failed high)
    Lower,
    /// True value is at most this (search failed low)
    Upper,
}

/// Value stored in the transposition table for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: i32,
    /// Remaining depth the value was computed with
    pub depth: u32,
    pub bound: Bound,
    /// Terminal evaluations hold at any depth
    pub terminal: bool,
}

impl CacheEntry {
    /// Whether this entry answers a probe at `depth` within `(alpha, beta)`.
    pub fn usable(&self, depth: u32, alpha: i32, beta: i32, policy: DepthPolicy) -> bool {
        let depth_ok = self.terminal
            || match policy {
                DepthPolicy::Exact => self.depth == depth,
                DepthPolicy::AtLeast => self.depth >= depth,
            };
        depth_ok
            && match self.bound {
                Bound::Exact => true,
                Bound::Lower => self.value >= beta,
                Bound::Upper => self.value <= alpha,
            }
    }
}

/// Transposition table keyed by game state.
pub type SearchCache<S> = TranspositionTable<S, CacheEntry>;

/// Per-move scores at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct RootAnalysis<M> {
    pub best_move: M,
    pub best_value: i32,
    /// Every root move with its score, in generation order. With
    /// [`RootWindow::Shared`] only the best score is exact.
    pub scores: Vec<(M, i32)>,
}

/// Minimax searcher over one game.
pub struct Searcher<'g, G: GameCapability> {
    game: &'g G,
    config: SearchConfig,
    stats: SearchStats,
}

impl<'g, G: GameCapability> Searcher<'g, G> {
    pub fn new(game: &'g G, config: SearchConfig) -> Self {
        Self {
            game,
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn game(&self) -> &'g G {
        self.game
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters accumulated since creation or the last reset
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Minimax value of `state` searched `depth` plies deep within
    /// `(alpha, beta)`.
    ///
    /// Terminal states and `depth == 0` return the static evaluation. With a
    /// cache, usable entries short-circuit the search and every computed
    /// value is stored tagged with its depth and bound.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMoves`] when a non-terminal state below the
    /// depth horizon has no moves; capability errors from `apply_move`.
    pub fn minimax_ab(
        &mut self,
        state: &G::State,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        mut cache: Option<&mut SearchCache<G::State>>,
    ) -> Result<i32, SearchError> {
        let game = self.game;
        self.stats.nodes += 1;

        let fingerprint = cache.as_ref().map(|_| game.fingerprint(state));

        if let (Some(table), Some(fp)) = (cache.as_deref(), fingerprint) {
            self.stats.cache_probes += 1;
            let hit = table
                .lookup_hashed(fp, |k| game.states_equal(k, state))
                .copied();
            if let Some(entry) = hit {
                if entry.usable(depth, alpha, beta, self.config.depth_policy) {
                    self.stats.cache_hits += 1;
                    return Ok(entry.value);
                }
            }
        }

        let terminal = game.is_terminal(state);
        if terminal || depth == 0 {
            let value = game.evaluate(state);
            self.stats.leaf_evals += 1;
            if let (Some(table), Some(fp)) = (cache.as_deref_mut(), fingerprint) {
                self.store(
                    table,
                    fp,
                    state,
                    CacheEntry {
                        value,
                        depth,
                        bound: Bound::Exact,
                        terminal,
                    },
                );
            }
            return Ok(value);
        }

        let moves = game.generate_moves(state);
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let side = game.player_to_move(state);
        let (alpha_orig, beta_orig) = (alpha, beta);
        // Start past the window so an evaluation of i32::MIN or i32::MAX is still taken
        let mut best = match side {
            Side::Max => i32::MIN,
            Side::Min => i32::MAX,
        };

        for (index, mv) in moves.iter().enumerate() {
            let child = game.apply_move(state, mv)?;
            let value = self.minimax_ab(&child, depth - 1, alpha, beta, cache.as_deref_mut())?;

            match side {
                Side::Max => {
                    if value > best {
                        best = value;
                    }
                    alpha = alpha.max(best);
                }
                Side::Min => {
                    if value < best {
                        best = value;
                    }
                    beta = beta.min(best);
                }
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                trace!(
                    depth,
                    skipped = moves.len() - index - 1,
                    alpha,
                    beta,
                    "Alpha-beta cutoff"
                );
                break;
            }
        }

        if let (Some(table), Some(fp)) = (cache.as_deref_mut(), fingerprint) {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.store(
                table,
                fp,
                state,
                CacheEntry {
                    value: best,
                    depth,
                    bound,
                    terminal: false,
                },
            );
        }

        Ok(best)
    }

    /// Best move for the side to move, searched `depth` plies deep.
    ///
    /// Returns `Ok(None)` for terminal states. A `depth` of 0 is searched as
    /// depth 1 so that a move is always produced.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalMoves`] when `state` is not terminal but has no
    /// moves.
    pub fn get_best_move(
        &mut self,
        state: &G::State,
        depth: u32,
        cache: Option<&mut SearchCache<G::State>>,
    ) -> Result<Option<G::Move>, SearchError> {
        if self.game.is_terminal(state) {
            return Ok(None);
        }
        let moves = self.root_moves(state)?;
        let (index, _) = self.search_root(state, &moves, depth, cache, None)?;
        Ok(moves.get(index).cloned())
    }

    /// Like [`Searcher::get_best_move`], also reporting every root move's
    /// score.
    pub fn analyze(
        &mut self,
        state: &G::State,
        depth: u32,
        cache: Option<&mut SearchCache<G::State>>,
    ) -> Result<Option<RootAnalysis<G::Move>>, SearchError> {
        if self.game.is_terminal(state) {
            return Ok(None);
        }
        let moves = self.root_moves(state)?;
        let mut values = Vec::with_capacity(moves.len());
        let (index, best_value) =
            self.search_root(state, &moves, depth, cache, Some(&mut values))?;

        let scores: Vec<(G::Move, i32)> = moves.into_iter().zip(values).collect();
        let best_move = scores[index].0.clone();
        Ok(Some(RootAnalysis {
            best_move,
            best_value,
            scores,
        }))
    }

    fn root_moves(&self, state: &G::State) -> Result<MoveSequence<G::Move>, SearchError> {
        let moves = self.game.generate_moves(state);
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(moves)
    }

    /// Score each root move and return the index and value of the best.
    fn search_root(
        &mut self,
        state: &G::State,
        moves: &MoveSequence<G::Move>,
        depth: u32,
        mut cache: Option<&mut SearchCache<G::State>>,
        mut scores: Option<&mut Vec<i32>>,
    ) -> Result<(usize, i32), SearchError> {
        let start = Instant::now();
        let before = self.stats;
        let side = self.game.player_to_move(state);
        let child_depth = depth.max(1) - 1;
        let mut alpha = -SCORE_INFINITY;
        let mut beta = SCORE_INFINITY;
        let mut best: Option<(usize, i32)> = None;

        for (index, mv) in moves.iter().enumerate() {
            let child = self.game.apply_move(state, mv)?;
            let (a, b) = match self.config.root_window {
                RootWindow::Fresh => (-SCORE_INFINITY, SCORE_INFINITY),
                RootWindow::Shared => (alpha, beta),
            };
            let value = self.minimax_ab(&child, child_depth, a, b, cache.as_deref_mut())?;
            debug!(mv = ?mv, value, "Root move scored");

            if let Some(scores) = scores.as_mut() {
                scores.push(value);
            }

            let improves = match best {
                None => true,
                Some((_, current)) => match side {
                    Side::Max => value > current,
                    Side::Min => value < current,
                },
            };
            if improves {
                best = Some((index, value));
                match side {
                    Side::Max => alpha = value,
                    Side::Min => beta = value,
                }
            }
        }

        let (index, value) = best.ok_or(SearchError::NoLegalMoves)?;
        let mut spent = self.stats;
        spent.nodes -= before.nodes;
        spent.cache_hits -= before.cache_hits;
        info!(
            depth,
            side = ?side,
            best_index = index,
            value,
            nodes = spent.nodes,
            cache_hits = spent.cache_hits,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );
        Ok((index, value))
    }

    fn store(
        &mut self,
        table: &mut SearchCache<G::State>,
        fingerprint: u64,
        state: &G::State,
        entry: CacheEntry,
    ) {
        let game = self.game;
        table.store_hashed(fingerprint, state.clone(), entry, |k| {
            game.states_equal(k, state)
        });
        self.stats.cache_stores += 1;
    }
}

/// Minimax value of `state` with the default [`SearchConfig`].
///
/// See [`Searcher::minimax_ab`].
pub fn minimax_ab<G: GameCapability>(
    game: &G,
    state: &G::State,
    depth: u32,
    alpha: i32,
    beta: i32,
    cache: Option<&mut SearchCache<G::State>>,
) -> Result<i32, SearchError> {
    Searcher::new(game, SearchConfig::default()).minimax_ab(state, depth, alpha, beta, cache)
}

/// Best move for the side to move with the default [`SearchConfig`].
///
/// See [`Searcher::get_best_move`].
pub fn get_best_move<G: GameCapability>(
    game: &G,
    state: &G::State,
    depth: u32,
    cache: Option<&mut SearchCache<G::State>>,
) -> Result<Option<G::Move>, SearchError> {
    Searcher::new(game, SearchConfig::default()).get_best_move(state, depth, cache)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: i32, depth: u32, bound: Bound) -> CacheEntry {
        CacheEntry {
            value,
            depth,
            bound,
            terminal: false,
        }
    }

    #[test]
    fn test_exact_depth_policy() {
        let e = entry(5, 3, Bound::Exact);
        assert!(e.usable(3, -10, 10, DepthPolicy::Exact));
        assert!(!e.usable(2, -10, 10, DepthPolicy::Exact));
        assert!(!e.usable(4, -10, 10, DepthPolicy::Exact));
    }

    #[test]
    fn test_at_least_depth_policy() {
        let e = entry(5, 3, Bound::Exact);
        assert!(e.usable(2, -10, 10, DepthPolicy::AtLeast));
        assert!(e.usable(3, -10, 10, DepthPolicy::AtLeast));
        assert!(!e.usable(4, -10, 10, DepthPolicy::AtLeast));
    }

    #[test]
    fn test_terminal_entries_ignore_depth() {
        let e = CacheEntry {
            terminal: true,
            ..entry(100, 0, Bound::Exact)
        };
        assert!(e.usable(7, -SCORE_INFINITY, SCORE_INFINITY, DepthPolicy::Exact));
    }

    #[test]
    fn test_bounds_need_a_cutoff() {
        let lower = entry(8, 2, Bound::Lower);
        assert!(lower.usable(2, 0, 8, DepthPolicy::Exact));
        assert!(!lower.usable(2, 0, 9, DepthPolicy::Exact));

        let upper = entry(-3, 2, Bound::Upper);
        assert!(upper.usable(2, -3, 5, DepthPolicy::Exact));
        assert!(!upper.usable(2, -4, 5, DepthPolicy::Exact));
    }

    #[test]
    fn test_infinity_is_negatable() {
        assert_eq!(-(-SCORE_INFINITY), SCORE_INFINITY);
        assert!(-SCORE_INFINITY > i32::MIN);
    }
}

//! Turn-by-turn match driver.
//!
//! Each turn the side to move either asks the engine for its best move or
//! asks an external [`MoveSource`] (a human at a terminal, a scripted
//! opponent). The move is applied, the state advanced, and the turn reported
//! to a callback. One transposition table serves every engine turn.

use std::fmt;
use std::str::FromStr;

use engine_core::{CapabilityError, GameCapability, Side};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ParsePolicyError, SearchConfig};
use crate::search::{SearchCache, SearchError, Searcher};
use crate::stats::SearchStats;

/// Errors that end a match early.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("No move source available for {0:?}")]
    NoMoveSource(Side),

    #[error("Move input aborted: {0}")]
    Aborted(String),
}

/// Who controls a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Engine,
    Human,
}

impl FromStr for PlayerKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "engine" | "computer" | "ai" => Ok(PlayerKind::Engine),
            "human" => Ok(PlayerKind::Human),
            _ => Err(ParsePolicyError::new("player kind", s)),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Engine => write!(f, "engine"),
            PlayerKind::Human => write!(f, "human"),
        }
    }
}

/// Supplies moves for sides not played by the engine.
pub trait MoveSource<G: GameCapability> {
    /// Next move for the side to move in `state`.
    fn next_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, MatchError>;
}

/// Move source for engine-only matches; asking it is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMoveSource;

impl<G: GameCapability> MoveSource<G> for NoMoveSource {
    fn next_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, MatchError> {
        Err(MatchError::NoMoveSource(game.player_to_move(state)))
    }
}

/// One completed turn, passed to the turn callback.
#[derive(Debug)]
pub struct Turn<'a, G: GameCapability> {
    /// 1-based turn number
    pub number: u32,
    pub side: Side,
    pub player: PlayerKind,
    pub mv: &'a G::Move,
    /// State after the move
    pub state: &'a G::State,
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Winner(Side),
    Draw,
    /// Turn limit reached before a terminal state
    Unfinished,
}

/// Final state and history of a match.
#[derive(Debug)]
pub struct MatchOutcome<G: GameCapability> {
    pub final_state: G::State,
    /// Moves in play order
    pub moves: Vec<G::Move>,
    pub result: MatchResult,
    pub turns: u32,
    /// Search counters summed over every engine turn
    pub stats: SearchStats,
}

impl<G: GameCapability> MatchOutcome<G> {
    pub fn winner(&self) -> Option<Side> {
        match self.result {
            MatchResult::Winner(side) => Some(side),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.result == MatchResult::Draw
    }
}

/// Classify a terminal state by the sign of its exact score.
fn terminal_result<G: GameCapability>(game: &G, state: &G::State) -> MatchResult {
    match game.evaluate(state) {
        v if v > 0 => MatchResult::Winner(Side::Max),
        v if v < 0 => MatchResult::Winner(Side::Min),
        _ => MatchResult::Draw,
    }
}

/// A match between two players over one game.
pub struct Match<'g, G: GameCapability> {
    searcher: Searcher<'g, G>,
    players: [PlayerKind; 2],
    max_turns: Option<u32>,
    cache: Option<SearchCache<G::State>>,
}

impl<'g, G: GameCapability> Match<'g, G> {
    /// Create a match. `players` is indexed by [`Side::index`] (`Max` first).
    pub fn new(game: &'g G, config: SearchConfig, players: [PlayerKind; 2]) -> Self {
        let cache = config
            .use_cache
            .then(|| SearchCache::with_config(config.cache_capacity, config.max_load_factor));
        Self {
            searcher: Searcher::new(game, config),
            players,
            max_turns: None,
            cache,
        }
    }

    /// Stop after `max_turns` moves even if the game is not over.
    pub fn with_max_turns(mut self, max_turns: Option<u32>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Table shared by the engine turns, if caching is enabled
    pub fn cache(&self) -> Option<&SearchCache<G::State>> {
        self.cache.as_ref()
    }

    /// Play from `initial` until a terminal state or the turn limit.
    pub fn play<S, F>(
        &mut self,
        initial: G::State,
        source: &mut S,
        mut on_turn: F,
    ) -> Result<MatchOutcome<G>, MatchError>
    where
        S: MoveSource<G>,
        F: FnMut(&Turn<'_, G>),
    {
        let game = self.searcher.game();
        let depth = self.searcher.config().depth;
        let mut state = initial;
        let mut moves = Vec::new();
        let mut turns = 0u32;
        let mut stats = SearchStats::default();

        info!(
            game = %game.metadata().id,
            depth,
            players = ?self.players,
            "Match started"
        );

        while !game.is_terminal(&state) {
            if self.max_turns.is_some_and(|limit| turns >= limit) {
                debug!(turns, "Turn limit reached");
                break;
            }

            let side = game.player_to_move(&state);
            let player = self.players[side.index()];
            let mv = match player {
                PlayerKind::Engine => {
                    self.searcher.reset_stats();
                    let best = self
                        .searcher
                        .get_best_move(&state, depth, self.cache.as_mut())?
                        .ok_or(SearchError::NoLegalMoves)?;
                    stats.merge(self.searcher.stats());
                    best
                }
                PlayerKind::Human => source.next_move(game, &state)?,
            };

            let next = game.apply_move(&state, &mv)?;
            turns += 1;
            info!(turn = turns, side = ?side, player = ?player, mv = ?mv, "Move played");
            on_turn(&Turn {
                number: turns,
                side,
                player,
                mv: &mv,
                state: &next,
            });

            state = next;
            moves.push(mv);
        }

        let result = if game.is_terminal(&state) {
            terminal_result(game, &state)
        } else {
            MatchResult::Unfinished
        };
        info!(
            turns,
            result = ?result,
            nodes = stats.nodes,
            cache_entries = self.cache.as_ref().map_or(0, |c| c.len()),
            "Match finished"
        );

        Ok(MatchOutcome {
            final_state: state,
            moves,
            result,
            turns,
            stats,
        })
    }
}

/// Play a full match with a fresh table built from `config`.
pub fn play_match<G, S, F>(
    game: &G,
    initial: G::State,
    players: [PlayerKind; 2],
    config: SearchConfig,
    source: &mut S,
    on_turn: F,
) -> Result<MatchOutcome<G>, MatchError>
where
    G: GameCapability,
    S: MoveSource<G>,
    F: FnMut(&Turn<'_, G>),
{
    Match::new(game, config, players).play(initial, source, on_turn)
}

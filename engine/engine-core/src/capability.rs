//! Game capability trait consumed by the search engine
//!
//! A capability bundles every operation the minimax engine needs in order to
//! search a game without knowing its rules: move generation, move
//! application, terminal detection, static evaluation, side-to-move, and the
//! fingerprint/equality pair used by the transposition table.
//!
//! States and moves are plain owned values. Cloning goes through [`Clone`]
//! and release happens on drop, so the engine never pairs allocations by
//! hand.

use std::fmt::Debug;

use crate::game_utils::mix64;
use crate::metadata::GameMetadata;
use crate::moves::MoveSequence;

/// Which side is to move at a node.
///
/// `Max` nodes maximize the evaluation, `Min` nodes minimize it. The sign of
/// [`GameCapability::evaluate`] is fixed relative to `Max`: positive scores
/// favor the `Max` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Maximizing side (`+1`)
    Max,
    /// Minimizing side (`-1`)
    Min,
}

impl Side {
    /// Numeric tag of this side: `+1` for `Max`, `-1` for `Min`.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Side::Max => 1,
            Side::Min => -1,
        }
    }

    /// The other side.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    /// Parse a numeric tag (`+1` / `-1`) back into a side.
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            1 => Some(Side::Max),
            -1 => Some(Side::Min),
            _ => None,
        }
    }

    /// Index of this side in two-element per-player arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Max => 0,
            Side::Min => 1,
        }
    }
}

/// 64-bit digest of a value, used as a transposition-table bucket key.
///
/// Equal values must produce equal fingerprints. Distinct values may collide,
/// so every fingerprint match is confirmed with an equality check.
pub trait Fingerprint {
    fn fingerprint(&self) -> u64;
}

macro_rules! impl_fingerprint_for_ints {
    ($($ty:ty),*) => {
        $(
            impl Fingerprint for $ty {
                #[inline]
                fn fingerprint(&self) -> u64 {
                    mix64(*self as u64)
                }
            }
        )*
    };
}

impl_fingerprint_for_ints!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

/// Error type for capability operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Operations a game must supply for the generic search engine.
///
/// Implementations are constructed once and shared by reference through the
/// whole search; every method takes `&self`.
///
/// # Example
///
/// ```rust
/// use engine_core::{CapabilityError, Fingerprint, GameCapability, GameMetadata, MoveSequence, Side};
///
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Pile {
///     stones: u32,
///     max_to_move: bool,
/// }
///
/// impl Fingerprint for Pile {
///     fn fingerprint(&self) -> u64 {
///         ((self.stones as u64) << 1) | self.max_to_move as u64
///     }
/// }
///
/// /// Take one or two stones; whoever takes the last stone wins.
/// #[derive(Debug)]
/// struct Nim;
///
/// impl GameCapability for Nim {
///     type State = Pile;
///     type Move = u32;
///
///     fn metadata(&self) -> GameMetadata {
///         GameMetadata::new("nim", "Nim")
///     }
///
///     fn initial_state(&self) -> Pile {
///         Pile { stones: 5, max_to_move: true }
///     }
///
///     fn generate_moves(&self, state: &Pile) -> MoveSequence<u32> {
///         (1..=2).filter(|&take| take <= state.stones).collect()
///     }
///
///     fn apply_move(&self, state: &Pile, take: &u32) -> Result<Pile, CapabilityError> {
///         if *take == 0 || *take > state.stones {
///             return Err(CapabilityError::IllegalMove(format!("take {}", take)));
///         }
///         Ok(Pile {
///             stones: state.stones - take,
///             max_to_move: !state.max_to_move,
///         })
///     }
///
///     fn is_terminal(&self, state: &Pile) -> bool {
///         state.stones == 0
///     }
///
///     fn evaluate(&self, state: &Pile) -> i32 {
///         match (state.stones, state.max_to_move) {
///             // The side that just moved took the last stone
///             (0, true) => -1,
///             (0, false) => 1,
///             _ => 0,
///         }
///     }
///
///     fn player_to_move(&self, state: &Pile) -> Side {
///         if state.max_to_move { Side::Max } else { Side::Min }
///     }
/// }
///
/// let nim = Nim;
/// let start = nim.initial_state();
/// assert_eq!(nim.generate_moves(&start).len(), 2);
/// ```
pub trait GameCapability: Debug {
    /// Position snapshot. Treated as immutable once constructed.
    type State: Clone + Eq + Fingerprint + Debug;

    /// Transition between positions.
    type Move: Clone + PartialEq + Debug;

    /// Display-oriented metadata about the game
    fn metadata(&self) -> GameMetadata;

    /// Starting position of a new game
    fn initial_state(&self) -> Self::State;

    /// Every legal move for the side to move, in a fixed generation order.
    ///
    /// An empty sequence means there are no legal moves.
    fn generate_moves(&self, state: &Self::State) -> MoveSequence<Self::Move>;

    /// Successor of `state` after `mv`. `state` itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::IllegalMove`] when `mv` is not legal in
    /// `state`.
    fn apply_move(
        &self,
        state: &Self::State,
        mv: &Self::Move,
    ) -> Result<Self::State, CapabilityError>;

    /// True once the game has ended (win, loss, draw, or no moves left)
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Static heuristic or exact terminal score; positive favors [`Side::Max`]
    fn evaluate(&self, state: &Self::State) -> i32;

    /// Side to move at this node
    fn player_to_move(&self, state: &Self::State) -> Side;

    /// Cache key digest. Must agree with [`GameCapability::states_equal`].
    fn fingerprint(&self, state: &Self::State) -> u64 {
        state.fingerprint()
    }

    /// Exact position equality, applied to every fingerprint match.
    fn states_equal(&self, a: &Self::State, b: &Self::State) -> bool {
        a == b
    }
}

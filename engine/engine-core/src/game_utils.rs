//! Shared utilities for two-player game implementations
//!
//! This module provides common functionality used across multiple game
//! implementations: winner codes, exact terminal scoring, Zobrist keys, and
//! a 64-bit mixer for integer fingerprints.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::capability::Side;

/// Winner codes stored in game states.
///
/// Cell values use the same numbering: `1` is a `Max` piece, `2` a `Min`
/// piece, `0` an empty cell.
pub mod winner {
    /// Game still in progress
    pub const NONE: u8 = 0;
    /// The `Max` side won
    pub const MAX: u8 = 1;
    /// The `Min` side won
    pub const MIN: u8 = 2;
    /// Board full with no winner
    pub const DRAW: u8 = 3;
}

/// Map a winner code to the winning side, `None` for draws and ongoing games.
#[inline]
pub fn winner_side(code: u8) -> Option<Side> {
    match code {
        winner::MAX => Some(Side::Max),
        winner::MIN => Some(Side::Min),
        _ => None,
    }
}

/// Piece code (`1` / `2`) of a side
#[inline]
pub fn piece_of(side: Side) -> u8 {
    match side {
        Side::Max => winner::MAX,
        Side::Min => winner::MIN,
    }
}

/// Exact score of a finished game from the `Max` side's point of view.
///
/// # Arguments
/// * `winner` - Winner code (see [`winner`])
/// * `win_score` - Base magnitude of a win
/// * `speed_bonus` - Added to the magnitude so that quicker wins (more empty
///   cells left) outrank slower ones
///
/// # Example
/// ```
/// use engine_core::game_utils::{terminal_score, winner};
///
/// assert_eq!(terminal_score(winner::MAX, 1000, 5), 1005);
/// assert_eq!(terminal_score(winner::MIN, 1000, 5), -1005);
/// assert_eq!(terminal_score(winner::DRAW, 1000, 0), 0);
/// ```
#[inline]
pub fn terminal_score(winner: u8, win_score: i32, speed_bonus: i32) -> i32 {
    match winner_side(winner) {
        Some(side) => side.sign() * (win_score + speed_bonus),
        None => 0,
    }
}

/// SplitMix64 finalizer: spreads the bits of `x` over the whole word.
#[inline]
pub fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Zobrist keys for a board of `cells` cells holding two kinds of pieces.
///
/// Keys come from a seeded ChaCha20 stream so fingerprints are identical
/// across runs and platforms.
#[derive(Debug, Clone)]
pub struct ZobristKeys {
    pieces: Vec<[u64; 2]>,
    min_to_move: u64,
}

impl ZobristKeys {
    /// Generate keys for `cells` cells from `seed`
    pub fn new(cells: usize, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let pieces = (0..cells).map(|_| [rng.gen(), rng.gen()]).collect();
        Self {
            pieces,
            min_to_move: rng.gen(),
        }
    }

    /// Number of cells covered
    pub fn cells(&self) -> usize {
        self.pieces.len()
    }

    /// Key for a piece of `side` on `cell`
    #[inline]
    pub fn piece(&self, cell: usize, side: Side) -> u64 {
        self.pieces[cell][side.index()]
    }

    /// Key toggled when `Min` is to move
    #[inline]
    pub fn min_to_move(&self) -> u64 {
        self.min_to_move
    }

    /// Full hash of a board using the `0` / `1` / `2` cell encoding.
    pub fn hash_board(&self, board: &[u8], to_move: Side) -> u64 {
        debug_assert!(board.len() <= self.pieces.len());
        let mut hash = board
            .iter()
            .enumerate()
            .fold(0u64, |acc, (cell, &piece)| match winner_side(piece) {
                Some(side) => acc ^ self.piece(cell, side),
                None => acc,
            });
        if to_move == Side::Min {
            hash ^= self.min_to_move;
        }
        hash
    }
}

//! Core traits and types for the Duel game engine
//!
//! This crate provides the fundamental abstractions shared by the search
//! engine and the games it plays:
//! - `GameCapability`: Trait a game implements so the engine can search it
//! - `Side`: Maximizing / minimizing side to move
//! - `MoveSequence`: Ordered moves produced by one node expansion
//! - `Fingerprint`: 64-bit digest used as a transposition-table key
//! - `GameMetadata`: Display information for drivers

pub mod board_game;
pub mod capability;
pub mod game_utils;
pub mod metadata;
pub mod moves;

// Re-export main types for convenience
pub use board_game::{render_grid, RowOrder};
pub use capability::{CapabilityError, Fingerprint, GameCapability, Side};
pub use game_utils::ZobristKeys;
pub use metadata::GameMetadata;
pub use moves::MoveSequence;

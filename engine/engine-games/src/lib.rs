//! Runtime game selection for the Duel engine
//!
//! The search is generic over [`GameCapability`], so each game is a distinct
//! type at compile time. Front ends that pick a game from a config string go
//! through [`GameKind`] and then dispatch to a generic function with the
//! concrete type. [`TextGame`] adds the text surface a terminal driver needs:
//! rendering a position and reading a move typed by a person.
//!
//! # Usage
//!
//! ```rust
//! use engine_games::{GameKind, TextGame};
//! use engine_core::GameCapability;
//! use games_connect4::Connect4;
//!
//! let kind: GameKind = "connect4".parse().unwrap();
//! assert_eq!(kind, GameKind::Connect4);
//!
//! let game = Connect4::new();
//! let mv = game.parse_move("3").unwrap();
//! let state = game.apply_move(&game.initial_state(), &mv).unwrap();
//! assert!(game.render(&state).contains('R'));
//! ```

use std::fmt;
use std::str::FromStr;

use engine_core::{CapabilityError, GameCapability};
use games_connect4::{Connect4, COLS};
use games_tictactoe::TicTacToe;
use thiserror::Error;

/// Returned when a game name does not match any bundled game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown game '{0}', expected one of: connect4, tictactoe")]
pub struct UnknownGame(pub String);

/// The games bundled with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Connect4,
    TicTacToe,
}

impl GameKind {
    /// Every bundled game, in display order
    pub const ALL: [GameKind; 2] = [GameKind::Connect4, GameKind::TicTacToe];

    /// Canonical id, matching [`GameMetadata::id`](engine_core::GameMetadata)
    pub fn id(&self) -> &'static str {
        match self {
            GameKind::Connect4 => "connect4",
            GameKind::TicTacToe => "tictactoe",
        }
    }
}

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "connect4" | "connect-4" | "connect_four" | "c4" => Ok(GameKind::Connect4),
            "tictactoe" | "tic-tac-toe" | "tic_tac_toe" | "ttt" => Ok(GameKind::TicTacToe),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Text surface of a game, used by interactive drivers.
pub trait TextGame: GameCapability {
    /// Human-readable board
    fn render(&self, state: &Self::State) -> String;

    /// Parse a move typed by a player.
    ///
    /// Only the syntax and range are checked here; whether the move is legal
    /// in the current position is up to `apply_move`.
    fn parse_move(&self, input: &str) -> Result<Self::Move, CapabilityError>;

    /// Short description of the expected input, for prompts
    fn move_hint(&self) -> &'static str;
}

fn parse_index(input: &str, limit: u8, what: &str) -> Result<u8, CapabilityError> {
    let trimmed = input.trim();
    match trimmed.parse::<u8>() {
        Ok(index) if index < limit => Ok(index),
        _ => Err(CapabilityError::IllegalMove(format!(
            "'{}' is not a {} (0-{})",
            trimmed,
            what,
            limit - 1
        ))),
    }
}

impl TextGame for Connect4 {
    fn render(&self, state: &games_connect4::State) -> String {
        state.to_string()
    }

    fn parse_move(&self, input: &str) -> Result<games_connect4::Action, CapabilityError> {
        parse_index(input, COLS as u8, "column").map(games_connect4::Action::Drop)
    }

    fn move_hint(&self) -> &'static str {
        "column 0-6"
    }
}

impl TextGame for TicTacToe {
    fn render(&self, state: &games_tictactoe::State) -> String {
        state.to_string()
    }

    fn parse_move(&self, input: &str) -> Result<games_tictactoe::Action, CapabilityError> {
        parse_index(input, 9, "position").map(games_tictactoe::Action::Place)
    }

    fn move_hint(&self) -> &'static str {
        "position 0-8, left to right, top to bottom"
    }
}

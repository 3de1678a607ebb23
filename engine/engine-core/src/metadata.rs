//! Game metadata for display and configuration
//!
//! This module provides display-oriented metadata about games that drivers
//! and the CLI use to label boards and players.

use crate::capability::Side;

/// Metadata about a game for display
///
/// A text driver uses it to label the game and its players and to lay out
/// the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    /// Game identifier (e.g., "tictactoe", "connect4")
    pub id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe", "Connect 4")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Display names indexed by [`Side::index`] (e.g., ["X", "O"] or ["Red", "Yellow"])
    pub player_names: [String; 2],

    /// Single-character symbols indexed by [`Side::index`]
    pub player_symbols: [char; 2],

    /// Brief description of the game rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            player_symbols: ['1', '2'],
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for player information, `Max` side first
    pub fn with_players(mut self, names: [&str; 2], symbols: [char; 2]) -> Self {
        self.player_names = [names[0].to_string(), names[1].to_string()];
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Display name of the given side
    pub fn player_name(&self, side: Side) -> &str {
        &self.player_names[side.index()]
    }

    /// Board symbol of the given side
    pub fn player_symbol(&self, side: Side) -> char {
        self.player_symbols[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = GameMetadata::new("connect4", "Connect 4")
            .with_board(7, 6)
            .with_players(["Red", "Yellow"], ['R', 'Y'])
            .with_description("Drop discs to connect four in a row!");

        assert_eq!(meta.id, "connect4");
        assert_eq!(meta.board_size(), 42);
        assert_eq!(meta.player_name(Side::Max), "Red");
        assert_eq!(meta.player_name(Side::Min), "Yellow");
        assert_eq!(meta.player_symbol(Side::Min), 'Y');
    }

    #[test]
    fn test_metadata_defaults() {
        let meta = GameMetadata::new("test", "Test Game");
        assert_eq!(meta.board_size(), 0);
        assert_eq!(meta.player_names[0], "Player 1");
        assert_eq!(meta.player_symbols, ['1', '2']);
        assert!(meta.description.is_empty());
    }
}

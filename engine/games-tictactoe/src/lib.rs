//! TicTacToe game implementation for the Duel engine
//!
//! This crate provides a small, fully searchable reference implementation of
//! [`GameCapability`]. The whole game tree fits in a depth-9 search, which
//! makes it the standard fixture for checking search correctness.
//!
//! X moves first and is the maximizing side.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameCapability;
//! use games_tictactoe::{Action, TicTacToe};
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//! let next = game.apply_move(&state, &Action::Place(4)).unwrap();
//! assert_eq!(game.generate_moves(&next).len(), 8);
//! ```

use std::fmt;

use engine_core::game_utils::{mix64, terminal_score, winner, winner_side};
use engine_core::{
    render_grid, CapabilityError, Fingerprint, GameCapability, GameMetadata, MoveSequence,
    RowOrder, Side,
};

/// Base magnitude of a won position; quicker wins add the number of empty
/// cells on top.
pub const WIN_SCORE: i32 = 100;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: winner::NONE,
        }
    }

    /// Play `positions` in order from the initial state.
    pub fn from_moves(positions: &[u8]) -> Result<Self, CapabilityError> {
        positions
            .iter()
            .try_fold(Self::new(), |state, &pos| state.make_move(pos))
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != winner::NONE
    }

    /// Winner code (see [`engine_core::game_utils::winner`])
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Winning side, `None` for draws and ongoing games
    pub fn winning_side(&self) -> Option<Side> {
        winner_side(self.winner)
    }

    /// Side whose turn it is
    pub fn side_to_move(&self) -> Side {
        if self.current_player == 1 {
            Side::Max
        } else {
            Side::Min
        }
    }

    /// Raw board, top-left first
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// Number of empty cells
    pub fn empty_cells(&self) -> usize {
        self.board.iter().filter(|&&cell| cell == 0).count()
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> Result<State, CapabilityError> {
        if self.is_done() {
            return Err(CapabilityError::IllegalMove(format!(
                "position {}: game is over",
                position
            )));
        }
        if position >= 9 {
            return Err(CapabilityError::IllegalMove(format!(
                "position {} out of range 0-8",
                position
            )));
        }
        if self.board[position as usize] != 0 {
            return Err(CapabilityError::IllegalMove(format!(
                "position {} is occupied",
                position
            )));
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == winner::NONE {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        Ok(new_state)
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return winner::DRAW;
        }

        winner::NONE
    }

    /// Open-line count: lines holding only X pieces minus lines holding only
    /// O pieces, two-piece lines weighted 3.
    fn heuristic(&self) -> i32 {
        LINES
            .iter()
            .map(|line| {
                let xs = line.iter().filter(|&&i| self.board[i] == 1).count();
                let os = line.iter().filter(|&&i| self.board[i] == 2).count();
                match (xs, os) {
                    (2, 0) => 3,
                    (1, 0) => 1,
                    (0, 2) => -3,
                    (0, 1) => -1,
                    _ => 0,
                }
            })
            .sum()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprint for State {
    /// Base-3 board code with the side to move in the low bit, mixed.
    fn fingerprint(&self) -> u64 {
        let code = self
            .board
            .iter()
            .fold(0u64, |acc, &cell| acc * 3 + cell as u64);
        mix64(code * 2 + (self.current_player as u64 - 1))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_grid(
            &self.board,
            3,
            3,
            RowOrder::TopDown,
            ['X', 'O'],
            '.',
            false,
        ))
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a piece at the given position (0-8)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.position())
    }
}

/// TicTacToe game implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }
}

impl GameCapability for TicTacToe {
    type State = State;
    type Move = Action;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(3, 3)
            .with_players(["X", "O"], ['X', 'O'])
            .with_description("Get three in a row to win!")
    }

    fn initial_state(&self) -> State {
        State::new()
    }

    fn generate_moves(&self, state: &State) -> MoveSequence<Action> {
        state.legal_moves().into_iter().map(Action::Place).collect()
    }

    fn apply_move(&self, state: &State, mv: &Action) -> Result<State, CapabilityError> {
        state.make_move(mv.position())
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn evaluate(&self, state: &State) -> i32 {
        if state.is_done() {
            return terminal_score(state.winner, WIN_SCORE, state.empty_cells() as i32);
        }
        state.heuristic()
    }

    fn player_to_move(&self, state: &State) -> Side {
        state.side_to_move()
    }
}

#[cfg(test)]
mod tests;

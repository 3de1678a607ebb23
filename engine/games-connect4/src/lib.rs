//! Connect 4 game implementation for the Duel engine
//!
//! Connect 4 is a two-player connection game where players drop colored discs
//! into a 7-column, 6-row vertically suspended grid. The objective is to be
//! the first to form a horizontal, vertical, or diagonal line of four discs.
//!
//! Red moves first and is the maximizing side.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameCapability;
//! use games_connect4::{Action, Connect4};
//!
//! let game = Connect4::new();
//! let state = game.initial_state();
//! let next = game.apply_move(&state, &Action::Drop(3)).unwrap();
//! assert_eq!(game.generate_moves(&next).len(), 7);
//! ```

use std::fmt;

use engine_core::game_utils::{piece_of, terminal_score, winner, winner_side};
use engine_core::{
    render_grid, CapabilityError, Fingerprint, GameCapability, GameMetadata, MoveSequence,
    RowOrder, Side, ZobristKeys,
};
use once_cell::sync::Lazy;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Base magnitude of a won position; quicker wins add the number of empty
/// cells on top.
pub const WIN_SCORE: i32 = 100_000;

/// Heuristic weights
const CENTER_WEIGHT: i32 = 3;
const THREE_OPEN: i32 = 5;
const TWO_OPEN: i32 = 2;
const OPPONENT_THREE_OPEN: i32 = 4;

const ZOBRIST_SEED: u64 = 0xC0_4E_C7_04;

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| ZobristKeys::new(BOARD_SIZE, ZOBRIST_SEED));

/// Every line of four cells on the board
static WINDOWS: Lazy<Vec<[usize; 4]>> = Lazy::new(|| {
    let mut windows = Vec::with_capacity(69);
    let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    for row in 0..ROWS as i32 {
        for col in 0..COLS as i32 {
            for (dc, dr) in directions {
                let end_col = col + 3 * dc;
                let end_row = row + 3 * dr;
                if !(0..COLS as i32).contains(&end_col) || !(0..ROWS as i32).contains(&end_row) {
                    continue;
                }
                let mut window = [0usize; 4];
                for (step, cell) in window.iter_mut().enumerate() {
                    let step = step as i32;
                    *cell = State::pos((col + step * dc) as usize, (row + step * dr) as usize);
                }
                windows.push(window);
            }
        }
    }
    windows
});

/// Connect4 game state
///
/// Represents the complete state of a Connect4 game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=Red (player 1), 2=Yellow (player 2)
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Current player: 1=Red, 2=Yellow
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=Red, 2=Yellow, 3=draw
    winner: u8,
    /// Height of each column (0-6 means number of pieces in column)
    column_heights: [u8; COLS],
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // Red goes first
            winner: winner::NONE,
            column_heights: [0; COLS],
        }
    }

    /// Play `columns` in order from the initial state.
    pub fn from_moves(columns: &[u8]) -> Result<Self, CapabilityError> {
        columns
            .iter()
            .try_fold(Self::new(), |state, &col| state.drop_piece(col))
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != winner::NONE
    }

    /// Winner code (see [`engine_core::game_utils::winner`])
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Side whose turn it is
    pub fn side_to_move(&self) -> Side {
        if self.current_player == 1 {
            Side::Max
        } else {
            Side::Min
        }
    }

    /// Raw board, row 0 first
    pub fn board(&self) -> &[u8; BOARD_SIZE] {
        &self.board
    }

    /// Piece at (col, row): 0 empty, 1 Red, 2 Yellow
    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.board[Self::pos(col, row)]
    }

    /// Number of pieces on the board
    pub fn moves_played(&self) -> usize {
        self.column_heights.iter().map(|&h| h as usize).sum()
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Drop a piece in the given column and return the new state
    pub fn drop_piece(&self, column: u8) -> Result<State, CapabilityError> {
        let col = column as usize;

        if self.is_done() {
            return Err(CapabilityError::IllegalMove(format!(
                "column {}: game is over",
                column
            )));
        }
        if col >= COLS {
            return Err(CapabilityError::IllegalMove(format!(
                "column {} out of range 0-{}",
                column,
                COLS - 1
            )));
        }
        if self.column_heights[col] >= ROWS as u8 {
            return Err(CapabilityError::IllegalMove(format!(
                "column {} is full",
                column
            )));
        }

        let mut new_state = self.clone();
        let row = self.column_heights[col] as usize;

        // Place the piece
        new_state.board[Self::pos(col, row)] = self.current_player;
        new_state.column_heights[col] += 1;

        // Check for winner
        new_state.winner = new_state.check_winner_at(col, row);

        // Switch player if game not over
        if new_state.winner == winner::NONE {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        Ok(new_state)
    }

    /// Check if the piece at (col, row) creates a winning line
    fn check_winner_at(&self, col: usize, row: usize) -> u8 {
        let player = self.board[Self::pos(col, row)];
        if player == 0 {
            return winner::NONE;
        }

        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dc, dr) in directions {
            let count = 1
                + self.run_length(col, row, dc, dr, player)
                + self.run_length(col, row, -dc, -dr, player);
            if count >= 4 {
                return player;
            }
        }

        // Check for draw (board full but no winner)
        if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            return winner::DRAW;
        }

        winner::NONE
    }

    /// Consecutive `player` pieces starting one step from (col, row)
    fn run_length(&self, col: usize, row: usize, dc: i32, dr: i32, player: u8) -> usize {
        let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
        let mut count = 0;
        while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
            if self.board[Self::pos(c as usize, r as usize)] != player {
                break;
            }
            count += 1;
            c += dc;
            r += dr;
        }
        count
    }

    /// Heuristic score of an ongoing position, positive favoring Red.
    fn heuristic(&self) -> i32 {
        self.side_score(piece_of(Side::Max)) - self.side_score(piece_of(Side::Min))
    }

    fn side_score(&self, piece: u8) -> i32 {
        let opponent = if piece == 1 { 2 } else { 1 };
        let center_col = COLS / 2;
        let center = (0..ROWS)
            .filter(|&row| self.cell(center_col, row) == piece)
            .count() as i32;

        let windows: i32 = WINDOWS
            .iter()
            .map(|window| {
                let mut own = 0;
                let mut theirs = 0;
                for &cell in window {
                    match self.board[cell] {
                        p if p == piece => own += 1,
                        p if p == opponent => theirs += 1,
                        _ => {}
                    }
                }
                let empty = 4 - own - theirs;
                match (own, theirs, empty) {
                    (3, 0, 1) => THREE_OPEN,
                    (2, 0, 2) => TWO_OPEN,
                    (0, 3, 1) => -OPPONENT_THREE_OPEN,
                    _ => 0,
                }
            })
            .sum();

        center * CENTER_WEIGHT + windows
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprint for State {
    fn fingerprint(&self) -> u64 {
        ZOBRIST.hash_board(&self.board, self.side_to_move())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_grid(
            &self.board,
            COLS,
            ROWS,
            RowOrder::BottomUp,
            ['R', 'Y'],
            '.',
            true,
        ))
    }
}

/// Connect4 action - drop a piece in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Drop a piece in the given column (0-6)
    Drop(u8),
}

impl Action {
    /// Get the column for this action
    pub fn column(&self) -> u8 {
        match self {
            Action::Drop(col) => *col,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.column())
    }
}

/// Connect4 game implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct Connect4;

impl Connect4 {
    /// Create a new Connect4 game
    pub fn new() -> Self {
        Self
    }
}

impl GameCapability for Connect4 {
    type State = State;
    type Move = Action;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("connect4", "Connect 4")
            .with_board(COLS, ROWS)
            .with_players(["Red", "Yellow"], ['R', 'Y'])
            .with_description("Drop discs to connect four in a row!")
    }

    fn initial_state(&self) -> State {
        State::new()
    }

    fn generate_moves(&self, state: &State) -> MoveSequence<Action> {
        state.legal_moves().into_iter().map(Action::Drop).collect()
    }

    fn apply_move(&self, state: &State, mv: &Action) -> Result<State, CapabilityError> {
        state.drop_piece(mv.column())
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn evaluate(&self, state: &State) -> i32 {
        if state.is_done() {
            let empty = (BOARD_SIZE - state.moves_played()) as i32;
            return terminal_score(state.winner, WIN_SCORE, empty);
        }
        state.heuristic()
    }

    fn player_to_move(&self, state: &State) -> Side {
        state.side_to_move()
    }
}

/// Winning side of a finished game, `None` for draws and ongoing games
pub fn winning_side(state: &State) -> Option<Side> {
    winner_side(state.winner)
}

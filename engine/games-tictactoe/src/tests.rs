use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;

fn play(positions: &[u8]) -> State {
    State::from_moves(positions).unwrap()
}

/// Every state reachable from the initial position
fn reachable_states() -> Vec<State> {
    let mut seen = vec![State::new()];
    let mut frontier = vec![State::new()];
    while let Some(state) = frontier.pop() {
        for pos in state.legal_moves() {
            let next = state.make_move(pos).unwrap();
            if !seen.contains(&next) {
                seen.push(next);
                frontier.push(next);
            }
        }
    }
    seen
}

#[test]
fn test_initial_state() {
    let state = State::new();
    assert_eq!(state.board, [0; 9]);
    assert_eq!(state.current_player, 1);
    assert_eq!(state.winner, 0);
    assert!(!state.is_done());
    assert_eq!(state.side_to_move(), Side::Max);
}

#[test]
fn test_legal_moves() {
    let state = State::new();
    let legal = state.legal_moves();
    assert_eq!(legal, (0..9).collect::<Vec<_>>());

    // After one move
    let state = state.make_move(4).unwrap(); // Center
    let legal = state.legal_moves();
    assert_eq!(legal.len(), 8);
    assert!(!legal.contains(&4));
}

#[test]
fn test_make_move() {
    let state = State::new();
    let new_state = state.make_move(4).unwrap(); // X places in center

    assert_eq!(new_state.board[4], 1);
    assert_eq!(new_state.current_player, 2); // Now O's turn
    assert_eq!(new_state.side_to_move(), Side::Min);
    assert!(!new_state.is_done());
}

#[test]
fn test_invalid_move() {
    let state = State::new().make_move(4).unwrap();

    let err = state.make_move(4).unwrap_err();
    assert_eq!(err.to_string(), "Illegal move: position 4 is occupied");
    assert!(matches!(
        state.make_move(9),
        Err(CapabilityError::IllegalMove(_))
    ));
}

#[test]
fn test_winning_game() {
    // X wins with top row
    let state = play(&[0, 3, 1, 4, 2]);

    assert_eq!(state.winner, 1);
    assert_eq!(state.winning_side(), Some(Side::Max));
    assert!(state.is_done());
    assert!(state.legal_moves().is_empty());
}

#[test]
fn test_o_wins() {
    // O takes the middle column
    let state = play(&[0, 1, 2, 4, 8, 7]);
    assert_eq!(state.winner, 2);
    assert_eq!(state.winning_side(), Some(Side::Min));
    assert_eq!(TicTacToe::new().evaluate(&state), -(WIN_SCORE + 3));
}

#[test]
fn test_draw_game() {
    // X O X / X O O / O X X
    let state = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(state.winner, 3);
    assert!(state.is_done());
    assert_eq!(state.winning_side(), None);
    assert_eq!(TicTacToe::new().evaluate(&state), 0);
}

/// All 8 winning lines should be detected correctly
#[test]
fn test_all_winning_lines() {
    for (line_idx, line) in LINES.iter().enumerate() {
        // Test X wins on this line
        let mut board_x = [0u8; 9];
        for &pos in line {
            board_x[pos] = 1; // X
        }
        let winner = State::check_winner(&board_x);
        assert_eq!(winner, 1, "X should win on line {}: {:?}", line_idx, line);

        // Test O wins on this line
        let mut board_o = [0u8; 9];
        for &pos in line {
            board_o[pos] = 2; // O
        }
        let winner = State::check_winner(&board_o);
        assert_eq!(winner, 2, "O should win on line {}: {:?}", line_idx, line);
    }
}

/// Legal moves are exactly the empty cells
#[test]
fn test_legal_moves_match_empty_cells() {
    let boards = [
        [0, 0, 0, 0, 0, 0, 0, 0, 0], // Empty
        [1, 0, 0, 0, 0, 0, 0, 0, 0], // One move
        [1, 2, 1, 2, 0, 0, 0, 0, 0], // Four moves
        [1, 2, 1, 2, 1, 2, 0, 0, 0], // Six moves
        [1, 2, 1, 2, 1, 2, 2, 1, 0], // Eight moves
    ];

    for board in &boards {
        let state = State {
            board: *board,
            current_player: 1,
            winner: 0,
        };

        let legal = state.legal_moves();
        let empty: Vec<u8> = (0..9u8).filter(|&pos| board[pos as usize] == 0).collect();
        assert_eq!(legal, empty, "board {:?}", board);
    }
}

/// Draw detection: full board with no winner
#[test]
fn test_draw_detection_comprehensive() {
    let draw_boards = [
        [1, 2, 1, 1, 2, 2, 2, 1, 1], // X O X / X O O / O X X
        [1, 2, 1, 2, 1, 1, 2, 1, 2], // X O X / O X X / O X O
        [2, 1, 2, 2, 1, 1, 1, 2, 2], // O X O / O X X / X O O
    ];

    for board in &draw_boards {
        let winner = State::check_winner(board);
        assert_eq!(winner, 3, "Should detect draw for board {:?}", board);

        let state = State {
            board: *board,
            current_player: 1,
            winner,
        };
        assert!(state.is_done());
        assert!(state.legal_moves().is_empty());
    }
}

/// No moves allowed on finished game
#[test]
fn test_no_moves_after_game_over() {
    let state = State {
        board: [1, 1, 1, 2, 2, 0, 0, 0, 0],
        current_player: 2,
        winner: 1, // X won
    };

    assert!(state.is_done());
    assert!(state.legal_moves().is_empty());
    assert!(state.make_move(5).is_err());
    assert!(TicTacToe::new().generate_moves(&state).is_empty());
}

#[test]
fn test_heuristic() {
    let game = TicTacToe::new();
    assert_eq!(game.evaluate(&State::new()), 0);

    // Center touches four lines
    assert_eq!(game.evaluate(&play(&[4])), 4);
    // Corner touches three
    assert_eq!(game.evaluate(&play(&[0])), 3);
    // X center + O corner: X keeps three open lines, O two
    assert_eq!(game.evaluate(&play(&[4, 0])), 1);
}

#[test]
fn test_quicker_wins_score_higher() {
    let game = TicTacToe::new();
    let quick = play(&[0, 3, 1, 4, 2]);
    let slow = play(&[0, 4, 8, 2, 6, 3, 7]);
    assert_eq!(slow.winner, 1);
    assert_eq!(game.evaluate(&quick), WIN_SCORE + 4);
    assert_eq!(game.evaluate(&slow), WIN_SCORE + 2);
}

#[test]
fn test_fingerprints_are_unique_over_reachable_states() {
    let states = reachable_states();
    // Known count of distinct reachable positions
    assert_eq!(states.len(), 5478);

    let mut by_fingerprint: HashMap<u64, State> = HashMap::new();
    for state in states {
        if let Some(other) = by_fingerprint.insert(state.fingerprint(), state) {
            panic!("Fingerprint collision: {:?} vs {:?}", other, state);
        }
    }
}

#[test]
fn test_transpositions_share_fingerprint() {
    let a = play(&[0, 4, 8]);
    let b = play(&[8, 4, 0]);
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_display() {
    assert_eq!(play(&[0, 4]).to_string(), "X . .\n. O .\n. . .\n");
}

#[test]
fn test_metadata() {
    let meta = TicTacToe::new().metadata();
    assert_eq!(meta.id, "tictactoe");
    assert_eq!(meta.display_name, "Tic-Tac-Toe");
    assert_eq!(meta.board_size(), 9);
    assert_eq!(meta.player_symbol(Side::Min), 'O');
}

#[test]
fn test_random_games_invariants() {
    let game = TicTacToe::new();

    for seed in 0..50 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = game.initial_state();
        let mut move_count = 0;

        while !game.is_terminal(&state) {
            let moves = game.generate_moves(&state);
            assert!(
                !moves.is_empty(),
                "Non-terminal game must have legal moves (seed={})",
                seed
            );
            assert_eq!(moves.len(), state.empty_cells());

            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            let prev_side = game.player_to_move(&state);
            state = game.apply_move(&state, &mv).unwrap();
            move_count += 1;

            if game.is_terminal(&state) {
                match state.winning_side() {
                    Some(side) => {
                        assert_eq!(side, prev_side, "Winner must be the mover (seed={})", seed);
                        assert_eq!(game.evaluate(&state).signum(), side.sign());
                    }
                    None => assert_eq!(state.empty_cells(), 0, "seed={}", seed),
                }
            } else {
                assert_ne!(game.player_to_move(&state), prev_side);
                assert!(game.evaluate(&state).abs() < WIN_SCORE);
            }
        }

        assert!((5..=9).contains(&move_count), "seed={}", seed);
    }
}

//! Moves typed at the terminal

use std::io::{BufRead, Write};

use engine_games::TextGame;
use minimax::{MatchError, MoveSource};

/// Reads moves line by line, re-prompting until the input is a legal move.
///
/// `q` or `quit` (or end of input) aborts the match.
pub struct HumanInput<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanInput<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn io_error(err: std::io::Error) -> MatchError {
        MatchError::Aborted(format!("terminal I/O failed: {}", err))
    }
}

impl<G, R, W> MoveSource<G> for HumanInput<R, W>
where
    G: TextGame,
    R: BufRead,
    W: Write,
{
    fn next_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, MatchError> {
        let meta = game.metadata();
        let side = game.player_to_move(state);
        let legal = game.generate_moves(state);

        loop {
            write!(
                self.output,
                "{} ({}) to move, enter {}: ",
                meta.player_name(side),
                meta.player_symbol(side),
                game.move_hint()
            )
            .map_err(Self::io_error)?;
            self.output.flush().map_err(Self::io_error)?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(Self::io_error)?;
            if read == 0 {
                return Err(MatchError::Aborted("end of input".to_string()));
            }

            let line = line.trim();
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Err(MatchError::Aborted("player quit".to_string()));
            }

            match game.parse_move(line) {
                Ok(mv) if legal.contains(&mv) => return Ok(mv),
                Ok(mv) => {
                    writeln!(self.output, "{:?} is not playable here", mv).map_err(Self::io_error)?
                }
                Err(err) => writeln!(self.output, "{}", err).map_err(Self::io_error)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::GameCapability;
    use games_connect4::{Action, Connect4};
    use std::io::Cursor;

    fn source(input: &str) -> HumanInput<Cursor<Vec<u8>>, Vec<u8>> {
        HumanInput::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_a_legal_move() {
        let game = Connect4::new();
        let mut human = source("3\n");
        let mv = human.next_move(&game, &game.initial_state()).unwrap();
        assert_eq!(mv, Action::Drop(3));

        let prompt = String::from_utf8(human.output).unwrap();
        assert!(prompt.starts_with("Red (R) to move"));
    }

    #[test]
    fn reprompts_after_bad_input() {
        let game = Connect4::new();
        let mut full = games_connect4::State::new();
        for _ in 0..6 {
            full = full.drop_piece(0).unwrap();
        }

        let mut human = source("banana\n0\n9\n2\n");
        let mv = human.next_move(&game, &full).unwrap();
        assert_eq!(mv, Action::Drop(2));

        let transcript = String::from_utf8(human.output).unwrap();
        assert!(transcript.contains("'banana' is not a column"));
        assert!(transcript.contains("Drop(0) is not playable here"));
        assert!(transcript.contains("'9' is not a column"));
    }

    #[test]
    fn quit_and_end_of_input_abort() {
        let game = Connect4::new();
        let state = game.initial_state();

        let err = source("quit\n").next_move(&game, &state).unwrap_err();
        assert!(matches!(err, MatchError::Aborted(_)));

        let err = source("").next_move(&game, &state).unwrap_err();
        assert_eq!(err.to_string(), "Move input aborted: end of input");
    }
}

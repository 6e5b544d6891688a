use rand::RngCore;

use crate::error::{Error, Result};
use crate::game::{check_action, check_state, Game, Outcome, Player, State, Transition};

const CELLS: usize = 9;

/// Every row, column and diagonal of the board
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [0, 3, 6],
    [0, 4, 8],
    [1, 4, 7],
    [2, 4, 6],
    [2, 5, 8],
    [3, 4, 5],
    [6, 7, 8],
];

/// Tic-Tac-Toe.
///
/// State: the nine cells in row-major order; 0 is empty, 1 and -1 are the
/// first and second player's marks.
/// Actions: board position to play in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// The player to move: first when the marks balance out
    pub fn to_move(state: &State) -> Player {
        let sum: i32 = state.as_slice().iter().map(|v| *v as i32).sum();
        if sum == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    fn winner(board: &[i8], player: Player) -> bool {
        let mark = player.sign();
        LINES
            .iter()
            .any(|line| line.iter().all(|cell| board[*cell] == mark))
    }
}

impl Game for TicTacToe {
    fn name(&self) -> &'static str {
        "tic-tac-toe"
    }

    fn description(&self) -> &'static str {
        "Tic-Tac-Toe. State: all 9 positions in order. Actions: board position to play in."
    }

    fn action_count(&self) -> usize {
        CELLS
    }

    fn start(&self, _rng: &mut dyn RngCore) -> State {
        State::new(vec![0; CELLS])
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        check_state(self.name(), state, CELLS, -1, 1)?;
        Ok(state.as_slice().iter().map(|cell| *cell == 0).collect())
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        check_state(self.name(), state, CELLS, -1, 1)?;
        check_action(self.name(), action, CELLS)?;
        if state[action] != 0 {
            return Err(Error::invalid_action(
                self.name(),
                action,
                format!("cell is taken on {}", state),
            ));
        }

        let player = Self::to_move(state);
        let mut board = state.as_slice().to_vec();
        board[action] = player.sign();

        if Self::winner(&board, player) {
            return Ok(Transition::Finished(Outcome::won_by(player)));
        }
        if !board.contains(&0) {
            return Ok(Transition::Finished(Outcome::Draw));
        }
        Ok(Transition::Continue {
            state: State::new(board),
            next_player: player.opponent(),
        })
    }

    fn human(&self, state: &State) -> String {
        state
            .as_slice()
            .chunks(3)
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                format!("\n{}", cells.join(" "))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> Transition {
        let game = TicTacToe;
        let mut state = State::new(vec![0; CELLS]);
        let mut last = None;
        for action in moves {
            let transition = game.step(&state, *action).unwrap();
            if let Transition::Continue { state: next, .. } = &transition {
                state = next.clone();
            }
            last = Some(transition);
        }
        last.unwrap()
    }

    #[test]
    fn test_players_alternate() {
        let state = State::new(vec![0; CELLS]);
        assert_eq!(TicTacToe::to_move(&state), Player::First);
        match TicTacToe.step(&state, 4).unwrap() {
            Transition::Continue { state, next_player } => {
                assert_eq!(next_player, Player::Second);
                assert_eq!(TicTacToe::to_move(&state), Player::Second);
                assert_eq!(state[4], 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_first_player_row_wins() {
        assert_eq!(play(&[0, 3, 1, 4, 2]), Transition::Finished(Outcome::FirstWon));
    }

    #[test]
    fn test_second_player_diagonal_wins() {
        assert_eq!(play(&[1, 2, 3, 4, 8, 6]), Transition::Finished(Outcome::FirstLost));
    }

    #[test]
    fn test_full_board_is_a_draw() {
        // X O X / X O O / O X X
        assert_eq!(
            play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]),
            Transition::Finished(Outcome::Draw)
        );
    }

    #[test]
    fn test_taken_cell_is_rejected() {
        let mut board = vec![0; CELLS];
        board[4] = 1;
        let result = TicTacToe.step(&State::new(board), 4);
        assert!(matches!(result, Err(Error::InvalidAction { action: 4, .. })));
    }

    #[test]
    fn test_human_rows() {
        let state = State::new(vec![1, 0, -1, 0, 1, 0, 0, 0, -1]);
        assert_eq!(TicTacToe.human(&state), "\n1 0 -1\n0 1 0\n0 0 -1");
    }
}

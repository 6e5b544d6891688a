use rand::RngCore;

use crate::error::Result;
use crate::game::{check_action, check_state, Game, Outcome, Player, State, Transition};

/// Marker for "first player has not chosen yet"
const UNCHOSEN: i8 = -1;

/// Turn-based Rock-Paper-Scissors. The second player sees the first
/// player's choice, so it should always win.
///
/// State: -1 before the first move, else the first player's choice.
/// Actions: 0 rock, 1 paper, 2 scissors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RockPaperScissors;

impl Game for RockPaperScissors {
    fn name(&self) -> &'static str {
        "rock-paper-scissors"
    }

    fn description(&self) -> &'static str {
        "Turn-based Rock-Paper-Scissors (second player should always win). Actions: 0 rock, 1 paper, 2 scissors."
    }

    fn action_count(&self) -> usize {
        3
    }

    fn start(&self, _rng: &mut dyn RngCore) -> State {
        State::new(vec![UNCHOSEN])
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        check_state(self.name(), state, 1, UNCHOSEN, 2)?;
        Ok(vec![true; 3])
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        check_state(self.name(), state, 1, UNCHOSEN, 2)?;
        check_action(self.name(), action, 3)?;

        let first = state[0];
        if first == UNCHOSEN {
            return Ok(Transition::Continue {
                state: State::new(vec![action as i8]),
                next_player: Player::Second,
            });
        }

        let second = action as i8;
        let outcome = if first == second {
            Outcome::Draw
        } else if first == (second + 2) % 3 {
            // second's choice beats the one before it
            Outcome::FirstLost
        } else {
            Outcome::FirstWon
        };
        Ok(Transition::Finished(outcome))
    }

    fn human(&self, state: &State) -> String {
        match state.as_slice() {
            [-1] => "Start".to_string(),
            [0] => "Rock".to_string(),
            [1] => "Paper".to_string(),
            [2] => "Scissors".to_string(),
            _ => state.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROCK: usize = 0;
    const PAPER: usize = 1;
    const SCISSORS: usize = 2;

    fn finish(first: usize, second: usize) -> Outcome {
        let game = RockPaperScissors;
        let state = match game.step(&State::new(vec![UNCHOSEN]), first).unwrap() {
            Transition::Continue { state, next_player } => {
                assert_eq!(next_player, Player::Second);
                state
            }
            other => panic!("first move should not finish: {:?}", other),
        };
        game.step(&state, second).unwrap().outcome().unwrap()
    }

    #[test]
    fn test_second_player_can_always_win() {
        assert_eq!(finish(ROCK, PAPER), Outcome::FirstLost);
        assert_eq!(finish(PAPER, SCISSORS), Outcome::FirstLost);
        assert_eq!(finish(SCISSORS, ROCK), Outcome::FirstLost);
    }

    #[test]
    fn test_first_player_wins_and_draws() {
        assert_eq!(finish(PAPER, ROCK), Outcome::FirstWon);
        assert_eq!(finish(SCISSORS, PAPER), Outcome::FirstWon);
        assert_eq!(finish(ROCK, SCISSORS), Outcome::FirstWon);
        assert_eq!(finish(ROCK, ROCK), Outcome::Draw);
    }

    #[test]
    fn test_human_names() {
        let game = RockPaperScissors;
        assert_eq!(game.human(&State::new(vec![-1])), "Start");
        assert_eq!(game.human(&State::new(vec![2])), "Scissors");
    }
}

use rand::RngCore;

use crate::error::Result;
use crate::game::{check_action, check_state, Game, Outcome, Player, State, Transition};

/// Target number that wins the game
const GOAL: i8 = 2;

/// Count up from 0.
///
/// State: last number counted (starts at 0).
/// Action: next number to count.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl Game for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn description(&self) -> &'static str {
        "Count up from 0. State: last number counted. Action: next number to count."
    }

    fn action_count(&self) -> usize {
        3
    }

    fn start(&self, _rng: &mut dyn RngCore) -> State {
        State::new(vec![0])
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        check_state(self.name(), state, 1, 0, GOAL)?;
        Ok(vec![true; self.action_count()])
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        check_state(self.name(), state, 1, 0, GOAL)?;
        check_action(self.name(), action, self.action_count())?;

        let action = action as i8;
        if state[0] + 1 != action {
            return Ok(Transition::Finished(Outcome::FirstLost));
        }
        if action == GOAL {
            return Ok(Transition::Finished(Outcome::FirstWon));
        }
        Ok(Transition::Continue {
            state: State::new(vec![action]),
            next_player: Player::First,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_to_two_wins() {
        let game = Count;
        let mut rng = rand::thread_rng();
        let state = game.start(&mut rng);
        assert_eq!(state.as_slice(), &[0]);

        let next = game.step(&state, 1).unwrap();
        let state = match next {
            Transition::Continue { state, next_player } => {
                assert_eq!(next_player, Player::First);
                state
            }
            other => panic!("expected game to continue, got {:?}", other),
        };
        assert_eq!(game.step(&state, 2).unwrap(), Transition::Finished(Outcome::FirstWon));
    }

    #[test]
    fn test_skipping_a_number_loses() {
        let game = Count;
        let state = State::new(vec![0]);
        assert_eq!(game.step(&state, 2).unwrap(), Transition::Finished(Outcome::FirstLost));
        assert_eq!(game.step(&state, 0).unwrap(), Transition::Finished(Outcome::FirstLost));
    }

    #[test]
    fn test_out_of_range_action_is_an_error() {
        assert!(Count.step(&State::new(vec![0]), 3).is_err());
        assert!(Count.valid(&State::new(vec![0, 1])).is_err());
    }
}

use rand::RngCore;

use crate::error::{Error, Result};
use crate::game::{check_action, check_state, Game, Outcome, Player, State, Transition};

/// Fewer choices every step.
///
/// State: number of choices in this step.
/// Action: number of choices in the next step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Narrow;

impl Narrow {
    const CHOICES: i8 = 3;
}

impl Game for Narrow {
    fn name(&self) -> &'static str {
        "narrow"
    }

    fn description(&self) -> &'static str {
        "Fewer choices every step. State: choices in this step. Action: choices in the next step."
    }

    fn action_count(&self) -> usize {
        Self::CHOICES as usize
    }

    fn start(&self, _rng: &mut dyn RngCore) -> State {
        State::new(vec![Self::CHOICES])
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        check_state(self.name(), state, 1, 1, Self::CHOICES)?;
        Ok((0..self.action_count())
            .map(|i| (i as i8) < state[0])
            .collect())
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        check_state(self.name(), state, 1, 1, Self::CHOICES)?;
        check_action(self.name(), action, self.action_count())?;

        let action = action as i8;
        if action >= state[0] {
            return Err(Error::invalid_action(
                self.name(),
                action as usize,
                format!("only {} choices left", state[0]),
            ));
        }
        if action == 0 {
            return Ok(Transition::Finished(Outcome::FirstLost));
        }
        Ok(Transition::Continue {
            state: State::new(vec![action]),
            next_player: Player::First,
        })
    }
}

use rand::{Rng, RngCore};

use crate::error::Result;
use crate::game::{check_action, check_state, Game, Outcome, State, Transition};

/// Perfect-information slot machine.
///
/// State: the lever which wins (all other levers lose).
/// Action: which lever to pull.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bandit;

impl Bandit {
    const LEVERS: usize = 10;
}

impl Game for Bandit {
    fn name(&self) -> &'static str {
        "bandit"
    }

    fn description(&self) -> &'static str {
        "Perfect-information slot machine. State: the winning lever. Action: which lever to pull."
    }

    fn action_count(&self) -> usize {
        Self::LEVERS
    }

    fn start(&self, rng: &mut dyn RngCore) -> State {
        let winner = rng.gen_range(0..Self::LEVERS) as i8;
        State::new(vec![winner])
    }

    fn valid(&self, state: &State) -> Result<Vec<bool>> {
        check_state(self.name(), state, 1, 0, Self::LEVERS as i8 - 1)?;
        Ok(vec![true; Self::LEVERS])
    }

    fn step(&self, state: &State, action: usize) -> Result<Transition> {
        check_state(self.name(), state, 1, 0, Self::LEVERS as i8 - 1)?;
        check_action(self.name(), action, Self::LEVERS)?;

        let outcome = if state[0] as usize == action {
            Outcome::FirstWon
        } else {
            Outcome::FirstLost
        };
        Ok(Transition::Finished(outcome))
    }
}

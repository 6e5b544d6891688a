use std::io::{BufRead, Write};

use log::warn;
use ndarray::Array1;
use rand::RngCore;

use crate::error::{Error, Result};
use crate::game::{Game, Player, State};
use crate::util::{sample, view_to_obs};

/// Chooses actions for one side of a game
pub trait Agent {
    fn act(&mut self, game: &dyn Game, state: &State, player: Player, rng: &mut dyn RngCore) -> Result<usize>;
}

/// Picks uniformly among the valid actions
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn act(&mut self, game: &dyn Game, state: &State, _player: Player, rng: &mut dyn RngCore) -> Result<usize> {
        let valid = game.valid(state)?;
        let logits = Array1::<f64>::zeros(valid.len());
        sample(logits.view(), Some(valid.as_slice()), rng)
    }
}

/// Samples from the logits a policy assigns to the observation of a state
pub struct PolicyAgent<F> {
    policy: F,
}

impl<F> PolicyAgent<F>
where
    F: FnMut(&Array1<f64>) -> Array1<f64>,
{
    pub fn new(policy: F) -> Self {
        Self { policy }
    }
}

impl<F> Agent for PolicyAgent<F>
where
    F: FnMut(&Array1<f64>) -> Array1<f64>,
{
    fn act(&mut self, game: &dyn Game, state: &State, player: Player, rng: &mut dyn RngCore) -> Result<usize> {
        let obs = view_to_obs(state.as_slice(), player);
        let logits = (self.policy)(&obs);
        if logits.len() != game.action_count() {
            return Err(Error::InvalidDistribution(format!(
                "policy produced {} logits for {} actions",
                logits.len(),
                game.action_count()
            )));
        }
        let valid = game.valid(state)?;
        sample(logits.view(), Some(valid.as_slice()), rng)
    }
}

/// Reads moves typed at a prompt
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn act(&mut self, game: &dyn Game, state: &State, _player: Player, _rng: &mut dyn RngCore) -> Result<usize> {
        let valid = game.valid(state)?;
        loop {
            write!(self.output, "Move:")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            match line.trim().parse::<usize>() {
                Ok(action) if valid.get(action).copied().unwrap_or(false) => return Ok(action),
                Ok(action) => {
                    warn!("Rejected invalid move {} in {}", action, game.name());
                    writeln!(self.output, "Invalid move: {}", action)?;
                }
                Err(_) => {
                    warn!("Rejected unparsable move {:?}", line.trim());
                    writeln!(self.output, "Not a number: {}", line.trim())?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Narrow, TicTacToe};
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn test_random_agent_respects_validity() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = State::new(vec![2]);
        for _ in 0..50 {
            let action = RandomAgent.act(&Narrow, &state, Player::First, &mut rng).unwrap();
            assert!(action < 2);
        }
    }

    #[test]
    fn test_policy_agent_follows_dominant_logit() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut agent = PolicyAgent::new(|obs: &Array1<f64>| {
            assert_eq!(obs.len(), 10);
            let mut logits = Array1::zeros(9);
            logits[8] = 100.0;
            logits
        });
        let state = State::new(vec![0; 9]);
        assert_eq!(agent.act(&TicTacToe, &state, Player::First, &mut rng).unwrap(), 8);
    }

    #[test]
    fn test_policy_agent_survives_preference_for_taken_cell() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut agent = PolicyAgent::new(|_: &Array1<f64>| {
            let mut logits = Array1::zeros(9);
            logits[0] = 800.0;
            logits
        });
        let mut board = vec![0; 9];
        board[0] = 1;
        let action = agent.act(&TicTacToe, &State::new(board), Player::Second, &mut rng).unwrap();
        assert_ne!(action, 0);
    }

    #[test]
    fn test_policy_agent_checks_logit_count() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut agent = PolicyAgent::new(|_: &Array1<f64>| array![0.0, 1.0]);
        assert!(agent.act(&TicTacToe, &State::new(vec![0; 9]), Player::First, &mut rng).is_err());
    }

    #[test]
    fn test_human_agent_reprompts_until_valid() {
        let mut rng = StdRng::seed_from_u64(0);
        let input = Cursor::new("abc\n2\n1\n");
        let mut agent = HumanAgent::new(input, Vec::new());
        let action = agent.act(&Narrow, &State::new(vec![2]), Player::First, &mut rng).unwrap();
        assert_eq!(action, 1);

        let (_, output) = agent.into_inner();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Move:").count(), 3);
        assert!(output.contains("Not a number: abc"));
        assert!(output.contains("Invalid move: 2"));
    }

    #[test]
    fn test_human_agent_reports_closed_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut agent = HumanAgent::new(Cursor::new(""), Vec::new());
        let result = agent.act(&Narrow, &State::new(vec![3]), Player::First, &mut rng);
        assert!(matches!(result, Err(Error::InputClosed)));
    }
}

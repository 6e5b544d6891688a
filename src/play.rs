use std::io::{BufRead, Write};

use log::{debug, info};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, HumanAgent, RandomAgent};
use crate::error::{Error, Result};
use crate::game::{Game, Outcome, Player, State, Transition};
use crate::options::PlayOptions;
use crate::util::{valid_indices, view_to_obs};

/// One move of an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub state: State,
    pub player: Player,
    pub action: usize,
}

/// Full history of a finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: String,
    pub moves: Vec<Move>,
    pub outcome: Outcome,
}

/// Training tuple: observation, action taken, and final value for the mover
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub observation: Array1<f64>,
    pub action: usize,
    pub value: f64,
}

impl GameRecord {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Every move labelled with the outcome as seen by the player who made it
    pub fn training_examples(&self) -> Vec<TrainingExample> {
        self.moves
            .iter()
            .map(|m| TrainingExample {
                observation: view_to_obs(m.state.as_slice(), m.player),
                action: m.action,
                value: f64::from(self.outcome.value_for(m.player)),
            })
            .collect()
    }
}

/// Aggregate results of a batch of episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub episodes: usize,
    pub first_wins: usize,
    pub draws: usize,
    pub first_losses: usize,
    pub mean_length: f64,
}

impl BatchSummary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = BatchSummary {
            episodes: records.len(),
            ..Default::default()
        };
        let mut total_moves = 0;
        for record in records {
            total_moves += record.len();
            match record.outcome {
                Outcome::FirstWon => summary.first_wins += 1,
                Outcome::Draw => summary.draws += 1,
                Outcome::FirstLost => summary.first_losses += 1,
            }
        }
        if !records.is_empty() {
            summary.mean_length = total_moves as f64 / records.len() as f64;
        }
        summary
    }
}

/// Play one episode between two agents; `agents[0]` plays first
pub fn self_play(
    game: &dyn Game,
    agents: [&mut dyn Agent; 2],
    options: &PlayOptions,
    rng: &mut dyn RngCore,
) -> Result<GameRecord> {
    let [first, second] = agents;
    let mut state = game.start(rng);
    let mut player = Player::First;
    let mut moves = Vec::new();

    loop {
        if moves.len() >= options.max_moves {
            return Err(Error::MoveLimitExceeded(options.max_moves));
        }

        let action = match player {
            Player::First => first.act(game, &state, player, rng)?,
            Player::Second => second.act(game, &state, player, rng)?,
        };
        debug!("{}: player {} plays {} on {}", game.name(), player, action, state);

        let transition = game.step(&state, action)?;
        moves.push(Move {
            state,
            player,
            action,
        });

        match transition {
            Transition::Continue { state: next, next_player } => {
                state = next;
                player = next_player;
            }
            Transition::Finished(outcome) => {
                return Ok(GameRecord {
                    game: game.name().to_string(),
                    moves,
                    outcome,
                });
            }
        }
    }
}

/// Play `episodes` random self-play episodes in parallel.
///
/// Episode `i` is seeded with `options.seed + i`, so the records do not depend
/// on thread scheduling.
pub fn self_play_batch(game: &dyn Game, episodes: usize, options: &PlayOptions) -> Result<Vec<GameRecord>> {
    let records = (0..episodes)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(i as u64));
            let mut first = RandomAgent;
            let mut second = RandomAgent;
            self_play(game, [&mut first, &mut second], options, &mut rng)
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = BatchSummary::from_records(&records);
    info!(
        "{}: {} episodes, {} won / {} drawn / {} lost, mean length {:.2}",
        game.name(),
        summary.episodes,
        summary.first_wins,
        summary.draws,
        summary.first_losses,
        summary.mean_length
    );
    Ok(records)
}

/// Play a game at the console, reading every move from `input`
pub fn play_interactive<R, W>(game: &dyn Game, input: R, mut output: W, rng: &mut dyn RngCore) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Playing: {}", game.name())?;
    writeln!(output, "Doc: {}", game.description())?;

    let mut human = HumanAgent::new(input, &mut output);
    let mut state = game.start(rng);
    let mut player = Player::First;

    let outcome = loop {
        let valid = game.valid(&state)?;
        writeln!(human.output_mut(), "State: {}", game.human(&state))?;
        writeln!(human.output_mut(), "Valid: {:?}", valid_indices(&valid))?;

        let action = human.act(game, &state, player, rng)?;
        match game.step(&state, action)? {
            Transition::Continue { state: next, next_player } => {
                state = next;
                player = next_player;
            }
            Transition::Finished(outcome) => break outcome,
        }
    };

    writeln!(output, "Outcome: {}", outcome)?;
    Ok(outcome)
}

use std::fmt::{self, Debug};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The player to move. Player one always starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// `+1` for the first player, `-1` for the second
    pub fn sign(self) -> i8 {
        match self {
            Player::First => 1,
            Player::Second => -1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}

/// Final result of a game, always from the first player's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    FirstWon,
    Draw,
    FirstLost,
}

impl Outcome {
    pub fn value(self) -> i8 {
        match self {
            Outcome::FirstWon => 1,
            Outcome::Draw => 0,
            Outcome::FirstLost => -1,
        }
    }

    /// The outcome as seen by `player`
    pub fn value_for(self, player: Player) -> i8 {
        self.value() * player.sign()
    }

    /// Outcome in which `player` won
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::First => Outcome::FirstWon,
            Player::Second => Outcome::FirstLost,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Game state: a small vector of integers, the "view" a game exposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(Vec<i8>);

impl State {
    pub fn new(values: Vec<i8>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i8>> for State {
    fn from(values: Vec<i8>) -> Self {
        Self(values)
    }
}

impl std::ops::Index<usize> for State {
    type Output = i8;

    fn index(&self, index: usize) -> &i8 {
        &self.0[index]
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        match values.len() {
            // single-element tuples keep their trailing comma: (0,)
            1 => write!(f, "({},)", values[0]),
            _ => write!(f, "({})", values.join(", ")),
        }
    }
}

/// Result of applying an action to a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Continue { state: State, next_player: Player },
    Finished(Outcome),
}

impl Transition {
    pub fn is_finished(&self) -> bool {
        matches!(self, Transition::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Transition::Finished(outcome) => Some(*outcome),
            Transition::Continue { .. } => None,
        }
    }
}

/// Interface for a game played by self-play agents
pub trait Game: Send + Sync + Debug {
    /// Short kebab-case name used in the registry and reports
    fn name(&self) -> &'static str;

    /// Human-readable rules
    fn description(&self) -> &'static str;

    /// Size of the action space
    fn action_count(&self) -> usize;

    /// A start state. Player one always starts.
    fn start(&self, rng: &mut dyn RngCore) -> State;

    /// Validity of every action in `state`
    fn valid(&self, state: &State) -> Result<Vec<bool>>;

    /// Apply `action` to `state`
    fn step(&self, state: &State, action: usize) -> Result<Transition>;

    /// Human-readable state
    fn human(&self, state: &State) -> String {
        state.to_string()
    }
}

/// Check that `state` has `len` entries, each within `min..=max`
pub(crate) fn check_state(game: &str, state: &State, len: usize, min: i8, max: i8) -> Result<()> {
    if state.len() != len {
        return Err(Error::invalid_state(
            game,
            format!("expected {} values, got {}", len, state.len()),
        ));
    }
    if let Some(v) = state.as_slice().iter().find(|v| **v < min || **v > max) {
        return Err(Error::invalid_state(
            game,
            format!("value {} outside {}..={}", v, min, max),
        ));
    }
    Ok(())
}

/// Check that `action` indexes the action space
pub(crate) fn check_action(game: &str, action: usize, action_count: usize) -> Result<()> {
    if action >= action_count {
        return Err(Error::invalid_action(
            game,
            action,
            format!("action space has {} actions", action_count),
        ));
    }
    Ok(())
}

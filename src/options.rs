use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options for running episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayOptions {
    /// Abort an episode after this many moves
    pub max_moves: usize,
    /// Seed for the random generators (episode `i` of a batch uses `seed + i`)
    pub seed: u64,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            max_moves: 1_000,
            seed: 0,
        }
    }
}

impl PlayOptions {
    /// Create the default play options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the move limit
    pub fn set_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Set the seed
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Options for a profiling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Number of self-play episodes to profile
    pub episodes: usize,
    /// Number of report lines to print
    pub top_n: usize,
    /// Attribute time per game and per action instead of per operation
    pub detailed: bool,
    /// Episode settings
    pub play: PlayOptions,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            episodes: 1_000,
            top_n: 40,
            detailed: false,
            play: PlayOptions::default(),
        }
    }
}

impl ProfileOptions {
    /// Create the default profile options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the number of episodes
    pub fn set_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Set the number of report lines
    pub fn set_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Enable or disable detailed attribution
    pub fn enable_detailed(mut self, enable: bool) -> Self {
        self.detailed = enable;
        self
    }

    /// Set the episode settings
    pub fn set_play_options(mut self, play: PlayOptions) -> Self {
        self.play = play;
        self
    }
}

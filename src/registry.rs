use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::game::Game;
use crate::games::{Bandit, Count, Narrow, RockPaperScissors, TicTacToe};
use crate::memo::Memoized;

/// The built-in games, in catalogue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Count,
    Narrow,
    Bandit,
    RockPaperScissors,
    TicTacToe,
}

impl GameKind {
    /// Build a fresh instance of this game
    pub fn build(self) -> Arc<dyn Game> {
        match self {
            GameKind::Count => Arc::new(Count),
            GameKind::Narrow => Arc::new(Narrow),
            GameKind::Bandit => Arc::new(Bandit),
            GameKind::RockPaperScissors => Arc::new(RockPaperScissors),
            GameKind::TicTacToe => Arc::new(Memoized::new(TicTacToe)),
        }
    }
}

/// Registry of games by name
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: BTreeMap<String, Arc<dyn Game>>,
    order: Vec<String>,
}

impl GameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            games: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry holding every built-in game
    pub fn with_builtin_games() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_kinds(GameKind::iter())?;
        Ok(registry)
    }

    /// Register a fresh instance of each kind, stopping at the first clash
    pub fn register_kinds(&mut self, kinds: impl IntoIterator<Item = GameKind>) -> Result<()> {
        for kind in kinds {
            self.register(kind.build())?;
        }
        Ok(())
    }

    /// Register a game under its own name
    pub fn register(&mut self, game: Arc<dyn Game>) -> Result<()> {
        let name = game.name().to_string();
        if self.games.contains_key(&name) {
            return Err(Error::DuplicateGame(name));
        }
        debug!("Registered game {}", name);
        self.order.push(name.clone());
        self.games.insert(name, game);
        Ok(())
    }

    /// Look up a game by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn Game>> {
        self.games
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownGame(name.to_string()))
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

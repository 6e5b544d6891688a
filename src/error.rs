use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid action {action} in {game}: {reason}")]
    InvalidAction {
        game: String,
        action: usize,
        reason: String,
    },

    #[error("Invalid state for {game}: {reason}")]
    InvalidState {
        game: String,
        reason: String,
    },

    #[error("Unknown game: {0}")]
    UnknownGame(String),

    #[error("Game already registered: {0}")]
    DuplicateGame(String),

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Input closed before a move was entered")]
    InputClosed,

    #[error("Episode exceeded the limit of {0} moves")]
    MoveLimitExceeded(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_action(game: &str, action: usize, reason: impl Into<String>) -> Self {
        Error::InvalidAction {
            game: game.to_string(),
            action,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_state(game: &str, reason: impl Into<String>) -> Self {
        Error::InvalidState {
            game: game.to_string(),
            reason: reason.into(),
        }
    }
}

use std::path::PathBuf;

use crate::board::Pos;

/// Errors raised by board construction and move validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size {size} is outside {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("cell {0} is already occupied")]
    Occupied(Pos),
}

/// Errors raised by the turn bookkeeping in [`crate::game::Game`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    Board(#[from] BoardError),

    #[error("the game is already over")]
    GameOver,

    /// Carries the side that is to move
    #[error("{0} is to move")]
    NotYourTurn(crate::board::Side),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

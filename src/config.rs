use std::path::Path;

use tracing::warn;

use crate::board::{Side, MAX_SIZE, MIN_SIZE};
use crate::engine::StrategyKind;
use crate::error::ConfigError;
use crate::game::GameMode;
use crate::search::{DEFAULT_DEPTH, DEFAULT_EXPLORATION, DEFAULT_ITERATIONS};

/// Deepest minimax search the config accepts; full-width search grows fast.
pub const MAX_MINIMAX_DEPTH: u8 = 6;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub engine: EngineConfig,
}

/// Whether the second seat is the engine or another person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    #[default]
    VsAi,
    TwoPlayer,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub mode: PlayMode,
    /// Seat of the human player in `vs-ai` mode
    pub human_side: Side,
    /// Seconds per human turn before a random move is played; 0 disables
    pub turn_seconds: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 7,
            mode: PlayMode::VsAi,
            human_side: Side::Red,
            turn_seconds: 5,
        }
    }
}

impl GameConfig {
    pub fn game_mode(&self) -> GameMode {
        match self.mode {
            PlayMode::VsAi => GameMode::VsAi {
                human: self.human_side,
            },
            PlayMode::TwoPlayer => GameMode::TwoPlayer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    pub minimax_depth: u8,
    pub mcts_iterations: u32,
    pub mcts_exploration: f64,
    /// Seed for the Monte Carlo playouts
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Heuristic,
            minimax_depth: DEFAULT_DEPTH,
            mcts_iterations: DEFAULT_ITERATIONS,
            mcts_exploration: DEFAULT_EXPLORATION,
            seed: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.game.board_size) {
            return Err(ConfigError::Validation(format!(
                "game.board_size must be within {MIN_SIZE}..={MAX_SIZE}"
            )));
        }
        if !(1..=MAX_MINIMAX_DEPTH).contains(&self.engine.minimax_depth) {
            return Err(ConfigError::Validation(format!(
                "engine.minimax_depth must be within 1..={MAX_MINIMAX_DEPTH}"
            )));
        }
        if self.engine.mcts_iterations == 0 {
            return Err(ConfigError::Validation(
                "engine.mcts_iterations must be > 0".into(),
            ));
        }
        if !(self.engine.mcts_exploration.is_finite() && self.engine.mcts_exploration > 0.0) {
            return Err(ConfigError::Validation(
                "engine.mcts_exploration must be > 0".into(),
            ));
        }
        Ok(())
    }
}

//! Game state management for the Hex GUI

use crate::config::AppConfig;
use crate::error::GameError;
use crate::eval::Cost;
use crate::game::{Game, GameMode};
use crate::{AIEngine, MoveResult, Pos, Side, StrategyKind};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// AI computation state
pub enum AiState {
    Idle,
    /// The engine is moved onto the worker thread and comes back with the
    /// result, so its Monte Carlo random source carries over between moves.
    Thinking {
        receiver: Receiver<(AIEngine, MoveResult)>,
        start_time: Instant,
    },
}

/// Per-turn clock. A turn limit of zero means no limit.
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
    pub turn_limit: Duration,
}

impl MoveTimer {
    pub fn new(turn_limit: Duration) -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
            turn_limit,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// Time left in the current turn, `None` without a limit
    pub fn remaining(&self) -> Option<Duration> {
        if self.turn_limit.is_zero() || self.start_time.is_none() {
            return None;
        }
        Some(self.turn_limit.saturating_sub(self.elapsed()))
    }

    pub fn expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub config: AppConfig,
    pub last_move: Option<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    engine: Option<AIEngine>,
}

impl GameState {
    pub fn new(config: AppConfig) -> Result<Self, GameError> {
        let game = Game::new(config.game.board_size, config.game.game_mode())?;
        let engine = AIEngine::from_config(&config.engine);
        let timer = MoveTimer::new(Duration::from_secs(config.game.turn_seconds));
        Ok(Self {
            game,
            config,
            last_move: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: timer,
            message: None,
            engine: Some(engine),
        })
    }

    /// Start a new game with the settings in `config`.
    ///
    /// A search still running keeps its thread but its result is dropped.
    pub fn restart(&mut self, config: AppConfig) -> Result<(), GameError> {
        *self = Self::new(config)?;
        info!(
            size = self.game.board().size(),
            mode = ?self.game.mode(),
            strategy = %self.config.engine.strategy,
            "new game"
        );
        Ok(())
    }

    pub fn mode(&self) -> GameMode {
        self.game.mode()
    }

    pub fn strategy(&self) -> StrategyKind {
        self.config.engine.strategy
    }

    pub fn is_human_turn(&self) -> bool {
        self.game.is_human_turn()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.game.is_automated_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Opponent of the side to move and its remaining stones
    pub fn threat(&self) -> Option<(Side, Cost)> {
        if self.game.is_over() {
            return None;
        }
        Some(self.game.threat_level())
    }

    /// Attempt to place a stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        self.game.human_move(pos).map_err(|e| e.to_string())?;
        self.after_move(pos);
        Ok(())
    }

    fn after_move(&mut self, pos: Pos) {
        self.last_move = Some(pos);
        self.move_timer.stop();
        self.message = None;
        if !self.game.is_over() {
            self.move_timer.start();
        }
    }

    /// Play a random cell for a human whose turn clock ran out.
    pub fn check_turn_timer(&mut self) {
        if !self.is_human_turn() || !self.move_timer.expired() {
            return;
        }
        let side = self.game.to_move();
        match self.game.play_random(&mut rand::thread_rng()) {
            Ok(pos) => {
                self.after_move(pos);
                self.message = Some(format!("Time's up: random move for {side}"));
            }
            Err(e) => warn!(error = %e, "random move failed"),
        }
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        let mut board = self.game.board().clone();
        let ctx = self.game.turn_context();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(
                &mut board,
                ctx.side,
                ctx.last_opponent_move,
                ctx.is_first_move,
            );
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.engine = Some(AIEngine::from_config(&self.config.engine));
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some(((engine, move_result), elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.engine = Some(engine);
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => match self.game.apply_move(pos) {
                    Ok(_) => self.after_move(pos),
                    Err(e) => {
                        warn!(error = %e, %pos, "engine move rejected");
                        self.message = Some(format!("AI move rejected: {e}"));
                    }
                },
                None => self.message = Some("AI could not find a move".to_string()),
            }
            self.last_ai_result = Some(move_result);
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }
}

//! Hex game engine
//!
//! Two sides take turns placing stones on an N×N rhombus of hexagonal cells:
//! - Red connects the left edge to the right edge
//! - Blue connects the top edge to the bottom edge
//! - The first side with an unbroken chain between its edges wins
//!
//! # Architecture
//!
//! - [`board`]: Board representation, hex adjacency and probe guards
//! - [`rules`]: Win detection (BFS and union-find) and game outcome
//! - [`eval`]: Shortest-connection cost and move/position scoring
//! - [`search`]: Rule cascade, minimax with alpha-beta and Monte Carlo search
//! - [`engine`]: One entry point over the three strategies
//! - [`game`]: Turn bookkeeping for the front ends
//! - [`config`]: TOML configuration
//! - [`ui`]: egui desktop front end
//!
//! # Quick Start
//!
//! ```
//! use hex::{AIEngine, Board, Pos, Side};
//!
//! let mut board = Board::new(7).unwrap();
//! board.make_move(Pos::new(3, 0), Side::Red);
//!
//! let mut engine = AIEngine::new();
//! if let Some(pos) = engine.choose_automated_move(&mut board, Side::Blue, Some(Pos::new(3, 0)), true) {
//!     board.make_move(pos, Side::Blue);
//!     println!("engine plays at {pos}");
//! }
//! ```
//!
//! # Heuristic Priority
//!
//! The default strategy tries, in order:
//! 1. Finish its own connection
//! 2. Stop an opponent one stone from winning
//! 3. Block edge cells and short opponent routes
//! 4. Open in the center
//! 5. Two-ply look-ahead over a bounded candidate pool
//! 6. Best single-move score

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod logging;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Pos, Side, MAX_SIZE, MIN_SIZE};
pub use config::AppConfig;
pub use engine::{
    apply_move, choose_automated_move, has_won, is_draw, min_moves_to_win, new_board,
    reset_board, AIEngine, MoveResult, SearchType, StrategyKind,
};
pub use error::{BoardError, ConfigError, GameError};
pub use eval::Cost;
pub use game::{Game, GameMode};
pub use rules::GameOutcome;

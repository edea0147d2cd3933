//! Main AI engine: one entry point over the selectable strategies
//!
//! Three independent policies can pick the automated side's move:
//!
//! 1. **Heuristic** (default): the ordered rule cascade in
//!    [`crate::search::cascade`], blocking first and building second
//! 2. **Minimax**: full-width, fixed-depth alpha-beta over material scores
//! 3. **MonteCarlo**: UCT with random playouts and a fixed iteration budget
//!
//! They are never mixed; the caller picks one through [`StrategyKind`].
//!
//! # Example
//!
//! ```
//! use hex::{AIEngine, Board, Pos, Side};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::new(5).unwrap();
//! for col in [0, 1, 3, 4] {
//!     board.make_move(Pos::new(2, col), Side::Red);
//! }
//!
//! // Red needs one stone at (2, 2); Blue takes it
//! let result = engine.get_move_with_stats(&mut board, Side::Blue, Some(Pos::new(2, 4)), false);
//! assert_eq!(result.best_move, Some(Pos::new(2, 2)));
//! ```

use std::str::FromStr;
use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Pos, Side};
use crate::config::EngineConfig;
use crate::error::BoardError;
use crate::eval::{connection_cost, evaluate_state, Cost};
use crate::rules::check_win;
use crate::search::{
    CascadeMove, CascadeRule, HeuristicCascade, MctsResult, MctsSearcher, MinimaxSearcher,
    SearchResult, TurnContext, DEFAULT_DEPTH, DEFAULT_EXPLORATION, DEFAULT_ITERATIONS,
};

/// Which policy picks the automated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Heuristic,
    Minimax,
    MonteCarlo,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Heuristic,
        StrategyKind::Minimax,
        StrategyKind::MonteCarlo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Heuristic => "heuristic",
            StrategyKind::Minimax => "minimax",
            StrategyKind::MonteCarlo => "monte-carlo",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown strategy '{s}' (expected heuristic, minimax or monte-carlo)"))
    }
}

/// Which part of the engine produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// A cascade rule fired
    Cascade(CascadeRule),
    /// Alpha-beta search result
    Minimax,
    /// Most visited Monte Carlo child
    MonteCarlo,
    /// Board was full
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Strategy-specific score: position score after the move for the
    /// cascade, minimax value, or win percentage for Monte Carlo
    pub score: i64,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Positions visited (minimax) or playouts run (Monte Carlo)
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn from_cascade(chosen: CascadeMove, score: i64, time_ms: u64) -> Self {
        Self {
            best_move: Some(chosen.pos),
            score,
            search_type: SearchType::Cascade(chosen.rule),
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_minimax(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score as i64,
            search_type: SearchType::Minimax,
            time_ms,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn from_mcts(result: MctsResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: (result.win_rate * 100.0).round() as i64,
            search_type: SearchType::MonteCarlo,
            time_ms,
            nodes: result.iterations as u64,
        }
    }

    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            time_ms,
            nodes: 0,
        }
    }

    /// True if the move was chosen to stop the opponent
    pub fn is_defensive(&self) -> bool {
        matches!(self.search_type, SearchType::Cascade(rule) if rule.is_defensive())
    }
}

/// Main AI engine.
///
/// Owns one instance of every strategy; switching strategy keeps the others'
/// settings. Every search takes the board by `&mut` for probing and leaves it
/// as it found it.
#[derive(Debug, Clone)]
pub struct AIEngine {
    strategy: StrategyKind,
    cascade: HeuristicCascade,
    minimax: MinimaxSearcher,
    mcts: MctsSearcher,
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AIEngine {
    /// Heuristic cascade with default settings for the other strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(StrategyKind::Heuristic)
    }

    #[must_use]
    pub fn with_strategy(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            cascade: HeuristicCascade::new(),
            minimax: MinimaxSearcher::new(DEFAULT_DEPTH),
            mcts: MctsSearcher::new(DEFAULT_ITERATIONS, DEFAULT_EXPLORATION, 0),
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            strategy: config.strategy,
            cascade: HeuristicCascade::new(),
            minimax: MinimaxSearcher::new(config.minimax_depth),
            mcts: MctsSearcher::new(config.mcts_iterations, config.mcts_exploration, config.seed),
        }
    }

    #[inline]
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        self.strategy = strategy;
    }

    /// Pick the automated side's move, or `None` on a full board.
    #[must_use]
    pub fn choose_automated_move(
        &mut self,
        board: &mut Board,
        side: Side,
        last_opponent_move: Option<Pos>,
        is_first_move: bool,
    ) -> Option<Pos> {
        self.get_move_with_stats(board, side, last_opponent_move, is_first_move)
            .best_move
    }

    /// Pick a move and report how it was found.
    pub fn get_move_with_stats(
        &mut self,
        board: &mut Board,
        side: Side,
        last_opponent_move: Option<Pos>,
        is_first_move: bool,
    ) -> MoveResult {
        let start = Instant::now();
        let elapsed = |start: Instant| start.elapsed().as_millis() as u64;

        if board.is_full() {
            return MoveResult::no_move(elapsed(start));
        }

        let result = match self.strategy {
            StrategyKind::Heuristic => {
                let ctx = TurnContext {
                    side,
                    last_opponent_move,
                    is_first_move,
                };
                match self.cascade.choose(board, ctx) {
                    Some(chosen) => {
                        let score = board
                            .probe(chosen.pos, side)
                            .map_or(0, |probe| evaluate_state(&probe, side));
                        MoveResult::from_cascade(chosen, score, elapsed(start))
                    }
                    None => MoveResult::no_move(elapsed(start)),
                }
            }
            StrategyKind::Minimax => {
                let result = self.minimax.search(board, side);
                MoveResult::from_minimax(result, elapsed(start))
            }
            StrategyKind::MonteCarlo => {
                let result = self.mcts.search(board, side);
                MoveResult::from_mcts(result, elapsed(start))
            }
        };

        debug!(
            strategy = %self.strategy,
            %side,
            best_move = ?result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            time_ms = result.time_ms,
            nodes = result.nodes,
            "engine move"
        );
        result
    }
}

/// Create an empty board of the given size.
pub fn new_board(size: usize) -> Result<Board, BoardError> {
    Board::new(size)
}

/// Clear every cell of `board`.
pub fn reset_board(board: &mut Board) {
    board.reset();
}

/// Place a stone from raw coordinates. False, with no change, for an
/// off-board or occupied cell.
pub fn apply_move(board: &mut Board, row: i32, col: i32, side: Side) -> bool {
    board
        .pos(row, col)
        .is_some_and(|pos| board.make_move(pos, side))
}

pub fn has_won(board: &Board, side: Side) -> bool {
    check_win(board, side)
}

pub fn is_draw(board: &Board) -> bool {
    crate::rules::is_draw(board)
}

/// Heuristic cascade move for `side`, `None` on a full board.
pub fn choose_automated_move(
    board: &mut Board,
    side: Side,
    last_opponent_move: Option<Pos>,
    is_first_move: bool,
) -> Option<Pos> {
    AIEngine::new().choose_automated_move(board, side, last_opponent_move, is_first_move)
}

/// Stones `side` still needs, for threat displays.
pub fn min_moves_to_win(board: &Board, side: Side) -> Cost {
    connection_cost(board, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap_board() -> Board {
        let mut board = Board::new(5).unwrap();
        for col in [0, 1, 3, 4] {
            board.make_move(Pos::new(2, col), Side::Red);
        }
        board
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.strategy(), StrategyKind::Heuristic);
        let engine = AIEngine::with_strategy(StrategyKind::MonteCarlo);
        assert_eq!(engine.strategy(), StrategyKind::MonteCarlo);
    }

    #[test]
    fn test_engine_from_config() {
        let config = EngineConfig {
            strategy: StrategyKind::Minimax,
            minimax_depth: 3,
            ..EngineConfig::default()
        };
        let engine = AIEngine::from_config(&config);
        assert_eq!(engine.strategy(), StrategyKind::Minimax);
        assert_eq!(engine.minimax.max_depth(), 3);
    }

    #[test]
    fn test_strategy_parse_and_display() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("Minimax".parse::<StrategyKind>(), Ok(StrategyKind::Minimax));
        assert!("random".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_every_strategy_blocks_single_gap() {
        for kind in [StrategyKind::Heuristic, StrategyKind::Minimax] {
            let mut board = gap_board();
            let mut engine = AIEngine::with_strategy(kind);
            let pos = engine.choose_automated_move(&mut board, Side::Blue, Some(Pos::new(2, 4)), false);
            assert_eq!(pos, Some(Pos::new(2, 2)), "strategy {kind}");
            assert_eq!(board, gap_board());
        }
    }

    #[test]
    fn test_monte_carlo_returns_empty_cell() {
        let mut board = gap_board();
        let config = EngineConfig {
            strategy: StrategyKind::MonteCarlo,
            mcts_iterations: 200,
            ..EngineConfig::default()
        };
        let mut engine = AIEngine::from_config(&config);
        let result = engine.get_move_with_stats(&mut board, Side::Blue, None, false);
        assert_eq!(result.search_type, SearchType::MonteCarlo);
        assert_eq!(result.nodes, 200);
        assert!(board.is_cell_empty(result.best_move.unwrap()));
    }

    #[test]
    fn test_move_result_types() {
        let mut board = gap_board();
        let result = AIEngine::new().get_move_with_stats(&mut board, Side::Blue, None, false);
        assert_eq!(
            result.search_type,
            SearchType::Cascade(CascadeRule::PreventImmediateLoss)
        );
        assert!(result.is_defensive());

        let mut empty = Board::new(7).unwrap();
        let result = AIEngine::new().get_move_with_stats(&mut empty, Side::Blue, None, true);
        assert_eq!(result.search_type, SearchType::Cascade(CascadeRule::Opening));
        assert!(!result.is_defensive());
    }

    #[test]
    fn test_engine_full_board() {
        let mut board = Board::new(2).unwrap();
        for pos in board.empty_cells() {
            board.make_move(pos, Side::Red);
        }
        for kind in StrategyKind::ALL {
            let mut engine = AIEngine::with_strategy(kind);
            let result = engine.get_move_with_stats(&mut board, Side::Blue, None, false);
            assert_eq!(result.best_move, None);
            assert_eq!(result.search_type, SearchType::NoMove);
        }
    }

    #[test]
    fn test_free_functions() {
        let mut board = new_board(4).unwrap();
        assert!(new_board(1).is_err());

        assert!(apply_move(&mut board, 0, 0, Side::Red));
        assert!(!apply_move(&mut board, 0, 0, Side::Blue));
        assert!(!apply_move(&mut board, -1, 2, Side::Blue));
        assert!(!apply_move(&mut board, 2, 4, Side::Blue));

        for col in 1..4 {
            assert!(apply_move(&mut board, 0, col, Side::Red));
        }
        assert!(has_won(&board, Side::Red));
        assert!(!has_won(&board, Side::Blue));
        assert!(!is_draw(&board));
        assert_eq!(min_moves_to_win(&board, Side::Red), Cost::Finite(0));
        assert_eq!(min_moves_to_win(&board, Side::Blue), Cost::Unreachable);

        reset_board(&mut board);
        assert_eq!(board.total_stones(), 0);
        assert_eq!(
            choose_automated_move(&mut board, Side::Blue, None, true),
            Some(Pos::new(2, 2))
        );
    }
}

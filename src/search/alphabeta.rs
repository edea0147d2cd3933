//! Fixed-depth minimax with alpha-beta pruning
//!
//! The simple alternative to the rule cascade. Every empty cell is a move at
//! every node, leaves are scored by [`material_score`], and a connection at
//! any depth ends the line with a score that prefers quicker wins and slower
//! losses.
//!
//! # Example
//!
//! ```
//! use hex::board::{Board, Side};
//! use hex::search::MinimaxSearcher;
//!
//! let mut board = Board::new(3).unwrap();
//! let mut searcher = MinimaxSearcher::new(2);
//! let result = searcher.search(&mut board, Side::Red);
//! assert!(result.best_move.is_some());
//! ```

use crate::board::{Board, Pos, Side};
use crate::eval::{material_score, MinimaxWeight};
use crate::rules::check_win;

/// Search depth used when nothing else is configured
pub const DEFAULT_DEPTH: u8 = 2;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` on a full board
    pub best_move: Option<Pos>,
    /// Score of the best move from the searching side's view
    pub score: i32,
    pub depth: u8,
    /// Positions visited, root children included
    pub nodes: u64,
}

/// Minimax searcher. Holds no state between searches apart from settings.
#[derive(Debug, Clone)]
pub struct MinimaxSearcher {
    max_depth: u8,
    nodes: u64,
}

impl Default for MinimaxSearcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl MinimaxSearcher {
    /// Create a searcher; depth is at least 1
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.max(1),
            nodes: 0,
        }
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Best move for `side`: the first cell in scan order with the highest
    /// score. The board is unchanged on return.
    pub fn search(&mut self, board: &mut Board, side: Side) -> SearchResult {
        self.nodes = 0;
        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;

        for pos in board.empty_cells() {
            let Some(mut probe) = board.probe(pos, side) else {
                continue;
            };
            self.nodes += 1;
            let score = self.minimax(&mut probe, side, self.max_depth - 1, false, alpha, i32::MAX);
            // Strict: ties keep the earlier cell
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
                alpha = alpha.max(score);
            }
        }

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            depth: self.max_depth,
            nodes: self.nodes,
        }
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        side: Side,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        let ply = (self.max_depth - depth) as i32;
        if check_win(board, side) {
            return MinimaxWeight::WIN - ply;
        }
        if check_win(board, side.opponent()) {
            return -MinimaxWeight::WIN + ply;
        }
        if depth == 0 || board.is_full() {
            return material_score(board, side);
        }

        let mover = if maximizing { side } else { side.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in board.empty_cells() {
            let Some(mut probe) = board.probe(pos, mover) else {
                continue;
            };
            self.nodes += 1;
            let score = self.minimax(&mut probe, side, depth - 1, !maximizing, alpha, beta);
            drop(probe);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

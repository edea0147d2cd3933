//! Search module for the Hex AI
//!
//! Contains:
//! - The rule cascade (primary policy)
//! - Fixed-depth minimax with alpha-beta pruning
//! - Monte Carlo tree search with random playouts

pub mod alphabeta;
pub mod cascade;
pub mod mcts;

pub use alphabeta::{MinimaxSearcher, SearchResult, DEFAULT_DEPTH};
pub use cascade::{
    CascadeMove, CascadeRule, HeuristicCascade, Turn, TurnContext, MAX_OWN_CANDIDATES,
    MAX_PATTERN_CANDIDATES, MAX_REPLY_CANDIDATES, MAX_SCAN_CELLS,
};
pub use mcts::{MctsResult, MctsSearcher, DEFAULT_EXPLORATION, DEFAULT_ITERATIONS};

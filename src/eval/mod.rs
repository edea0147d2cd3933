//! Evaluation module for Hex positions
//!
//! - Shortest-connection cost (0/1 Dijkstra) with route reconstruction
//! - Local scoring of candidate moves for the heuristic cascade
//! - Cost-difference position score for the two-ply look-ahead
//! - Stone/adjacency leaf score for minimax

pub mod cost;
pub mod heuristic;
pub mod patterns;

pub use cost::{connection_cost, min_moves_to_win, Connection, Cost};
pub use heuristic::{evaluate_move, evaluate_state, material_score, threat_raise, Analysis};
pub use patterns::{CandidateBias, MinimaxWeight, MoveWeight, StateWeight};

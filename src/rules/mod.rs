//! Game rules for Hex
//!
//! - Win condition: a chain of one side's stones joining its two edges
//! - Draw: full board with no chain (cannot happen in real Hex, but reported
//!   rather than assumed away)

pub mod union_find;
pub mod win;

pub use union_find::{connected_by_union_find, winner_on_full, UnionFind};
pub use win::{check_win, is_draw, outcome, winner, GameOutcome};

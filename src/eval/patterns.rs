//! Scoring weights
//!
//! Every number the move heuristics multiply by lives here, grouped by the
//! routine that uses it.

/// Weights for [`super::heuristic::evaluate_move`].
///
/// The terms are layered so that a bigger concern always outweighs the sum of
/// the smaller ones on boards up to 11x11: winning, then blocking, then
/// advancing along the own path, then local shape.
pub struct MoveWeight;

impl MoveWeight {
    /// Move completes the own connection
    pub const WIN: i64 = 5_000_000;
    /// Per stone the move adds to the opponent's connection cost
    pub const THREAT_RAISE: i64 = 400_000;
    /// Move lies on the opponent's cheapest route
    pub const ON_THREAT_PATH: i64 = 180_000;
    /// After the move the own connection is one stone away (or done)
    pub const OWN_NEAR_WIN: i64 = 700_000;
    /// Per stone the move removes from the own connection cost
    pub const OWN_GAIN: i64 = 300_000;
    /// Move lies on the own cheapest route
    pub const ON_OWN_PATH: i64 = 250_000;
    /// Per unit of span slack, see `span_score`
    pub const SPAN: i64 = 8_000;
    /// Move sits in the two lines nearest the own target edge
    pub const NEAR_TARGET_EDGE: i64 = 120_000;
    /// Opponent's last move was near our target edge and this move shadows it
    pub const SHADOW_LAST_MOVE: i64 = 120_000;
    /// Per step of closeness (within two) to the opponent's last move
    pub const NEAR_LAST_MOVE: i64 = 10_000;
    /// Move sits in the three lines nearest the opponent's target edge
    pub const NEAR_OPPONENT_EDGE: i64 = 8_000;
    /// Move sits in the two lines nearest either own edge
    pub const OWN_EDGE_BAND: i64 = 5_000;
    /// Per neighbour point (own stone 2, opponent stone 1)
    pub const NEIGHBOR: i64 = 1_000;
    /// Per step of closeness to the center
    pub const CENTER: i64 = 200;
}

/// Weights for [`super::heuristic::evaluate_state`], the two-ply leaf score.
///
/// Blocking is weighted a little above advancing.
pub struct StateWeight;

impl StateWeight {
    /// Costs are clamped to this before scoring; `Unreachable` maps to it too
    pub const COST_CAP: u32 = 50;
    pub const OWN: i64 = 30_000;
    pub const OPPONENT: i64 = 32_000;
    /// Own move completes the connection
    pub const WIN: i64 = 100_000_000;
    /// Opponent reply completes its connection
    pub const LOSS: i64 = -100_000_000;
}

/// Ordering biases for the two-ply look-ahead candidate lists.
pub struct CandidateBias;

impl CandidateBias {
    /// Own candidates taken from the own cheapest route
    pub const OWN_PATH: i64 = 300;
    pub const OWN_NEAR_EDGE: i64 = 200;
    pub const OWN_ON_EDGE: i64 = 400;
    pub const OWN_CENTER: i64 = 3;
    pub const REPLY_NEAR_EDGE: i64 = 400;
    pub const REPLY_ON_EDGE: i64 = 800;
    pub const REPLY_CENTER: i64 = 5;
    /// Pattern fallback: within two steps of the opponent's last move
    pub const PATTERN_NEAR_LAST: i64 = 1_000;
    /// Pattern fallback: on either own edge
    pub const PATTERN_ON_EDGE: i64 = 500;
}

/// Leaf weights for the minimax engine.
pub struct MinimaxWeight;

impl MinimaxWeight {
    pub const STONE: i32 = 5;
    /// Per same-side neighbour, counted from each stone
    pub const ADJACENT: i32 = 3;
    /// Base for a decided position, reduced by the ply it was reached at
    pub const WIN: i32 = 100_000;
}

//! Move and position scoring
//!
//! Three scorers, one per consumer:
//! - [`evaluate_move`]: local pattern score of a single candidate, used by the
//!   cascade's reinforcement and fallback rules
//! - [`evaluate_state`]: cost-difference score of a whole position, used at
//!   the leaves of the two-ply look-ahead
//! - [`material_score`]: stone/adjacency count, the minimax leaf score
//!
//! All of them probe with the scoped move guard; the board is unchanged on
//! return.

use crate::board::{Board, Pos, Side};
use crate::rules::check_win;

use super::cost::{connection_cost, min_moves_to_win, Connection, Cost};
use super::patterns::{MinimaxWeight, MoveWeight, StateWeight};

/// Connection state measured once at the start of a turn.
///
/// Every candidate is compared against these numbers, so they are computed
/// before any probing starts.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub side: Side,
    /// Opponent's cheapest connection
    pub threat: Connection,
    /// Our cheapest connection
    pub own: Connection,
    pub last_opponent_move: Option<Pos>,
    /// Stand-in for `Cost::Unreachable` in cost differences
    pub cost_limit: u32,
}

impl Analysis {
    pub fn new(board: &Board, side: Side, last_opponent_move: Option<Pos>) -> Self {
        Self {
            side,
            threat: min_moves_to_win(board, side.opponent()),
            own: min_moves_to_win(board, side),
            last_opponent_move,
            cost_limit: board.cell_count() as u32 + 1,
        }
    }

    #[inline]
    pub fn opponent(&self) -> Side {
        self.side.opponent()
    }

    /// Stones the opponent still needs, as a number
    #[inline]
    pub fn threat_value(&self) -> i64 {
        self.threat.cost.value_or(self.cost_limit) as i64
    }

    #[inline]
    pub fn own_value(&self) -> i64 {
        self.own.cost.value_or(self.cost_limit) as i64
    }
}

/// How much the opponent's connection cost rises if `side` plays `pos`.
///
/// `None` if the cell cannot be played.
pub fn threat_raise(board: &mut Board, pos: Pos, analysis: &Analysis) -> Option<i64> {
    let probe = board.probe(pos, analysis.side)?;
    let after = connection_cost(&probe, analysis.opponent()).value_or(analysis.cost_limit);
    Some(after as i64 - analysis.threat_value())
}

/// Score one candidate move for `analysis.side`.
///
/// Returns `None` if the cell cannot be played.
pub fn evaluate_move(board: &mut Board, pos: Pos, analysis: &Analysis) -> Option<i64> {
    let side = analysis.side;
    let opponent = analysis.opponent();
    let n = board.size() as i64;
    let probe = board.probe(pos, side)?;

    if check_win(&probe, side) {
        return Some(MoveWeight::WIN);
    }

    let mut score = 0i64;

    // Blocking
    let new_threat = connection_cost(&probe, opponent).value_or(analysis.cost_limit) as i64;
    score += (new_threat - analysis.threat_value()).max(0) * MoveWeight::THREAT_RAISE;
    if analysis.threat.contains(pos) {
        score += MoveWeight::ON_THREAT_PATH;
    }

    // Advancing
    let new_own = connection_cost(&probe, side);
    if new_own.is_within(1) {
        score += MoveWeight::OWN_NEAR_WIN;
    }
    let gain = analysis.own_value() - new_own.value_or(analysis.cost_limit) as i64;
    score += gain.max(0) * MoveWeight::OWN_GAIN;
    if analysis.own.contains(pos) {
        score += MoveWeight::ON_OWN_PATH;
    }

    // Local shape
    let opponent_near = probe.friendly_neighbors(pos, opponent) as i64;
    let own_near = probe.friendly_neighbors(pos, side) as i64;
    score += span_score(n, opponent_near) * MoveWeight::SPAN;

    let axis = side.axis(pos) as i64;
    if axis >= n - 2 {
        score += MoveWeight::NEAR_TARGET_EDGE;
    }
    if let Some(last) = analysis.last_opponent_move {
        let last_axis = side.axis(last) as i64;
        if last_axis >= n - 2 && (axis - last_axis).abs() <= 1 {
            score += MoveWeight::SHADOW_LAST_MOVE;
        }
        let dist = pos.manhattan(last) as i64;
        if dist <= 2 {
            score += (3 - dist) * MoveWeight::NEAR_LAST_MOVE;
        }
    }
    if opponent.axis(pos) as i64 >= n - 3 {
        score += MoveWeight::NEAR_OPPONENT_EDGE;
    }
    if axis <= 1 || axis >= n - 2 {
        score += MoveWeight::OWN_EDGE_BAND;
    }
    score += (own_near * 2 + opponent_near) * MoveWeight::NEIGHBOR;

    let center_dist = pos.manhattan(probe.center()) as i64;
    score += (n - center_dist) * MoveWeight::CENTER;

    Some(score)
}

/// Slack left in a straight edge-to-edge run through the cell, shrinking by
/// two for every adjacent opponent stone.
#[inline]
fn span_score(n: i64, opponent_near: i64) -> i64 {
    3 * n - ((n - 1) + 2 * opponent_near)
}

/// Position score for `side`: a low own cost is good, a low opponent cost is
/// worse than a low own cost is good.
pub fn evaluate_state(board: &Board, side: Side) -> i64 {
    let cap = StateWeight::COST_CAP;
    let clamp = |cost: Cost| cost.value_or(cap).min(cap) as i64;
    let own = clamp(connection_cost(board, side));
    let opponent = clamp(connection_cost(board, side.opponent()));
    let cap = cap as i64;
    (cap - own) * StateWeight::OWN - (cap - opponent) * StateWeight::OPPONENT
}

/// Minimax leaf score: stones and same-side adjacencies, own minus opponent.
pub fn material_score(board: &Board, side: Side) -> i32 {
    let mut score = 0;
    for pos in board.positions() {
        let cell = board.get(pos);
        for (owner, sign) in [(side, 1), (side.opponent(), -1)] {
            if cell.is(owner) {
                let links = board.friendly_neighbors(pos, owner) as i32;
                score += sign * (MinimaxWeight::STONE + links * MinimaxWeight::ADJACENT);
            }
        }
    }
    score
}

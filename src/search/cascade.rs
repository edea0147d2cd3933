//! Rule cascade for choosing the automated side's move
//!
//! The policy is an ordered list of rules. Each rule looks at the position and
//! either proposes a cell or passes; the first proposal is played. The order
//! encodes priority, from "do not lose next move" down to "extend our own
//! route":
//!
//! | # | Rule | Fires when |
//! |---|------|------------|
//! | 0 | [`CascadeRule::CompleteOwnConnection`] | one stone completes our connection |
//! | 1 | [`CascadeRule::PreventImmediateLoss`] | opponent cost <= 1 |
//! | 2 | [`CascadeRule::BlockWinningCell`] | some empty cell wins for the opponent |
//! | 3 | [`CascadeRule::BlockTargetEdge`] | such a cell lies on the opponent's target edge |
//! | 4 | [`CascadeRule::DegradeTargetEdge`] | opponent crowds its target edge or cost <= 3 |
//! | 5 | [`CascadeRule::AnswerShortThreat`] | opponent cost <= 2 |
//! | 6 | [`CascadeRule::ReinforceBlock`] | opponent cost <= 3 |
//! | 7 | [`CascadeRule::Opening`] | our first move |
//! | 8 | [`CascadeRule::Lookahead`] | always, over capped candidates |
//! | 9 | [`CascadeRule::PatternFallback`] | always, over capped candidates |
//! | 10 | [`CascadeRule::ReinforceOwnPath`] | always |
//!
//! Rules 1-3 overlap on purpose: the cost model and the direct win check
//! must agree before a threat is ignored.
//!
//! Every hypothetical stone is placed through [`Board::probe`], so the board
//! is untouched when a rule returns.

use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::board::{Board, Pos, Side};
use crate::eval::{
    connection_cost, evaluate_move, evaluate_state, threat_raise, Analysis, CandidateBias,
    StateWeight,
};
use crate::rules::check_win;

/// Candidate pool size shared by the capped rules.
pub const MAX_SCAN_CELLS: usize = 50;
/// Opponent replies examined per own move in the look-ahead.
pub const MAX_REPLY_CANDIDATES: usize = 12;
/// Own moves examined in the look-ahead.
pub const MAX_OWN_CANDIDATES: usize = 18;
/// Cells scored by the pattern fallback.
pub const MAX_PATTERN_CANDIDATES: usize = 20;

/// What the caller knows about the turn beyond the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    /// Side to move
    pub side: Side,
    pub last_opponent_move: Option<Pos>,
    /// First automated move of the game
    pub is_first_move: bool,
}

impl TurnContext {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            last_opponent_move: None,
            is_first_move: false,
        }
    }
}

/// Everything a rule reads, measured before any rule runs.
#[derive(Debug, Clone)]
pub struct Turn {
    pub analysis: Analysis,
    pub is_first_move: bool,
    /// At most [`MAX_SCAN_CELLS`] empty cells: the opponent's route, then
    /// ours, then the rest in scan order
    pub candidates: Vec<Pos>,
}

impl Turn {
    pub fn new(board: &Board, ctx: TurnContext) -> Self {
        let analysis = Analysis::new(board, ctx.side, ctx.last_opponent_move);

        let mut candidates = Vec::with_capacity(MAX_SCAN_CELLS);
        let priority = analysis.threat.path.iter().chain(analysis.own.path.iter()).copied();
        for pos in priority.chain(board.empty_cells()) {
            if candidates.len() == MAX_SCAN_CELLS {
                break;
            }
            if board.is_cell_empty(pos) && !candidates.contains(&pos) {
                candidates.push(pos);
            }
        }

        Self {
            analysis,
            is_first_move: ctx.is_first_move,
            candidates,
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.analysis.side
    }

    #[inline]
    fn opponent(&self) -> Side {
        self.analysis.opponent()
    }
}

/// One rule of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeRule {
    /// Play the stone that completes our own connection
    CompleteOwnConnection,
    /// Opponent is one stone away: take a cell of its route, or any cell
    /// after which it no longer is
    PreventImmediateLoss,
    /// Take any empty cell where an opponent stone would win outright
    BlockWinningCell,
    /// Same check, restricted to the opponent's target edge
    BlockTargetEdge,
    /// Take the target-edge cell that raises the opponent's cost most
    DegradeTargetEdge,
    /// Take the candidate that raises the opponent's cost most
    AnswerShortThreat,
    /// Best pattern score among the opponent's route cells
    ReinforceBlock,
    /// Center, or the start of our route
    Opening,
    /// Own move then worst-case reply, scored by connection costs
    Lookahead,
    /// Best pattern score among the likeliest candidates
    PatternFallback,
    /// Best pattern score among our own route cells
    ReinforceOwnPath,
}

impl CascadeRule {
    /// Priority order.
    pub const ORDER: [CascadeRule; 11] = [
        CascadeRule::CompleteOwnConnection,
        CascadeRule::PreventImmediateLoss,
        CascadeRule::BlockWinningCell,
        CascadeRule::BlockTargetEdge,
        CascadeRule::DegradeTargetEdge,
        CascadeRule::AnswerShortThreat,
        CascadeRule::ReinforceBlock,
        CascadeRule::Opening,
        CascadeRule::Lookahead,
        CascadeRule::PatternFallback,
        CascadeRule::ReinforceOwnPath,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CascadeRule::CompleteOwnConnection => "complete own connection",
            CascadeRule::PreventImmediateLoss => "prevent immediate loss",
            CascadeRule::BlockWinningCell => "block winning cell",
            CascadeRule::BlockTargetEdge => "block target edge",
            CascadeRule::DegradeTargetEdge => "degrade target edge",
            CascadeRule::AnswerShortThreat => "answer short threat",
            CascadeRule::ReinforceBlock => "reinforce block",
            CascadeRule::Opening => "opening",
            CascadeRule::Lookahead => "two-ply look-ahead",
            CascadeRule::PatternFallback => "pattern fallback",
            CascadeRule::ReinforceOwnPath => "reinforce own path",
        }
    }

    /// True for the rules that exist to stop the opponent
    pub fn is_defensive(self) -> bool {
        matches!(
            self,
            CascadeRule::PreventImmediateLoss
                | CascadeRule::BlockWinningCell
                | CascadeRule::BlockTargetEdge
                | CascadeRule::DegradeTargetEdge
                | CascadeRule::AnswerShortThreat
                | CascadeRule::ReinforceBlock
        )
    }

    /// Run this rule alone.
    pub fn apply(self, board: &mut Board, turn: &Turn) -> Option<Pos> {
        match self {
            CascadeRule::CompleteOwnConnection => complete_own_connection(board, turn),
            CascadeRule::PreventImmediateLoss => prevent_immediate_loss(board, turn),
            CascadeRule::BlockWinningCell => {
                let cells = board.empty_cells();
                find_opponent_win(board, turn.opponent(), cells)
            }
            CascadeRule::BlockTargetEdge => {
                let size = board.size();
                let edge: Vec<Pos> = (0..size)
                    .map(|i| turn.opponent().target_edge(size, i))
                    .filter(|&p| board.is_cell_empty(p))
                    .collect();
                find_opponent_win(board, turn.opponent(), edge)
            }
            CascadeRule::DegradeTargetEdge => degrade_target_edge(board, turn),
            CascadeRule::AnswerShortThreat => answer_short_threat(board, turn),
            CascadeRule::ReinforceBlock => {
                if !turn.analysis.threat.cost.is_within(3) {
                    return None;
                }
                best_by_pattern(board, turn, &turn.analysis.threat.path)
            }
            CascadeRule::Opening => opening(board, turn),
            CascadeRule::Lookahead => lookahead(board, turn),
            CascadeRule::PatternFallback => pattern_fallback(board, turn),
            CascadeRule::ReinforceOwnPath => {
                let own = &turn.analysis.own.path;
                if own.iter().any(|&p| board.is_cell_empty(p)) {
                    best_by_pattern(board, turn, own)
                } else {
                    // No route left (or already connected): score the pool instead
                    best_by_pattern(board, turn, &turn.candidates)
                }
            }
        }
    }
}

impl std::fmt::Display for CascadeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A move picked by the cascade, with the rule that picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeMove {
    pub pos: Pos,
    pub rule: CascadeRule,
}

/// Driver that tries each rule in order.
#[derive(Debug, Clone)]
pub struct HeuristicCascade {
    rules: Vec<CascadeRule>,
}

impl Default for HeuristicCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicCascade {
    pub fn new() -> Self {
        Self {
            rules: CascadeRule::ORDER.to_vec(),
        }
    }

    /// Cascade running only the given rules, in the given order.
    pub fn with_rules(rules: Vec<CascadeRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CascadeRule] {
        &self.rules
    }

    /// Pick a move for `ctx.side`. `None` only when the board is full.
    pub fn choose(&self, board: &mut Board, ctx: TurnContext) -> Option<CascadeMove> {
        if board.is_full() {
            return None;
        }

        let turn = Turn::new(board, ctx);
        trace!(
            side = %ctx.side,
            threat = %turn.analysis.threat.cost,
            own = %turn.analysis.own.cost,
            candidates = turn.candidates.len(),
            "cascade start"
        );

        for &rule in &self.rules {
            if let Some(pos) = rule.apply(board, &turn) {
                debug!(side = %ctx.side, %pos, %rule, "cascade move");
                return Some(CascadeMove { pos, rule });
            }
        }

        // Only reachable with a reduced rule list
        let pos = *turn.candidates.first()?;
        debug!(side = %ctx.side, %pos, "no rule fired, taking first candidate");
        Some(CascadeMove {
            pos,
            rule: CascadeRule::ReinforceOwnPath,
        })
    }
}

fn complete_own_connection(board: &mut Board, turn: &Turn) -> Option<Pos> {
    if !turn.analysis.own.cost.is_within(1) {
        return None;
    }
    let side = turn.side();
    let cells: Vec<Pos> = turn
        .analysis
        .own
        .path
        .iter()
        .copied()
        .chain(board.empty_cells())
        .collect();
    cells.into_iter().find(|&pos| {
        board
            .probe(pos, side)
            .is_some_and(|probe| check_win(&probe, side))
    })
}

fn prevent_immediate_loss(board: &mut Board, turn: &Turn) -> Option<Pos> {
    let threat = &turn.analysis.threat;
    if !threat.cost.is_within(1) {
        return None;
    }
    trace!(cost = %threat.cost, "opponent one stone from connecting");

    if let Some(&pos) = threat.path.iter().find(|&&p| board.is_cell_empty(p)) {
        return Some(pos);
    }

    let (side, opponent) = (turn.side(), turn.opponent());
    board.empty_cells().into_iter().find(|&pos| {
        board
            .probe(pos, side)
            .is_some_and(|probe| !connection_cost(&probe, opponent).is_within(1))
    })
}

/// First cell where an opponent stone connects the opponent.
fn find_opponent_win(board: &mut Board, opponent: Side, cells: Vec<Pos>) -> Option<Pos> {
    cells.into_iter().find(|&pos| {
        board
            .probe(pos, opponent)
            .is_some_and(|probe| check_win(&probe, opponent))
    })
}

fn degrade_target_edge(board: &mut Board, turn: &Turn) -> Option<Pos> {
    let size = board.size();
    let opponent = turn.opponent();
    let edge: Vec<Pos> = (0..size).map(|i| opponent.target_edge(size, i)).collect();

    let crowded = edge.iter().filter(|&&p| board.get(p).is(opponent)).count() >= (size / 3).max(1);
    if !crowded && !turn.analysis.threat.cost.is_within(3) {
        return None;
    }

    let mid = size / 2;
    let mut best: Option<(i64, usize, Pos)> = None;
    for (i, pos) in edge.into_iter().enumerate() {
        let Some(raise) = threat_raise(board, pos, &turn.analysis) else {
            continue;
        };
        let center = i.abs_diff(mid);
        let better = match best {
            None => true,
            Some((br, bc, _)) => raise > br || (raise == br && center < bc),
        };
        if better {
            best = Some((raise, center, pos));
        }
    }

    match best {
        Some((raise, _, pos)) if raise > 0 => Some(pos),
        _ => None,
    }
}

fn answer_short_threat(board: &mut Board, turn: &Turn) -> Option<Pos> {
    if !turn.analysis.threat.cost.is_within(2) {
        return None;
    }
    trace!(cost = %turn.analysis.threat.cost, "short opponent threat");

    let side = turn.side();
    let center = board.center();
    let mut best: Option<((i64, usize, Reverse<usize>), Pos)> = None;
    for &pos in &turn.candidates {
        let Some(raise) = threat_raise(board, pos, &turn.analysis) else {
            continue;
        };
        let key = (raise, side.axis(pos), Reverse(pos.manhattan(center)));
        if best.map_or(true, |(bk, _)| key > bk) {
            best = Some((key, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

fn opening(board: &Board, turn: &Turn) -> Option<Pos> {
    if !turn.is_first_move {
        return None;
    }
    let center = board.center();
    if board.is_cell_empty(center) {
        return Some(center);
    }
    turn.analysis
        .own
        .path
        .iter()
        .copied()
        .find(|&p| board.is_cell_empty(p))
}

/// Stable descending sort by score, keeping the first copy of each cell.
fn rank(mut scored: Vec<(i64, Pos)>, limit: usize) -> Vec<Pos> {
    scored.sort_by_key(|&(score, _)| Reverse(score));
    let mut out: Vec<Pos> = Vec::with_capacity(limit);
    for (_, pos) in scored {
        if out.len() == limit {
            break;
        }
        if !out.contains(&pos) {
            out.push(pos);
        }
    }
    out
}

/// Bias toward our target edge and the center, in the given weights.
fn edge_bias(board: &Board, side: Side, pos: Pos, near: i64, on: i64, center_weight: i64) -> i64 {
    let n = board.size();
    let axis = side.axis(pos);
    let mut bias = 0;
    if axis + 2 >= n {
        bias += near;
    }
    if axis + 1 == n {
        bias += on;
    }
    bias - center_weight * pos.manhattan(board.center()) as i64
}

fn lookahead(board: &mut Board, turn: &Turn) -> Option<Pos> {
    let (side, opponent) = (turn.side(), turn.opponent());

    let mut own_scored: Vec<(i64, Pos)> = turn
        .analysis
        .own
        .path
        .iter()
        .filter(|&&p| board.is_cell_empty(p))
        .map(|&p| (CandidateBias::OWN_PATH, p))
        .collect();
    own_scored.extend(turn.candidates.iter().map(|&p| {
        let bias = edge_bias(
            board,
            side,
            p,
            CandidateBias::OWN_NEAR_EDGE,
            CandidateBias::OWN_ON_EDGE,
            CandidateBias::OWN_CENTER,
        );
        (bias, p)
    }));
    let own_moves = rank(own_scored, MAX_OWN_CANDIDATES);

    // Replies are ranked once; each own move skips the cell it took
    let reply_order = rank(
        turn.candidates
            .iter()
            .map(|&p| {
                let bias = edge_bias(
                    board,
                    side,
                    p,
                    CandidateBias::REPLY_NEAR_EDGE,
                    CandidateBias::REPLY_ON_EDGE,
                    CandidateBias::REPLY_CENTER,
                );
                (bias, p)
            })
            .collect(),
        MAX_SCAN_CELLS,
    );

    let mut best: Option<(i64, Pos)> = None;
    for pos in own_moves {
        let Some(mut probe) = board.probe(pos, side) else {
            continue;
        };
        if check_win(&probe, side) {
            trace!(%pos, "look-ahead found a winning move");
            return Some(pos);
        }

        let replies: Vec<Pos> = reply_order
            .iter()
            .copied()
            .filter(|&r| probe.is_cell_empty(r))
            .take(MAX_REPLY_CANDIDATES)
            .collect();

        let worst = if replies.is_empty() {
            evaluate_state(&probe, side)
        } else {
            replies
                .into_iter()
                .filter_map(|reply| {
                    let answered = probe.probe(reply, opponent)?;
                    Some(if check_win(&answered, opponent) {
                        StateWeight::LOSS
                    } else {
                        evaluate_state(&answered, side)
                    })
                })
                .min()
                .unwrap_or(StateWeight::LOSS)
        };

        if best.map_or(true, |(b, _)| worst > b) {
            best = Some((worst, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

fn pattern_fallback(board: &mut Board, turn: &Turn) -> Option<Pos> {
    let side = turn.side();
    let n = board.size();
    let scored: Vec<(i64, Pos)> = turn
        .candidates
        .iter()
        .map(|&p| {
            let mut quick = 0;
            if let Some(last) = turn.analysis.last_opponent_move {
                if p.manhattan(last) <= 2 {
                    quick += CandidateBias::PATTERN_NEAR_LAST;
                }
            }
            let axis = side.axis(p);
            if axis == 0 || axis + 1 == n {
                quick += CandidateBias::PATTERN_ON_EDGE;
            }
            (quick, p)
        })
        .collect();
    let cells = rank(scored, MAX_PATTERN_CANDIDATES);
    best_by_pattern(board, turn, &cells)
}

/// Highest [`evaluate_move`] among `cells`, first one on ties.
fn best_by_pattern(board: &mut Board, turn: &Turn, cells: &[Pos]) -> Option<Pos> {
    let mut best: Option<(i64, Pos)> = None;
    for &pos in cells {
        let Some(score) = evaluate_move(board, pos, &turn.analysis) else {
            continue;
        };
        if best.map_or(true, |(b, _)| score > b) {
            best = Some((score, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

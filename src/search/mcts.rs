//! Monte Carlo tree search (UCT)
//!
//! Each iteration walks down the tree by UCT, expands one untried move
//! (closest to the center first), fills the rest of the board at random and
//! credits the winner of the filled board. Filled boards always have exactly
//! one connected side, so the winner comes from a single union-find pass.
//!
//! The budget is a number of iterations rather than wall-clock time, and the
//! random source is a seeded [`StdRng`], so a search is reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Pos, Side};
use crate::rules::winner_on_full;

/// Default UCT exploration constant
pub const DEFAULT_EXPLORATION: f64 = 1.35;
/// Default iterations per move
pub const DEFAULT_ITERATIONS: u32 = 2_000;

/// Outcome of a tree search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsResult {
    pub best_move: Option<Pos>,
    /// Visits of the chosen root child
    pub visits: u32,
    /// Share of the chosen child's playouts won by the searching side
    pub win_rate: f64,
    pub iterations: u32,
}

#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    mv: Option<Pos>,
    /// Side that played `mv`
    just_moved: Option<Side>,
    to_move: Side,
    children: Vec<usize>,
    /// Filled in the first time the node is reached
    untried: Option<Vec<Pos>>,
    wins: f64,
    visits: u32,
}

impl Node {
    fn new(parent: Option<usize>, mv: Option<Pos>, just_moved: Option<Side>, to_move: Side) -> Self {
        Self {
            parent,
            mv,
            just_moved,
            to_move,
            children: Vec::new(),
            untried: None,
            wins: 0.0,
            visits: 0,
        }
    }
}

/// Stones placed during one iteration, all taken back on drop.
struct Scratch<'a> {
    board: &'a mut Board,
    placed: Vec<Pos>,
}

impl<'a> Scratch<'a> {
    fn new(board: &'a mut Board) -> Self {
        let capacity = board.cell_count();
        Self {
            board,
            placed: Vec::with_capacity(capacity),
        }
    }

    fn place(&mut self, pos: Pos, side: Side) {
        if self.board.make_move(pos, side) {
            self.placed.push(pos);
        }
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        for &pos in self.placed.iter().rev() {
            self.board.undo_move(pos);
        }
    }
}

/// Empty cells, closest to the center first. Doubled coordinates keep the
/// distance integral on even sizes.
fn ordered_moves(board: &Board) -> Vec<Pos> {
    let span = board.size() as i32 - 1;
    let mut moves = board.empty_cells();
    moves.sort_by_key(|p| (2 * p.row as i32 - span).abs() + (2 * p.col as i32 - span).abs());
    moves
}

/// UCT searcher with a seeded random source.
#[derive(Debug, Clone)]
pub struct MctsSearcher {
    iterations: u32,
    exploration: f64,
    rng: StdRng,
}

impl MctsSearcher {
    pub fn new(iterations: u32, exploration: f64, seed: u64) -> Self {
        Self {
            iterations: iterations.max(1),
            exploration,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Most visited move for `side`. The board is unchanged on return.
    pub fn search(&mut self, board: &mut Board, side: Side) -> MctsResult {
        if board.is_full() {
            return MctsResult {
                best_move: None,
                visits: 0,
                win_rate: 0.0,
                iterations: 0,
            };
        }

        let mut tree = vec![Node::new(None, None, None, side)];
        for _ in 0..self.iterations {
            self.iterate(&mut tree, board);
        }

        let root = &tree[0];
        let mut best: Option<&Node> = None;
        for &child in &root.children {
            let node = &tree[child];
            if best.map_or(true, |b| node.visits > b.visits) {
                best = Some(node);
            }
        }

        match best {
            Some(node) => MctsResult {
                best_move: node.mv,
                visits: node.visits,
                win_rate: node.wins / f64::from(node.visits.max(1)),
                iterations: self.iterations,
            },
            None => MctsResult {
                best_move: None,
                visits: 0,
                win_rate: 0.0,
                iterations: self.iterations,
            },
        }
    }

    fn iterate(&mut self, tree: &mut Vec<Node>, board: &mut Board) {
        let mut scratch = Scratch::new(board);
        let mut current = 0;

        // Selection
        loop {
            let node = &mut tree[current];
            let untried = node
                .untried
                .get_or_insert_with(|| ordered_moves(scratch.board));
            if !untried.is_empty() || node.children.is_empty() {
                break;
            }
            current = self.select_child(tree, current);
            let child = &tree[current];
            if let (Some(mv), Some(side)) = (child.mv, child.just_moved) {
                scratch.place(mv, side);
            }
        }

        // Expansion
        let to_move = tree[current].to_move;
        let next = tree[current]
            .untried
            .as_mut()
            .filter(|moves| !moves.is_empty())
            .map(|moves| moves.remove(0));
        if let Some(mv) = next {
            scratch.place(mv, to_move);
            let id = tree.len();
            tree.push(Node::new(Some(current), Some(mv), Some(to_move), to_move.opponent()));
            tree[current].children.push(id);
            current = id;
        }

        // Simulation
        let mut empties = scratch.board.empty_cells();
        empties.shuffle(&mut self.rng);
        let mut mover = tree[current].to_move;
        for pos in empties {
            scratch.place(pos, mover);
            mover = mover.opponent();
        }
        let winner = winner_on_full(scratch.board);

        // Backpropagation
        let mut cursor = Some(current);
        while let Some(id) = cursor {
            let node = &mut tree[id];
            node.visits += 1;
            if node.just_moved == Some(winner) {
                node.wins += 1.0;
            }
            cursor = node.parent;
        }
    }

    fn select_child(&self, tree: &[Node], parent: usize) -> usize {
        let node = &tree[parent];
        let log_visits = f64::from(node.visits + 1).ln();
        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &id in &node.children {
            let child = &tree[id];
            let score = if child.visits == 0 {
                f64::INFINITY
            } else {
                let visits = f64::from(child.visits);
                child.wins / visits + self.exploration * (log_visits / visits).sqrt()
            };
            if score > best_score {
                best_score = score;
                best = id;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, red: &[(u8, u8)], blue: &[(u8, u8)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c) in red {
            board.make_move(Pos::new(r, c), Side::Red);
        }
        for &(r, c) in blue {
            board.make_move(Pos::new(r, c), Side::Blue);
        }
        board
    }

    #[test]
    fn test_ordered_moves_center_first() {
        let board = Board::new(5).unwrap();
        let moves = ordered_moves(&board);
        assert_eq!(moves[0], Pos::new(2, 2));
        assert_eq!(moves.len(), 25);
    }

    #[test]
    fn test_takes_the_decisive_cell() {
        // Whoever owns (2, 0) connects: Blue through (1, 1), Red along row 2
        let mut board = board_with(3, &[(2, 1), (2, 2)], &[(0, 1), (1, 1)]);
        let before = board.clone();
        let result = MctsSearcher::new(1_000, DEFAULT_EXPLORATION, 7).search(&mut board, Side::Blue);
        assert_eq!(result.best_move, Some(Pos::new(2, 0)));
        assert!(result.win_rate > 0.99);
        assert_eq!(board, before);
    }

    #[test]
    fn test_same_seed_same_move() {
        let mut board = board_with(5, &[(2, 2)], &[(1, 2)]);
        let a = MctsSearcher::new(300, DEFAULT_EXPLORATION, 42).search(&mut board, Side::Red);
        let b = MctsSearcher::new(300, DEFAULT_EXPLORATION, 42).search(&mut board, Side::Red);
        assert_eq!(a, b);
        let mv = a.best_move.unwrap();
        assert!(board.is_cell_empty(mv));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(2).unwrap();
        for pos in board.empty_cells() {
            board.make_move(pos, Side::Blue);
        }
        let result = MctsSearcher::new(10, DEFAULT_EXPLORATION, 1).search(&mut board, Side::Red);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_single_empty_cell() {
        let mut board = board_with(2, &[(0, 0), (1, 1)], &[(0, 1)]);
        let result = MctsSearcher::new(5, DEFAULT_EXPLORATION, 3).search(&mut board, Side::Blue);
        assert_eq!(result.best_move, Some(Pos::new(1, 0)));
        assert_eq!(result.visits, 5);
    }
}

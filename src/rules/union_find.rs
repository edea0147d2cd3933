//! Disjoint-set connectivity
//!
//! The BFS in [`super::win`] answers "has this side won" for any position.
//! On a completely filled board, which is what a Monte Carlo playout produces,
//! a single union-find pass over both sides is cheaper: exactly one side is
//! connected, so only one side needs checking.

use crate::board::{Board, Side};

/// Union-find with path halving and union by size.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets holding `a` and `b`. Returns false if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// Edge-to-edge connectivity for `side` using two virtual edge nodes.
///
/// Gives the same answer as [`super::check_win`].
pub fn connected_by_union_find(board: &Board, side: Side) -> bool {
    let size = board.size();
    let cells = board.cell_count();
    let (start, target) = (cells, cells + 1);
    let mut uf = UnionFind::new(cells + 2);

    for pos in board.positions() {
        if !board.get(pos).is(side) {
            continue;
        }
        let idx = board.index(pos);
        match side.axis(pos) {
            0 => {
                uf.union(idx, start);
            }
            a if a == size - 1 => {
                uf.union(idx, target);
            }
            _ => {}
        }
        // Each link is seen from both ends, so half the directions suffice
        for next in board.neighbors(pos).filter(|&n| n > pos) {
            if board.get(next).is(side) {
                uf.union(idx, board.index(next));
            }
        }
    }

    uf.connected(start, target)
}

/// Winner of a completely filled board.
///
/// Only Red is examined: on a full board exactly one side is connected.
pub fn winner_on_full(board: &Board) -> Side {
    if connected_by_union_find(board, Side::Red) {
        Side::Red
    } else {
        Side::Blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use crate::rules::check_win;

    #[test]
    fn test_union_find_basics() {
        let mut uf = UnionFind::new(6);
        assert!(!uf.connected(0, 5));
        assert!(uf.union(0, 1));
        assert!(uf.union(4, 5));
        assert!(uf.union(1, 4));
        assert!(!uf.union(0, 5));
        assert!(uf.connected(0, 5));
        assert!(!uf.connected(2, 3));
    }

    #[test]
    fn test_two_by_two_connection() {
        // Column 0 alone is not enough; column 1 closes the chain
        let mut board = Board::new(2).unwrap();
        board.make_move(Pos::new(0, 0), Side::Red);
        assert!(!connected_by_union_find(&board, Side::Red));
        board.make_move(Pos::new(0, 1), Side::Red);
        assert!(connected_by_union_find(&board, Side::Red));
    }

    #[test]
    fn test_agrees_with_bfs_on_filled_boards() {
        // Deterministic fills: stripes and a checker-like pattern
        let patterns: [fn(Pos) -> Side; 3] = [
            |p| if p.col % 2 == 0 { Side::Blue } else { Side::Red },
            |p| if p.row % 2 == 0 { Side::Red } else { Side::Blue },
            |p| if (p.row + 2 * p.col) % 3 == 0 { Side::Red } else { Side::Blue },
        ];
        for pattern in patterns {
            let mut board = Board::new(6).unwrap();
            for pos in board.empty_cells() {
                board.make_move(pos, pattern(pos));
            }
            for side in [Side::Red, Side::Blue] {
                assert_eq!(
                    connected_by_union_find(&board, side),
                    check_win(&board, side),
                    "disagreement for {side} on\n{board}"
                );
            }
            let expected = if check_win(&board, Side::Red) { Side::Red } else { Side::Blue };
            assert_eq!(winner_on_full(&board), expected);
        }
    }
}

//! Shortest-connection cost
//!
//! How many more stones does a side need to join its two edges? Cells are
//! graph nodes: an own stone costs 0 to enter, an empty cell costs 1, an
//! opponent stone cannot be entered. Dijkstra from every starting-edge cell,
//! then the cheapest target-edge cell gives the answer.
//!
//! The queue is drained completely instead of stopping at the first
//! target-edge cell popped, so every target-edge cell has its final distance
//! before the minimum is taken.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::board::{Board, Cell, Pos, Side};

/// Stones still needed to complete a connection.
///
/// `Unreachable` sorts after every finite cost, so `min`/`max` and `<`
/// behave, but it can never pass a threshold test like `is_within(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    Finite(u32),
    Unreachable,
}

impl Cost {
    /// True for a finite cost no greater than `limit`
    #[inline]
    pub fn is_within(self, limit: u32) -> bool {
        matches!(self, Cost::Finite(c) if c <= limit)
    }

    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            Cost::Finite(c) => Some(c),
            Cost::Unreachable => None,
        }
    }

    /// Numeric view for arithmetic, with `Unreachable` mapped to `limit`.
    #[inline]
    pub fn value_or(self, limit: u32) -> u32 {
        self.value().unwrap_or(limit)
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cost::Finite(c) => write!(f, "{c}"),
            Cost::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// A side's cheapest connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub cost: Cost,
    /// Empty cells along the route, from the starting edge toward the target
    /// edge. Own stones on the route are left out: nothing needs to be played
    /// there. Empty when the cost is 0 or unreachable.
    pub path: Vec<Pos>,
}

impl Connection {
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.path.contains(&pos)
    }
}

/// Cost of entering a cell, `None` for opponent stones.
#[inline]
fn entry_cost(cell: Cell, side: Side) -> Option<u32> {
    match cell {
        Cell::Empty => Some(1),
        Cell::Stone(owner) if owner == side => Some(0),
        Cell::Stone(_) => None,
    }
}

struct ShortestPaths {
    dist: Vec<Option<u32>>,
    parent: Vec<Option<usize>>,
    best: Option<usize>,
}

fn shortest_paths(board: &Board, side: Side) -> ShortestPaths {
    let size = board.size();
    let n = board.cell_count();
    let mut dist: Vec<Option<u32>> = vec![None; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::with_capacity(n);

    for i in 0..size {
        let pos = side.start_edge(i);
        if let Some(cost) = entry_cost(board.get(pos), side) {
            let idx = board.index(pos);
            dist[idx] = Some(cost);
            heap.push(Reverse((cost, idx)));
        }
    }

    while let Some(Reverse((d, idx))) = heap.pop() {
        if dist[idx] != Some(d) {
            continue; // stale entry
        }
        for next in board.neighbors(board.pos_at(idx)) {
            let Some(step) = entry_cost(board.get(next), side) else {
                continue;
            };
            let nd = d + step;
            let nidx = board.index(next);
            if dist[nidx].map_or(true, |old| nd < old) {
                dist[nidx] = Some(nd);
                parent[nidx] = Some(idx);
                heap.push(Reverse((nd, nidx)));
            }
        }
    }

    // First minimum in scan order along the target edge
    let mut best: Option<(u32, usize)> = None;
    for i in 0..size {
        let idx = board.index(side.target_edge(size, i));
        if let Some(d) = dist[idx] {
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, idx));
            }
        }
    }

    ShortestPaths {
        dist,
        parent,
        best: best.map(|(_, idx)| idx),
    }
}

/// Minimum number of additional stones `side` needs, with the route.
pub fn min_moves_to_win(board: &Board, side: Side) -> Connection {
    let sp = shortest_paths(board, side);
    let Some(best) = sp.best else {
        return Connection {
            cost: Cost::Unreachable,
            path: Vec::new(),
        };
    };

    let mut path = Vec::new();
    let mut cur = Some(best);
    while let Some(idx) = cur {
        let pos = board.pos_at(idx);
        if board.get(pos).is_empty() {
            path.push(pos);
        }
        cur = sp.parent[idx];
    }
    path.reverse();

    Connection {
        cost: sp.dist[best].map_or(Cost::Unreachable, Cost::Finite),
        path,
    }
}

/// Cost only, for the many probes that never look at the route.
pub fn connection_cost(board: &Board, side: Side) -> Cost {
    let sp = shortest_paths(board, side);
    sp.best
        .and_then(|idx| sp.dist[idx])
        .map_or(Cost::Unreachable, Cost::Finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::check_win;

    fn place(board: &mut Board, side: Side, cells: &[(u8, u8)]) {
        for &(r, c) in cells {
            assert!(board.make_move(Pos::new(r, c), side));
        }
    }

    #[test]
    fn test_cost_ordering() {
        assert!(Cost::Finite(0) < Cost::Finite(3));
        assert!(Cost::Finite(u32::MAX) < Cost::Unreachable);
        assert!(Cost::Finite(1).is_within(1));
        assert!(!Cost::Finite(2).is_within(1));
        assert!(!Cost::Unreachable.is_within(u32::MAX));
        assert_eq!(Cost::Unreachable.value(), None);
        assert_eq!(Cost::Unreachable.value_or(50), 50);
        assert_eq!(Cost::Finite(4).value_or(50), 4);
    }

    #[test]
    fn test_empty_board_cost_is_size() {
        for size in [2, 5, 9] {
            let board = Board::new(size).unwrap();
            for side in [Side::Red, Side::Blue] {
                let conn = min_moves_to_win(&board, side);
                assert_eq!(conn.cost, Cost::Finite(size as u32));
                assert_eq!(conn.path.len(), size);
                assert_eq!(connection_cost(&board, side), conn.cost);
            }
        }
    }

    #[test]
    fn test_path_runs_from_start_to_target_edge() {
        let board = Board::new(6).unwrap();
        for side in [Side::Red, Side::Blue] {
            let path = min_moves_to_win(&board, side).path;
            assert_eq!(side.axis(path[0]), 0);
            assert_eq!(side.axis(path[path.len() - 1]), 5);
            for pair in path.windows(2) {
                assert!(board.neighbors(pair[0]).any(|n| n == pair[1]));
            }
        }
    }

    #[test]
    fn test_single_gap_in_row() {
        let mut board = Board::new(5).unwrap();
        place(&mut board, Side::Red, &[(2, 0), (2, 1), (2, 3), (2, 4)]);

        let conn = min_moves_to_win(&board, Side::Red);
        assert_eq!(conn.cost, Cost::Finite(1));
        assert_eq!(conn.path, vec![Pos::new(2, 2)]);
    }

    #[test]
    fn test_own_stones_left_out_of_path() {
        let mut board = Board::new(5).unwrap();
        place(&mut board, Side::Blue, &[(0, 2), (1, 2)]);

        let conn = min_moves_to_win(&board, Side::Blue);
        assert_eq!(conn.cost, Cost::Finite(3));
        assert_eq!(conn.path.len(), 3);
        assert!(conn.path.iter().all(|&p| board.is_cell_empty(p)));
    }

    #[test]
    fn test_zero_cost_iff_connected() {
        let mut board = Board::new(4).unwrap();
        place(&mut board, Side::Blue, &[(0, 1), (1, 1), (2, 1)]);
        assert!(!check_win(&board, Side::Blue));
        assert_eq!(connection_cost(&board, Side::Blue), Cost::Finite(1));

        place(&mut board, Side::Blue, &[(3, 0)]);
        assert!(check_win(&board, Side::Blue));
        let conn = min_moves_to_win(&board, Side::Blue);
        assert_eq!(conn.cost, Cost::Finite(0));
        assert!(conn.path.is_empty());
    }

    #[test]
    fn test_sealed_side_is_unreachable() {
        // A full Blue column splits the board for Red
        let mut board = Board::new(5).unwrap();
        place(&mut board, Side::Blue, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);

        let conn = min_moves_to_win(&board, Side::Red);
        assert_eq!(conn.cost, Cost::Unreachable);
        assert!(conn.path.is_empty());
        assert_eq!(connection_cost(&board, Side::Red), Cost::Unreachable);
    }

    #[test]
    fn test_opponent_stones_force_detour() {
        let mut board = Board::new(3).unwrap();
        place(&mut board, Side::Red, &[(1, 0), (1, 2)]);
        place(&mut board, Side::Blue, &[(1, 1)]);

        // With the centre taken no single cell touches both Red stones
        let conn = min_moves_to_win(&board, Side::Red);
        assert_eq!(conn.cost, Cost::Finite(2));
        assert!(!conn.contains(Pos::new(1, 1)));
    }

    #[test]
    fn test_first_minimum_on_target_edge() {
        // Red on an empty 3x3 board: every target cell costs 3, the top one wins
        let board = Board::new(3).unwrap();
        let path = min_moves_to_win(&board, Side::Red).path;
        assert_eq!(path.last(), Some(&Pos::new(0, 2)));
    }
}

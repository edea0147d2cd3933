//! Win condition checking for Hex
//!
//! A side wins once its stones form a chain from its starting edge to its
//! target edge. Hex cannot end in a draw on a full board, but the engine does
//! not rely on that: a full board without a winner is reported as a draw.

use std::collections::VecDeque;

use crate::board::{Board, Side};

/// Three-valued result surfaced to front ends, plus "game continues".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(Side),
    Draw,
    Ongoing,
}

impl GameOutcome {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }
}

/// Check whether `side` owns a chain joining its two edges.
///
/// Breadth-first search seeded with every stone of `side` on its starting
/// edge, expanding through same-side neighbours. Returns as soon as a cell on
/// the target edge is dequeued. O(N^2).
pub fn check_win(board: &Board, side: Side) -> bool {
    let size = board.size();
    let mut visited = vec![false; board.cell_count()];
    let mut queue = VecDeque::with_capacity(size * 2);

    for i in 0..size {
        let pos = side.start_edge(i);
        if board.get(pos).is(side) {
            visited[board.index(pos)] = true;
            queue.push_back(pos);
        }
    }

    while let Some(pos) = queue.pop_front() {
        if side.axis(pos) == size - 1 {
            return true;
        }
        for next in board.neighbors(pos) {
            let idx = board.index(next);
            if !visited[idx] && board.get(next).is(side) {
                visited[idx] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

/// Winner, if any
pub fn winner(board: &Board) -> Option<Side> {
    [Side::Red, Side::Blue]
        .into_iter()
        .find(|&side| check_win(board, side))
}

/// Full board with no connected chain for either side
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winner(board).is_none()
}

/// Current outcome of the position
pub fn outcome(board: &Board) -> GameOutcome {
    match winner(board) {
        Some(side) => GameOutcome::Win(side),
        None if board.is_full() => GameOutcome::Draw,
        None => GameOutcome::Ongoing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

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
    fn test_empty_board_no_win() {
        let board = Board::new(5).unwrap();
        assert!(!check_win(&board, Side::Red));
        assert!(!check_win(&board, Side::Blue));
        assert_eq!(outcome(&board), GameOutcome::Ongoing);
    }

    #[test]
    fn test_red_straight_line() {
        let board = board_with(5, &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)], &[]);
        assert!(check_win(&board, Side::Red));
        assert!(!check_win(&board, Side::Blue));
        assert_eq!(winner(&board), Some(Side::Red));
    }

    #[test]
    fn test_blue_straight_line() {
        let board = board_with(5, &[], &[(0, 3), (1, 3), (2, 3), (3, 3), (4, 3)]);
        assert!(check_win(&board, Side::Blue));
        assert!(!check_win(&board, Side::Red));
    }

    #[test]
    fn test_red_line_with_gap() {
        let board = board_with(5, &[(2, 0), (2, 1), (2, 3), (2, 4)], &[]);
        assert!(!check_win(&board, Side::Red));
    }

    #[test]
    fn test_diagonal_link_connects() {
        // (1, 1) and (0, 2) touch through the (-1, +1) direction
        let board = board_with(3, &[(1, 0), (1, 1), (0, 2)], &[]);
        assert!(check_win(&board, Side::Red));
    }

    #[test]
    fn test_other_diagonal_does_not_connect() {
        // (0, 1) and (1, 2) are not hex neighbours
        let board = board_with(3, &[(0, 0), (0, 1), (1, 2)], &[]);
        assert!(!check_win(&board, Side::Red));
    }

    #[test]
    fn test_chain_through_single_shared_cell() {
        // Two arms meet only at (2, 2), which touches both through hex adjacency
        let board = board_with(
            5,
            &[],
            &[(0, 3), (1, 3), (2, 2), (3, 2), (4, 1)],
        );
        assert!(check_win(&board, Side::Blue));

        let mut cut = board.clone();
        cut.undo_move(Pos::new(2, 2));
        assert!(!check_win(&cut, Side::Blue));
    }

    #[test]
    fn test_no_win_without_starting_edge() {
        // Reaches the target edge but never touches the start edge
        let board = board_with(4, &[(1, 1), (1, 2), (1, 3)], &[]);
        assert!(!check_win(&board, Side::Red));
    }

    #[test]
    fn test_corner_touches_both_edges_on_tiny_board() {
        // On a 2x2 board (1, 0) -> (0, 1) is a single diagonal link for Red
        let board = board_with(2, &[(1, 0), (0, 1)], &[]);
        assert!(check_win(&board, Side::Red));
        assert!(!check_win(&board, Side::Blue));
    }

    #[test]
    fn test_full_board_has_exactly_one_winner() {
        // Alternate colours by column: Blue owns full columns 0, 2, 4
        let mut board = Board::new(5).unwrap();
        for pos in board.empty_cells() {
            let side = if pos.col % 2 == 0 { Side::Blue } else { Side::Red };
            board.make_move(pos, side);
        }
        assert_eq!(winner(&board), Some(Side::Blue));
        assert!(!is_draw(&board));
        assert_eq!(outcome(&board), GameOutcome::Win(Side::Blue));
    }
}

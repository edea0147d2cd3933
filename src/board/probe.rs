//! Scoped hypothetical moves
//!
//! Search code never copies the board. It places a stone, looks at the
//! result, and takes the stone back. [`Probe`] ties the take-back to scope:
//! the stone is removed when the guard drops, so an early `return` or `break`
//! inside a probing loop cannot leave a hypothetical stone behind.
//!
//! ```
//! use hex::board::{Board, Pos, Side};
//!
//! let mut board = Board::new(5).unwrap();
//! let pos = Pos::new(2, 2);
//! {
//!     let probe = board.probe(pos, Side::Red).unwrap();
//!     assert!(!probe.is_cell_empty(pos));
//! }
//! assert!(board.is_cell_empty(pos));
//! ```

use std::ops::{Deref, DerefMut};

use super::{Board, Pos, Side};

/// Guard for a stone placed by [`Board::probe`].
///
/// Dereferences to the board, so probes nest: `probe.probe(..)` places a
/// second stone that is removed before the first.
pub struct Probe<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl<'a> Probe<'a> {
    pub(super) fn new(board: &'a mut Board, pos: Pos, side: Side) -> Option<Self> {
        if board.make_move(pos, side) {
            Some(Self { board, pos })
        } else {
            None
        }
    }

    /// Position of the hypothetical stone
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.pos);
    }
}

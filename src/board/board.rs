//! Board structure for an N x N rhombic Hex grid

use super::probe::Probe;
use super::{Cell, Pos, Side, HEX_DIRECTIONS, MAX_SIZE, MIN_SIZE};
use crate::error::BoardError;

/// Game board.
///
/// The size is fixed for the lifetime of the board. Cells only change through
/// [`Board::make_move`] and [`Board::undo_move`]; search code goes through
/// [`Board::probe`] so a hypothetical stone can never outlive its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board, rejecting sizes outside `MIN_SIZE..=MAX_SIZE`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::SizeOutOfRange {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Clear every cell, keeping the size
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Center cell (rounded down on even sizes)
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Signed coordinate check, for raw input
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Turn raw coordinates into a position on this board
    #[inline]
    pub fn pos(&self, row: i32, col: i32) -> Option<Pos> {
        self.contains(row, col).then(|| Pos::new(row as u8, col as u8))
    }

    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        pos.row as usize * self.size + pos.col as usize
    }

    #[inline]
    pub fn pos_at(&self, index: usize) -> Pos {
        Pos::new((index / self.size) as u8, (index % self.size) as u8)
    }

    #[inline]
    fn in_bounds(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// Get the cell at an in-bounds position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Bounds-checked read. `None` marks coordinates off the board.
    pub fn cell_at(&self, row: i32, col: i32) -> Option<Cell> {
        self.pos(row, col).map(|pos| self.get(pos))
    }

    /// Check if position is on the board and empty
    #[inline]
    pub fn is_cell_empty(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.get(pos).is_empty()
    }

    /// Place a stone. Returns false, leaving the board untouched, when the
    /// position is off the board or already occupied.
    pub fn make_move(&mut self, pos: Pos, side: Side) -> bool {
        if !self.is_cell_empty(pos) {
            return false;
        }
        let idx = self.index(pos);
        self.cells[idx] = Cell::Stone(side);
        true
    }

    /// Like [`Board::make_move`], but says why the move was refused.
    pub fn try_move(&mut self, pos: Pos, side: Side) -> Result<(), BoardError> {
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds {
                row: pos.row as i32,
                col: pos.col as i32,
            });
        }
        if !self.make_move(pos, side) {
            return Err(BoardError::Occupied(pos));
        }
        Ok(())
    }

    /// Reset a cell to empty. Off-board positions are ignored; the previous
    /// occupant is not checked.
    pub fn undo_move(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = Cell::Empty;
        }
    }

    /// Place a hypothetical stone that is removed when the returned guard drops.
    pub fn probe(&mut self, pos: Pos, side: Side) -> Option<Probe<'_>> {
        Probe::new(self, pos, side)
    }

    /// True iff no empty cell remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Empty cells in scan order
    pub fn empty_cells(&self) -> Vec<Pos> {
        (0..self.cells.len())
            .filter(|&i| self.cells[i].is_empty())
            .map(|i| self.pos_at(i))
            .collect()
    }

    /// All cells in scan order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(move |i| self.pos_at(i))
    }

    /// Number of stones a side has on the board
    pub fn stone_count(&self, side: Side) -> usize {
        self.cells.iter().filter(|c| c.is(side)).count()
    }

    /// Total stones on board
    pub fn total_stones(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// In-bounds hex neighbours of `pos` (up to six)
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        HEX_DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            self.pos(pos.row as i32 + dr, pos.col as i32 + dc)
        })
    }

    /// Count neighbours of `pos` holding a stone of `side`
    pub fn friendly_neighbors(&self, pos: Pos, side: Side) -> usize {
        self.neighbors(pos).filter(|&n| self.get(n).is(side)).count()
    }
}

/// Rhombus layout, one row per line, each row shifted one column right.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.size {
            write!(f, "{:>2} ", col)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{}{:>2}  ", " ".repeat(row * 2), row)?;
            for col in 0..self.size {
                let symbol = match self.get(Pos::new(row as u8, col as u8)) {
                    Cell::Empty => "..",
                    Cell::Stone(Side::Red) => "RR",
                    Cell::Stone(Side::Blue) => "BB",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

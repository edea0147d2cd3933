//! Board representation for Hex

pub mod board;
pub mod probe;


// Re-exports
pub use board::Board;
pub use probe::Probe;

/// Smallest board the engine accepts
pub const MIN_SIZE: usize = 2;
/// Largest board the engine accepts
pub const MAX_SIZE: usize = 20;
/// Size range offered by the interactive front ends
pub const UI_MIN_SIZE: usize = 7;
pub const UI_MAX_SIZE: usize = 11;

/// The six hex neighbours of `(row, col)` as `(d_row, d_col)` offsets.
pub const HEX_DIRECTIONS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// The two players.
///
/// Red connects the left edge (column 0) to the right edge (column N-1).
/// Blue connects the top edge (row 0) to the bottom edge (row N-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Coordinate along which this side travels: column for Red, row for Blue.
    ///
    /// The starting edge is where this is 0 and the target edge is where it
    /// equals `size - 1`.
    #[inline]
    pub fn axis(self, pos: Pos) -> usize {
        match self {
            Side::Red => pos.col as usize,
            Side::Blue => pos.row as usize,
        }
    }

    /// Cell at `index` along the starting edge of a board of `size`.
    #[inline]
    pub fn start_edge(self, index: usize) -> Pos {
        self.edge_cell(0, index)
    }

    /// Cell at `index` along the target edge of a board of `size`.
    #[inline]
    pub fn target_edge(self, size: usize, index: usize) -> Pos {
        self.edge_cell(size - 1, index)
    }

    fn edge_cell(self, line: usize, index: usize) -> Pos {
        match self {
            Side::Red => Pos::new(index as u8, line as u8),
            Side::Blue => Pos::new(line as u8, index as u8),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Blue => "Blue",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Side),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn is(self, side: Side) -> bool {
        self == Cell::Stone(side)
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_SIZE && (col as usize) < MAX_SIZE);
        Self { row, col }
    }

    /// Manhattan distance in (row, col) space
    #[inline]
    pub fn manhattan(self, other: Pos) -> usize {
        (self.row as i32 - other.row as i32).unsigned_abs() as usize
            + (self.col as i32 - other.col as i32).unsigned_abs() as usize
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Scan order: row-major.
impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

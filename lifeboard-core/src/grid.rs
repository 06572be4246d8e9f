//! Positions on the square board and 8-connected neighbourhoods.
//!
//! Coordinates are 1-indexed: the top-left cell is `(1, 1)` and the
//! bottom-right cell of a board of size `n` is `(n, n)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row/column offsets of the 8 neighbours, in row-major order.
///
/// Move generation and the shuffle both walk neighbours in this order, which
/// keeps move lists deterministic for a fixed piece order.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Pos {
        Pos { row, col }
    }

    /// Check if this position lies on a board of the given size.
    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        let size = size as i32;
        self.row >= 1 && self.col >= 1 && self.row <= size && self.col <= size
    }

    /// Offset this position by `(d_row, d_col)`. The result may be off the board.
    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Pos {
        Pos::new(self.row + d_row, self.col + d_col)
    }

    /// Iterate over the in-bounds neighbours of this position, excluding itself.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Pos> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dr, dc)| self.offset(dr, dc))
            .filter(move |pos| pos.in_bounds(size))
    }

    /// Row-major index of this position (0-based). Caller must ensure it is in bounds.
    #[inline]
    pub fn index(self, size: usize) -> usize {
        debug_assert!(self.in_bounds(size));
        (self.row as usize - 1) * size + (self.col as usize - 1)
    }

    /// Iterate over every cell of a board in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Pos> {
        let n = size as i32;
        (1..=n).flat_map(move |row| (1..=n).map(move |col| Pos::new(row, col)))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

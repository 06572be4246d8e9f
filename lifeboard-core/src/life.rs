//! The shuffle: a two-colour Game of Life generation applied after every move.
//!
//! ```text
//! occupied, 2-3 neighbours   -> survives with its colour
//! otherwise, 3 neighbours    -> spawns, coloured by the neighbour majority
//! everything else            -> empty
//! ```
//!
//! Neighbours of both colours count towards the total. The whole generation
//! is computed from the old state; no cell sees a neighbour's new value.

use crate::grid::Pos;
use crate::Player;

/// Owner of every cell on the board, indexed row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupancy {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl Occupancy {
    /// Build the cell map for two piece lists. Positions must be in bounds.
    pub fn new(size: usize, first: &[Pos], second: &[Pos]) -> Occupancy {
        let mut cells = vec![None; size * size];
        for &pos in first {
            cells[pos.index(size)] = Some(Player::First);
        }
        for &pos in second {
            cells[pos.index(size)] = Some(Player::Second);
        }
        Occupancy { size, cells }
    }

    /// Owner of a cell, or `None` if it is empty or off the board.
    #[inline]
    pub fn owner(&self, pos: Pos) -> Option<Player> {
        if pos.in_bounds(self.size) {
            self.cells[pos.index(self.size)]
        } else {
            None
        }
    }

    #[inline]
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.owner(pos).is_some()
    }

    /// Count each side's pieces among the 8 neighbours of `pos`.
    pub fn neighbor_counts(&self, pos: Pos) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for neighbor in pos.neighbors(self.size) {
            match self.owner(neighbor) {
                Some(Player::First) => counts.first += 1,
                Some(Player::Second) => counts.second += 1,
                None => {}
            }
        }
        counts
    }
}

/// Pieces of each side around a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    pub first: u8,
    pub second: u8,
}

impl NeighborCounts {
    #[inline]
    pub fn total(self) -> u8 {
        self.first + self.second
    }

    /// Colour of a piece spawned from these neighbours.
    ///
    /// Ties go to the second player. A tie cannot happen at a total of 3,
    /// but the rule is kept exact for any configuration.
    #[inline]
    pub fn majority(self) -> Player {
        if self.first > self.second {
            Player::First
        } else {
            Player::Second
        }
    }
}

/// Fate of one cell in the next generation.
pub fn next_cell(current: Option<Player>, counts: NeighborCounts) -> Option<Player> {
    let total = counts.total();
    match current {
        Some(owner) if total == 2 || total == 3 => Some(owner),
        _ if total == 3 => Some(counts.majority()),
        _ => None,
    }
}

/// Compute the next generation of both piece lists.
///
/// The returned lists are in row-major order.
pub fn next_generation(size: usize, first: &[Pos], second: &[Pos]) -> (Vec<Pos>, Vec<Pos>) {
    let occupancy = Occupancy::new(size, first, second);
    let mut next_first = Vec::with_capacity(first.len() + 4);
    let mut next_second = Vec::with_capacity(second.len() + 4);

    for pos in Pos::all(size) {
        let counts = occupancy.neighbor_counts(pos);
        match next_cell(occupancy.owner(pos), counts) {
            Some(Player::First) => next_first.push(pos),
            Some(Player::Second) => next_second.push(pos),
            None => {}
        }
    }

    (next_first, next_second)
}

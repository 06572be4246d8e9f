//! Game of Life board game logic.
//!
//! Two players move pieces on a square board. After every move the whole
//! board goes through one generation of a two-colour Game of Life (the
//! "shuffle"), which kills, keeps and spawns pieces for both sides at once.
//!
//! # Board
//!
//! ```text
//!   12345678
//! 1| bb r   |
//! 2|       r|
//! 3|     b  |
//! 4|      r |
//! 5|        |
//! 6|    r   |
//! 7|b   b   |
//! 8|   b    |
//!  ‾‾‾‾‾‾‾‾‾‾
//! ```
//!
//! Rows and columns are 1-indexed. `b` marks first-player pieces, `r`
//! second-player pieces.
//!
//! # Turn
//!
//! ```text
//! select move (strategy) -> move one piece to an empty adjacent cell
//!                        -> shuffle -> switch player -> finished?
//! ```
//!
//! A game ends when a side has no pieces, the player to move has no legal
//! move, or the move ceiling is exceeded (forced draw).

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod life;
pub mod scoring;
pub mod strategy;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use board::Board;
pub use config::{GameConfig, DRAW_SCORE};
pub use error::GameError;
pub use grid::Pos;
pub use scoring::end_score;
pub use strategy::{select_move, PlayerInput, Strategy};

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Character used when rendering this player's pieces.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Player::First => 'b',
            Player::Second => 'r',
        }
    }

    /// Both players, first to move first.
    pub fn all() -> impl Iterator<Item = Player> {
        [Player::First, Player::Second].into_iter()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => f.write_str("first (blue)"),
            Player::Second => f.write_str("second (red)"),
        }
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// The winning player, if the game was not drawn.
    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{} player won", player),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Relocation of a single piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    #[inline]
    pub const fn new(from: Pos, to: Pos) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from {} to {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Player::Second.opponent(), Player::First);
    }

    #[test]
    fn test_player_glyph() {
        assert_eq!(Player::First.glyph(), 'b');
        assert_eq!(Player::Second.glyph(), 'r');
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(Outcome::Win(Player::Second).winner(), Some(Player::Second));
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_move_display() {
        let mov = Move::new(Pos::new(6, 5), Pos::new(5, 6));
        assert_eq!(mov.to_string(), "from (6, 5) to (5, 6)");
    }
}

//! Board dimensions and game limits.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Score of a drawn terminal position during lookahead.
pub const DRAW_SCORE: i32 = 0;

/// Settings fixed for the lifetime of a board.
///
/// Missing fields take their default when deserialised, so a config file
/// only needs to name what it changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board.
    pub size: usize,
    /// Pieces each side starts with.
    pub pieces: usize,
    /// Number of moves after which the game is a forced draw.
    pub max_moves: u32,
}

impl GameConfig {
    pub const DEFAULT_SIZE: usize = 8;
    pub const DEFAULT_PIECES: usize = 12;
    pub const DEFAULT_MAX_MOVES: u32 = 250;

    /// Build a config, rejecting settings that cannot produce a legal board.
    pub fn new(size: usize, pieces: usize, max_moves: u32) -> Result<GameConfig, GameError> {
        let config = GameConfig {
            size,
            pieces,
            max_moves,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check `size > 1`, `pieces > 1` and `2 * pieces < size * size`.
    ///
    /// `size * size` must also fit in an `i32`, since scores and
    /// coordinates are signed.
    pub fn validate(&self) -> Result<(), GameError> {
        let cells = self
            .size
            .checked_mul(self.size)
            .filter(|&cells| cells <= i32::MAX as usize);
        let cells = match cells {
            Some(cells) if self.size > 1 => cells,
            _ => return Err(GameError::InvalidSize(self.size)),
        };
        if self.pieces <= 1 {
            return Err(GameError::InvalidPieceCount(self.pieces));
        }
        if self.pieces.checked_mul(2).map_or(true, |taken| taken >= cells) {
            return Err(GameError::TooManyPieces {
                size: self.size,
                pieces: self.pieces,
            });
        }
        Ok(())
    }

    /// Cells on the board. Only meaningful for a validated config.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Score of a won terminal position; a lost one scores the negation.
    #[inline]
    pub fn best_score(&self) -> i32 {
        self.cell_count() as i32
    }

    #[inline]
    pub fn worst_score(&self) -> i32 {
        -self.best_score()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: Self::DEFAULT_SIZE,
            pieces: Self::DEFAULT_PIECES,
            max_moves: Self::DEFAULT_MAX_MOVES,
        }
    }
}

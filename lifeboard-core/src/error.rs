//! Errors raised when a caller breaks the game's contract.
//!
//! None of these are transient: each one means the caller passed an invalid
//! configuration, an illegal move, or asked a question the board cannot
//! answer yet.

use thiserror::Error;

use crate::grid::Pos;
use crate::strategy::Strategy;
use crate::Player;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board size must be greater than 1 and its square must fit in an i32, got {0}")]
    InvalidSize(usize),

    #[error("pieces per side must be greater than 1, got {0}")]
    InvalidPieceCount(usize),

    #[error("{pieces} pieces per side do not fit on a {size}x{size} board")]
    TooManyPieces { size: usize, pieces: usize },

    #[error("position {0} is outside the board")]
    OutOfBounds(Pos),

    #[error("{player} has no piece at {pos}")]
    NotOwned { player: Player, pos: Pos },

    #[error("position {0} is already occupied")]
    Occupied(Pos),

    #[error("more than one piece placed at {0}")]
    DuplicatePiece(Pos),

    #[error("game is not finished")]
    NotFinished,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("{0} strategy needs an input adapter")]
    MissingInput(Strategy),

    #[error("cannot simulate a game with an interactive player")]
    InteractiveStrategy,

    #[error("selection {index} is out of range (0..{len})")]
    InvalidSelection { index: usize, len: usize },

    #[error("player input was closed")]
    InputClosed,

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

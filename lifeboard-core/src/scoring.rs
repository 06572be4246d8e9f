//! Fixed scores for finished positions, used by lookahead.

use crate::board::Board;
use crate::config::DRAW_SCORE;
use crate::error::GameError;
use crate::{Outcome, Player};

/// Score a finished board from `viewer`'s side.
///
/// Returns `best_score()` for a win, `worst_score()` for a loss and
/// [`DRAW_SCORE`] for a draw. Fails if the game is still going.
pub fn end_score(board: &Board, viewer: Player) -> Result<i32, GameError> {
    let score = match board.game_result()? {
        Outcome::Win(winner) if winner == viewer => board.config().best_score(),
        Outcome::Win(_) => board.config().worst_score(),
        Outcome::Draw => DRAW_SCORE,
    };
    Ok(score)
}

/// Viewer's piece count minus the opponent's.
#[inline]
pub fn piece_difference(board: &Board, viewer: Player) -> i32 {
    board.piece_count(viewer) as i32 - board.piece_count(viewer.opponent()) as i32
}

//! Move-selection strategies.
//!
//! Every evaluator takes the board and the active player's legal moves and
//! returns one of those moves. Evaluators only read the board; what-if
//! positions are built on clones.
//!
//! | Strategy | Picks the first move that...                                   |
//! |----------|----------------------------------------------------------------|
//! | Random   | (uniform choice)                                                |
//! | Greedy   | minimises the opponent's pieces after the shuffle               |
//! | Safe     | maximises the mover's pieces after the shuffle                  |
//! | Optimal  | maximises mover's pieces minus opponent's after the shuffle     |
//! | Minimax  | scores best after the opponent answers with Optimal             |
//! | Player   | a human picks through a [`PlayerInput`] adapter                 |

use std::fmt;
use std::str::FromStr;

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::GameError;
use crate::grid::Pos;
use crate::scoring::{end_score, piece_difference};
use crate::{Move, Outcome, Player};

/// Decision procedure bound to a side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Player,
    Random,
    Greedy,
    Safe,
    Optimal,
    Minimax,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Player,
        Strategy::Random,
        Strategy::Greedy,
        Strategy::Safe,
        Strategy::Optimal,
        Strategy::Minimax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Player => "player",
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Safe => "safe",
            Strategy::Optimal => "optimal",
            Strategy::Minimax => "minimax",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strategy::Player => "Human controlled",
            Strategy::Random => "Chooses a random move",
            Strategy::Greedy => "Aims to minimise opponent pieces",
            Strategy::Safe => "Aims to maximise own pieces",
            Strategy::Optimal => "Aims to maximise the piece difference between self and opponent",
            Strategy::Minimax => "Aims to leave the opponent's best reply as weak as possible",
        }
    }

    /// Check if this strategy needs a human.
    #[inline]
    pub fn is_interactive(self) -> bool {
        self == Strategy::Player
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| GameError::UnknownStrategy(s.to_string()))
    }
}

/// Callback through which a human picks a move.
///
/// Each method gets the choices in display order and returns the index of
/// the one picked, or `None` if no more input is available.
pub trait PlayerInput {
    /// Pick one of the player's movable pieces.
    fn choose_piece(&mut self, player: Player, pieces: &[Pos]) -> Option<usize>;

    /// Pick a destination for the chosen piece.
    fn choose_destination(&mut self, from: Pos, destinations: &[Pos]) -> Option<usize>;
}

/// Pick a move for the active player using `strategy`.
///
/// `input` is only consulted for [`Strategy::Player`] and must be present
/// for it.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    strategy: Strategy,
    rng: &mut R,
    input: Option<&mut dyn PlayerInput>,
) -> Result<Move, GameError> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return Err(GameError::NoLegalMoves);
    }

    match strategy {
        Strategy::Player => {
            let input = input.ok_or(GameError::MissingInput(strategy))?;
            player_move(board, &moves, input)
        }
        Strategy::Random => random_move(&moves, rng),
        Strategy::Greedy => greedy(board, &moves),
        Strategy::Safe => safe(board, &moves),
        Strategy::Optimal => optimal(board, &moves),
        Strategy::Minimax => minimax(board, &moves),
    }
}

// ========== Evaluators ==========

/// Uniform choice among `moves`.
pub fn random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Result<Move, GameError> {
    if moves.is_empty() {
        return Err(GameError::NoLegalMoves);
    }
    Ok(moves[rng.random_range(0..moves.len())])
}

/// First move leaving the opponent the fewest pieces.
pub fn greedy(board: &Board, moves: &[Move]) -> Result<Move, GameError> {
    let opponent = board.active_player().opponent();
    first_best(board, moves, "greedy", |child| {
        -(child.piece_count(opponent) as i32)
    })
}

/// First move leaving the mover the most pieces.
pub fn safe(board: &Board, moves: &[Move]) -> Result<Move, GameError> {
    let mover = board.active_player();
    first_best(board, moves, "safe", |child| child.piece_count(mover) as i32)
}

/// First move with the largest piece difference in the mover's favour.
pub fn optimal(board: &Board, moves: &[Move]) -> Result<Move, GameError> {
    let mover = board.active_player();
    first_best(board, moves, "optimal", |child| piece_difference(child, mover))
}

/// Two-ply lookahead: the mover's move, then the opponent's Optimal reply.
///
/// A move that wins on the spot is returned immediately. Otherwise a move
/// that ends the game scores its end score; a move that does not is scored
/// after the reply, by end score if the reply ends the game and by piece
/// difference if not. The first move with the highest score wins.
pub fn minimax(board: &Board, moves: &[Move]) -> Result<Move, GameError> {
    let mover = board.active_player();
    let mut best: Option<(Move, i32)> = None;

    for &mov in moves {
        let child = after_move(board, mov)?;

        let score = if child.finished() {
            if child.game_result()? == Outcome::Win(mover) {
                trace!("minimax candidate {} wins immediately", mov);
                return Ok(mov);
            }
            end_score(&child, mover)?
        } else {
            score_after_reply(child, mover)?
        };

        trace!("minimax candidate {} scores {}", mov, score);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((mov, score));
        }
    }

    best.map(|(mov, _)| mov).ok_or(GameError::NoLegalMoves)
}

/// Let the opponent answer with Optimal and score the result for `mover`.
fn score_after_reply(mut child: Board, mover: Player) -> Result<i32, GameError> {
    child.switch_active_player();
    // Opponent left without a legal reply loses on the spot
    if child.finished() {
        return end_score(&child, mover);
    }

    let replies = child.legal_moves();
    let reply = optimal(&child, &replies)?;
    child.apply_move(reply)?;
    child.switch_active_player();

    if child.finished() {
        end_score(&child, mover)
    } else {
        Ok(piece_difference(&child, mover))
    }
}

/// Ask a human for a move: first a piece, then one of its destinations.
///
/// Only pieces with at least one legal move are offered. Pieces and
/// destinations are both listed in row-major order.
pub fn player_move(
    board: &Board,
    moves: &[Move],
    input: &mut dyn PlayerInput,
) -> Result<Move, GameError> {
    let player = board.active_player();

    let mut pieces: Vec<Pos> = board
        .pieces(player)
        .iter()
        .copied()
        .filter(|&from| moves.iter().any(|mov| mov.from == from))
        .collect();
    pieces.sort();
    if pieces.is_empty() {
        return Err(GameError::NoLegalMoves);
    }
    let from = pick(&pieces, input.choose_piece(player, &pieces))?;

    let mut destinations: Vec<Pos> = moves
        .iter()
        .filter(|mov| mov.from == from)
        .map(|mov| mov.to)
        .collect();
    destinations.sort();
    let to = pick(&destinations, input.choose_destination(from, &destinations))?;

    Ok(Move::new(from, to))
}

fn pick(choices: &[Pos], index: Option<usize>) -> Result<Pos, GameError> {
    let index = index.ok_or(GameError::InputClosed)?;
    choices
        .get(index)
        .copied()
        .ok_or(GameError::InvalidSelection {
            index,
            len: choices.len(),
        })
}

// ========== Helpers ==========

fn after_move(board: &Board, mov: Move) -> Result<Board, GameError> {
    let mut copy = board.clone();
    copy.apply_move(mov)?;
    Ok(copy)
}

/// Apply each move to a copy and keep the first one with the highest score.
fn first_best<F>(board: &Board, moves: &[Move], label: &str, score: F) -> Result<Move, GameError>
where
    F: Fn(&Board) -> i32,
{
    let mut best: Option<(Move, i32)> = None;

    for &mov in moves {
        let child = after_move(board, mov)?;
        let value = score(&child);
        trace!("{} candidate {} scores {}", label, mov, value);
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((mov, value));
        }
    }

    best.map(|(mov, _)| mov).ok_or(GameError::NoLegalMoves)
}

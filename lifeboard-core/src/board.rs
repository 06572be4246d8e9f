//! Board state: both sides' pieces, the move counter and whose turn it is.
//!
//! Pieces are kept as ordered lists rather than a cell map so that move
//! generation follows piece order, which keeps strategy tie-breaks
//! reproducible. Cell lookups go through [`Occupancy`], rebuilt on demand.

use std::fmt;

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::grid::Pos;
use crate::life::{self, Occupancy};
use crate::strategy::Strategy;
use crate::{Move, Outcome, Player};

/// A game in progress.
///
/// `Clone` is a full snapshot: strategies mutate clones freely while
/// evaluating candidate moves, and the source board is never affected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    config: GameConfig,
    first: Vec<Pos>,
    second: Vec<Pos>,
    move_count: u32,
    active: Player,
    strategies: [Strategy; 2],
}

impl Board {
    /// Create a default-sized board with random piece placement.
    pub fn new(first: Strategy, second: Strategy) -> Board {
        Board::generate(GameConfig::default(), [first, second], &mut rand::rng())
    }

    /// Create a board with random piece placement for the given config.
    ///
    /// Each side receives `config.pieces` pieces on distinct empty cells,
    /// first player's pieces placed first. The first player moves first.
    pub fn random<R: Rng + ?Sized>(
        config: GameConfig,
        first: Strategy,
        second: Strategy,
        rng: &mut R,
    ) -> Result<Board, GameError> {
        config.validate()?;
        Ok(Board::generate(config, [first, second], rng))
    }

    /// Create a board with explicit piece placement.
    ///
    /// Both sides play [`Strategy::Random`] until changed with
    /// [`Board::with_strategies`].
    pub fn from_pieces(
        config: GameConfig,
        first: Vec<Pos>,
        second: Vec<Pos>,
        active: Player,
    ) -> Result<Board, GameError> {
        config.validate()?;

        let mut seen = vec![false; config.cell_count()];
        for &pos in first.iter().chain(second.iter()) {
            if !pos.in_bounds(config.size) {
                return Err(GameError::OutOfBounds(pos));
            }
            let idx = pos.index(config.size);
            if seen[idx] {
                return Err(GameError::DuplicatePiece(pos));
            }
            seen[idx] = true;
        }

        Ok(Board {
            config,
            first,
            second,
            move_count: 0,
            active,
            strategies: [Strategy::Random, Strategy::Random],
        })
    }

    /// Bind a strategy to each side.
    pub fn with_strategies(mut self, first: Strategy, second: Strategy) -> Board {
        self.strategies = [first, second];
        self
    }

    fn generate<R: Rng + ?Sized>(config: GameConfig, strategies: [Strategy; 2], rng: &mut R) -> Board {
        let mut board = Board {
            config,
            first: Vec::with_capacity(config.pieces),
            second: Vec::with_capacity(config.pieces),
            move_count: 0,
            active: Player::First,
            strategies,
        };
        for player in Player::all() {
            board.assign_pieces(player, rng);
        }
        board
    }

    /// Place `config.pieces` pieces for a player on random empty cells.
    ///
    /// Terminates because a validated config leaves more than half the
    /// board empty.
    fn assign_pieces<R: Rng + ?Sized>(&mut self, player: Player, rng: &mut R) {
        let size = self.config.size as i32;
        for _ in 0..self.config.pieces {
            let pos = loop {
                let candidate = Pos::new(rng.random_range(1..=size), rng.random_range(1..=size));
                if !self.is_occupied(candidate) {
                    break candidate;
                }
            };
            self.pieces_mut(player).push(pos);
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn active_player(&self) -> Player {
        self.active
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Strategy bound to a side at creation.
    #[inline]
    pub fn strategy(&self, player: Player) -> Strategy {
        match player {
            Player::First => self.strategies[0],
            Player::Second => self.strategies[1],
        }
    }

    #[inline]
    pub fn active_strategy(&self) -> Strategy {
        self.strategy(self.active)
    }

    /// A player's pieces, in stored order.
    #[inline]
    pub fn pieces(&self, player: Player) -> &[Pos] {
        match player {
            Player::First => &self.first,
            Player::Second => &self.second,
        }
    }

    #[inline]
    fn pieces_mut(&mut self, player: Player) -> &mut Vec<Pos> {
        match player {
            Player::First => &mut self.first,
            Player::Second => &mut self.second,
        }
    }

    #[inline]
    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces(player).len()
    }

    /// Who owns the piece at `pos`, if anyone.
    pub fn owner(&self, pos: Pos) -> Option<Player> {
        if self.first.contains(&pos) {
            Some(Player::First)
        } else if self.second.contains(&pos) {
            Some(Player::Second)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.owner(pos).is_some()
    }

    /// Snapshot of every cell's owner.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::new(self.config.size, &self.first, &self.second)
    }

    // ========== Move Generation ==========

    /// All legal moves for a player.
    ///
    /// Pieces are visited in stored order and each piece's neighbours in
    /// row-major order, so the result is deterministic.
    pub fn available_moves(&self, player: Player) -> Vec<Move> {
        let occupancy = self.occupancy();
        let pieces = self.pieces(player);
        let mut moves = Vec::with_capacity(pieces.len() * 8);

        for &from in pieces {
            for to in from.neighbors(self.config.size) {
                if !occupancy.is_occupied(to) {
                    moves.push(Move::new(from, to));
                }
            }
        }

        moves
    }

    /// All legal moves for the active player.
    #[inline]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.available_moves(self.active)
    }

    /// Check if a player has at least one legal move.
    pub fn has_moves(&self, player: Player) -> bool {
        let occupancy = self.occupancy();
        self.pieces(player).iter().any(|&from| {
            from.neighbors(self.config.size)
                .any(|to| !occupancy.is_occupied(to))
        })
    }

    // ========== Apply ==========

    /// Apply a move for the active player. See [`Board::apply_move_for`].
    #[inline]
    pub fn apply_move(&mut self, mov: Move) -> Result<(), GameError> {
        self.apply_move_for(mov, self.active)
    }

    /// Move one of `player`'s pieces, then run the shuffle.
    ///
    /// The source must hold one of the player's pieces and the destination
    /// must be an empty cell on the board. Adjacency is not checked; moves
    /// from [`Board::available_moves`] are always adjacent.
    ///
    /// The active player does not change.
    pub fn apply_move_for(&mut self, mov: Move, player: Player) -> Result<(), GameError> {
        let index = self
            .pieces(player)
            .iter()
            .position(|&pos| pos == mov.from)
            .ok_or(GameError::NotOwned {
                player,
                pos: mov.from,
            })?;
        if !mov.to.in_bounds(self.config.size) {
            return Err(GameError::OutOfBounds(mov.to));
        }
        if self.is_occupied(mov.to) {
            return Err(GameError::Occupied(mov.to));
        }

        let pieces = self.pieces_mut(player);
        pieces.remove(index);
        pieces.push(mov.to);

        self.shuffle();
        self.move_count += 1;
        Ok(())
    }

    /// Replace both piece lists with their next generation.
    fn shuffle(&mut self) {
        let (first, second) = life::next_generation(self.config.size, &self.first, &self.second);
        self.first = first;
        self.second = second;
    }

    /// Hand the turn to the other player.
    #[inline]
    pub fn switch_active_player(&mut self) {
        self.active = self.active.opponent();
    }

    // ========== Termination ==========

    /// Check if the game is over.
    ///
    /// A game ends when either side has no pieces, the active player has no
    /// legal move, or more than `max_moves` moves have been played.
    pub fn finished(&self) -> bool {
        self.first.is_empty()
            || self.second.is_empty()
            || !self.has_moves(self.active)
            || self.move_count > self.config.max_moves
    }

    /// Result of a finished game.
    ///
    /// ```text
    /// move ceiling exceeded           -> draw
    /// neither side can move           -> draw
    /// active side cannot move         -> opponent wins
    /// otherwise                       -> active side wins
    /// ```
    pub fn game_result(&self) -> Result<Outcome, GameError> {
        if !self.finished() {
            return Err(GameError::NotFinished);
        }

        let opponent = self.active.opponent();
        let active_can_move = self.has_moves(self.active);
        let opponent_can_move = self.has_moves(opponent);

        let outcome = if self.move_count > self.config.max_moves {
            Outcome::Draw
        } else if !active_can_move && !opponent_can_move {
            Outcome::Draw
        } else if !active_can_move {
            Outcome::Win(opponent)
        } else {
            Outcome::Win(self.active)
        };
        Ok(outcome)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupancy = self.occupancy();
        let size = self.config.size;

        write!(f, "  ")?;
        for col in 1..=size {
            write!(f, "{}", col)?;
        }
        writeln!(f)?;

        for row in 1..=size as i32 {
            write!(f, "{}|", row)?;
            for col in 1..=size as i32 {
                let glyph = occupancy
                    .owner(Pos::new(row, col))
                    .map(Player::glyph)
                    .unwrap_or(' ');
                write!(f, "{}", glyph)?;
            }
            writeln!(f, "|")?;
        }

        write!(f, " {}", "‾".repeat(size + 2))
    }
}

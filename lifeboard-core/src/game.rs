//! Game loop shared by every driver.

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::error::GameError;
use crate::strategy::{select_move, PlayerInput, Strategy};
use crate::{Move, Outcome, Player};

/// One move played by the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Moves played so far, this one included.
    pub number: u32,
    pub player: Player,
    pub strategy: Strategy,
    pub mov: Move,
}

/// Play one move for the active player with its bound strategy.
///
/// Selects the move, applies it (shuffle included) and hands the turn to
/// the opponent.
pub fn step<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    input: Option<&mut dyn PlayerInput>,
) -> Result<Turn, GameError> {
    let player = board.active_player();
    let strategy = board.active_strategy();

    let mov = select_move(board, strategy, rng, input)?;
    board.apply_move(mov)?;
    board.switch_active_player();

    let turn = Turn {
        number: board.move_count(),
        player,
        strategy,
        mov,
    };
    debug!(
        "move {}: {} ({}) plays {}",
        turn.number, turn.player, turn.strategy, turn.mov
    );
    Ok(turn)
}

/// Play until the game is finished and return the result.
///
/// `on_turn` runs after every move with the updated board. A board that is
/// already finished plays no moves.
pub fn play<R, F>(
    board: &mut Board,
    rng: &mut R,
    mut input: Option<&mut dyn PlayerInput>,
    mut on_turn: F,
) -> Result<Outcome, GameError>
where
    R: Rng + ?Sized,
    F: FnMut(&Board, &Turn),
{
    while !board.finished() {
        // Reborrow per turn; the object lifetime must shrink with it
        let turn = step(
            board,
            rng,
            input.as_mut().map(|i| &mut **i as &mut dyn PlayerInput),
        )?;
        on_turn(board, &turn);
    }

    let outcome = board.game_result()?;
    debug!("game over after {} moves: {}", board.move_count(), outcome);
    Ok(outcome)
}

/// Play a bot-only game to the end.
pub fn simulate<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Result<Outcome, GameError> {
    if Player::all().any(|player| board.strategy(player).is_interactive()) {
        return Err(GameError::InteractiveStrategy);
    }
    play(board, rng, None, |_, _| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::grid::Pos;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    fn seeded_board(first: Strategy, second: Strategy, seed: u64) -> (Board, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::random(GameConfig::default(), first, second, &mut rng).unwrap();
        (board, rng)
    }

    /// Always picks the first offered choice.
    struct FirstChoice {
        calls: usize,
    }

    impl PlayerInput for FirstChoice {
        fn choose_piece(&mut self, _player: Player, _pieces: &[Pos]) -> Option<usize> {
            self.calls += 1;
            Some(0)
        }

        fn choose_destination(&mut self, _from: Pos, _destinations: &[Pos]) -> Option<usize> {
            Some(0)
        }
    }

    #[test]
    fn test_step_plays_and_switches() {
        let mut board = Board::from_pieces(
            GameConfig::default(),
            vec![p(1, 2), p(1, 3), p(3, 6), p(7, 1), p(7, 5), p(8, 4)],
            vec![p(1, 5), p(2, 8), p(4, 7), p(6, 5)],
            Player::First,
        )
        .unwrap()
        .with_strategies(Strategy::Safe, Strategy::Optimal);
        let mut rng = StdRng::seed_from_u64(0);

        let turn = step(&mut board, &mut rng, None).unwrap();

        assert_eq!(turn.number, 1);
        assert_eq!(turn.player, Player::First);
        assert_eq!(turn.strategy, Strategy::Safe);
        assert_eq!(turn.mov, Move::new(p(1, 2), p(2, 3)));
        assert_eq!(board.active_player(), Player::Second);
        assert_eq!(board.pieces(Player::Second), &[p(3, 7)]);
    }

    #[test]
    fn test_simulate_finishes_every_pairing() {
        let bots = [
            Strategy::Random,
            Strategy::Greedy,
            Strategy::Safe,
            Strategy::Optimal,
            Strategy::Minimax,
        ];
        for (i, &first) in bots.iter().enumerate() {
            for (j, &second) in bots.iter().enumerate() {
                let (mut board, mut rng) = seeded_board(first, second, (i * 10 + j) as u64);
                let outcome = simulate(&mut board, &mut rng).unwrap();
                assert!(board.finished());
                assert_eq!(board.game_result(), Ok(outcome));
                assert!(board.move_count() <= board.config().max_moves + 1);
            }
        }
    }

    #[test]
    fn test_simulate_is_reproducible() {
        let (mut a, mut rng_a) = seeded_board(Strategy::Random, Strategy::Random, 11);
        let (mut b, mut rng_b) = seeded_board(Strategy::Random, Strategy::Random, 11);
        let outcome_a = simulate(&mut a, &mut rng_a).unwrap();
        let outcome_b = simulate(&mut b, &mut rng_b).unwrap();
        assert_eq!(outcome_a, outcome_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulate_rejects_interactive() {
        let (mut board, mut rng) = seeded_board(Strategy::Random, Strategy::Player, 3);
        assert_eq!(
            simulate(&mut board, &mut rng),
            Err(GameError::InteractiveStrategy)
        );
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_play_reports_each_turn() {
        let (mut board, mut rng) = seeded_board(Strategy::Greedy, Strategy::Random, 5);
        let mut turns = Vec::new();

        let outcome = play(&mut board, &mut rng, None, |b, turn| {
            assert_eq!(b.move_count(), turn.number);
            turns.push(*turn);
        })
        .unwrap();

        assert_eq!(turns.len() as u32, board.move_count());
        for (i, turn) in turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Player::First } else { Player::Second };
            assert_eq!(turn.player, expected);
            assert_eq!(turn.number, i as u32 + 1);
        }
        assert_eq!(board.game_result(), Ok(outcome));
    }

    #[test]
    fn test_play_with_human() {
        let (mut board, mut rng) = seeded_board(Strategy::Player, Strategy::Optimal, 8);
        let mut input = FirstChoice { calls: 0 };

        play(&mut board, &mut rng, Some(&mut input), |_, _| {}).unwrap();

        let human_moves = (board.move_count() as usize + 1) / 2;
        assert_eq!(input.calls, human_moves);
    }

    #[test]
    fn test_play_reuses_input_for_both_humans() {
        let mut total_moves = 0;
        for seed in 20..25 {
            let (mut board, mut rng) = seeded_board(Strategy::Player, Strategy::Player, seed);
            let mut input = FirstChoice { calls: 0 };

            let outcome = play(&mut board, &mut rng, Some(&mut input), |_, _| {}).unwrap();

            // Every move of either side went through the same input
            assert_eq!(input.calls, board.move_count() as usize);
            assert_eq!(board.game_result(), Ok(outcome));
            total_moves += board.move_count();
        }
        assert!(total_moves > 5);
    }

    #[test]
    fn test_play_human_without_input() {
        let (mut board, mut rng) = seeded_board(Strategy::Player, Strategy::Random, 8);
        assert_eq!(
            play(&mut board, &mut rng, None, |_, _| {}),
            Err(GameError::MissingInput(Strategy::Player))
        );
    }

    #[test]
    fn test_finished_board_plays_nothing() {
        let mut board = Board::from_pieces(
            GameConfig::default(),
            vec![p(4, 4)],
            vec![],
            Player::Second,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut calls = 0;

        let outcome = play(&mut board, &mut rng, None, |_, _| calls += 1).unwrap();

        assert_eq!(calls, 0);
        assert_eq!(outcome, Outcome::Win(Player::First));
        assert_eq!(board.move_count(), 0);
    }
}

//! Batch simulation of bot-vs-bot games.
//!
//! Games are independent: each one owns its board and random source, so
//! they fan out across a rayon pool and only the statistics are shared.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use lifeboard_core::{game, Board, GameConfig, GameError, Outcome, Strategy};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::stats::SimulationStats;

/// Settings for one batch of games.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub games: u64,
    pub first: Strategy,
    pub second: Strategy,
    pub config: GameConfig,
    /// Game `i` is seeded with `seed + i`; unseeded games draw from the OS
    pub seed: Option<u64>,
    /// Worker threads; rayon's default when unset
    pub jobs: Option<usize>,
    pub log_interval_secs: u64,
}

/// Play `options.games` games and collect their results.
///
/// Clearing `running` stops new games from starting; games already in
/// progress finish and are counted.
pub fn run(options: &SimulationOptions, running: &AtomicBool) -> Result<SimulationStats> {
    if options.first.is_interactive() || options.second.is_interactive() {
        return Err(GameError::InteractiveStrategy.into());
    }
    options.config.validate()?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = options.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    let stats = Mutex::new(SimulationStats::new());

    pool.install(|| {
        (0..options.games)
            .into_par_iter()
            .try_for_each(|index| -> Result<(), GameError> {
                if !running.load(Ordering::SeqCst) {
                    return Ok(());
                }

                let (outcome, moves) = play_game(options, index)?;

                let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
                stats.record_game(outcome, moves);
                if stats.should_log(options.log_interval_secs) {
                    stats.log_progress(options.games);
                }
                Ok(())
            })
    })?;

    Ok(stats.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// Play one game to the end, returning its result and length.
pub fn play_game(options: &SimulationOptions, index: u64) -> Result<(Outcome, u32), GameError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index)),
        None => StdRng::from_os_rng(),
    };

    let mut board = Board::random(options.config, options.first, options.second, &mut rng)?;
    let outcome = game::simulate(&mut board, &mut rng)?;
    debug!(
        "game {} finished after {} moves: {}",
        index,
        board.move_count(),
        outcome
    );
    Ok((outcome, board.move_count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(games: u64, seed: Option<u64>) -> SimulationOptions {
        SimulationOptions {
            games,
            first: Strategy::Greedy,
            second: Strategy::Random,
            config: GameConfig::default(),
            seed,
            jobs: Some(2),
            log_interval_secs: 3600,
        }
    }

    #[test]
    fn test_run_plays_every_game() {
        let running = AtomicBool::new(true);
        let stats = run(&options(12, Some(1)), &running).unwrap();
        assert_eq!(stats.games, 12);
        assert_eq!(stats.first_wins + stats.second_wins + stats.draws, 12);
        assert!(stats.longest_game as u64 <= stats.total_moves);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let running = AtomicBool::new(true);
        let a = run(&options(8, Some(77)), &running).unwrap();
        let b = run(&options(8, Some(77)), &running).unwrap();
        assert_eq!(a.first_wins, b.first_wins);
        assert_eq!(a.second_wins, b.second_wins);
        assert_eq!(a.draws, b.draws);
        assert_eq!(a.total_moves, b.total_moves);
        assert_eq!(a.longest_game, b.longest_game);
    }

    #[test]
    fn test_play_game_uses_index_seed() {
        let opts = options(1, Some(5));
        assert_eq!(play_game(&opts, 3).unwrap(), play_game(&opts, 3).unwrap());

        let shifted = options(1, Some(8));
        assert_eq!(play_game(&opts, 3).unwrap(), play_game(&shifted, 0).unwrap());
    }

    #[test]
    fn test_stopped_run_plays_nothing() {
        let running = AtomicBool::new(false);
        let stats = run(&options(50, Some(1)), &running).unwrap();
        assert_eq!(stats.games, 0);
    }

    #[test]
    fn test_interactive_strategy_rejected() {
        let running = AtomicBool::new(true);
        let mut opts = options(1, None);
        opts.second = Strategy::Player;
        let err = run(&opts, &running).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::InteractiveStrategy)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let running = AtomicBool::new(true);
        let mut opts = options(1, None);
        opts.config.pieces = 40;
        let err = run(&opts, &running).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::TooManyPieces { size: 8, pieces: 40 })
        );
    }
}

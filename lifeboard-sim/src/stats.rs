//! Simulation statistics tracking.

use std::time::Instant;

use lifeboard_core::{Outcome, Player};
use log::info;

/// Aggregate results of a batch of games.
#[derive(Debug, Default)]
pub struct SimulationStats {
    /// Games played to the end
    pub games: u64,

    /// Breakdown of outcomes
    pub first_wins: u64,
    pub second_wins: u64,
    pub draws: u64,

    /// Moves played across all games
    pub total_moves: u64,

    /// Most moves played in a single game
    pub longest_game: u32,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_games: u64,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record a finished game
    pub fn record_game(&mut self, outcome: Outcome, moves: u32) {
        self.games += 1;
        match outcome.winner() {
            Some(Player::First) => self.first_wins += 1,
            Some(Player::Second) => self.second_wins += 1,
            None => self.draws += 1,
        }
        self.total_moves += u64::from(moves);
        self.longest_game = self.longest_game.max(moves);
    }

    /// Average game length in moves
    pub fn average_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }

    /// Share of games won by a player, in percent
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let wins = match player {
            Player::First => self.first_wins,
            Player::Second => self.second_wins,
        };
        100.0 * wins as f64 / self.games as f64
    }

    /// Get current games per second
    pub fn games_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.games as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self, target: u64) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Calculate rate since last log
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let games = self.games - self.last_log_games;
            if elapsed > 0.0 {
                games as f64 / elapsed
            } else {
                0.0
            }
        } else {
            self.games_per_sec()
        };

        info!(
            "[{:02}:{:02}:{:02}] games={}/{} rate={:.1}/s first={} second={} draw={} avg_moves={:.1}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games,
            target,
            rate,
            self.first_wins,
            self.second_wins,
            self.draws,
            self.average_moves(),
        );

        self.last_log_time = Some(now);
        self.last_log_games = self.games;
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games played: {}", self.games);
        println!(
            "  - First player wins: {} ({:.1}%)",
            self.first_wins,
            self.win_rate(Player::First)
        );
        println!(
            "  - Second player wins: {} ({:.1}%)",
            self.second_wins,
            self.win_rate(Player::Second)
        );
        println!("  - Draws: {}", self.draws);
        println!("Average game length: {:.1} moves", self.average_moves());
        println!("Longest game: {} moves", self.longest_game);

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                println!("Average rate: {:.1} games/sec", self.games as f64 / elapsed);
            }
        }
    }
}

//! Game of Life board game runner
//!
//! Plays bot-vs-bot simulations in bulk, or a single interactive game in
//! the console.

mod console;
mod runner;
mod stats;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lifeboard_core::{game, Board, GameConfig, GameError, Outcome, Player, Strategy};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::console::ConsoleInput;
use crate::runner::SimulationOptions;

#[derive(Debug, Parser)]
#[command(name = "lifeboard", about = "Game of Life board game: bot simulations and console play")]
struct Args {
    #[command(flatten)]
    board: BoardArgs,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Board settings shared by every subcommand
#[derive(Debug, clap::Args)]
struct BoardArgs {
    /// JSON file with board settings (size, pieces, max_moves); missing fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Board side length
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Pieces per side at the start
    #[arg(long, global = true)]
    pieces: Option<usize>,

    /// Moves after which the game is a forced draw
    #[arg(long, global = true)]
    max_moves: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Play many bot-vs-bot games and report the results
    Simulate {
        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: u64,
        /// Strategy of the first (blue) player
        #[arg(long, default_value = "random")]
        first: Strategy,
        /// Strategy of the second (red) player
        #[arg(long, default_value = "random")]
        second: Strategy,
        /// Base seed; game i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        /// Worker threads (default: one per core)
        #[arg(long)]
        jobs: Option<usize>,
        /// Seconds between progress lines
        #[arg(long, default_value_t = 5)]
        log_interval: u64,
    },
    /// Play a game in the console; strategies not given are asked for
    Play {
        #[arg(long)]
        first: Option<Strategy>,
        #[arg(long)]
        second: Option<Strategy>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args.board)?;

    match args.cmd {
        Cmd::Simulate {
            games,
            first,
            second,
            seed,
            jobs,
            log_interval,
        } => simulate(SimulationOptions {
            games,
            first,
            second,
            config,
            seed,
            jobs,
            log_interval_secs: log_interval,
        }),
        Cmd::Play {
            first,
            second,
            seed,
        } => play(config, first, second, seed),
    }
}

/// Defaults, then the config file, then command-line overrides.
fn load_config(args: &BoardArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(pieces) = args.pieces {
        config.pieces = pieces;
    }
    if let Some(max_moves) = args.max_moves {
        config.max_moves = max_moves;
    }

    config.validate()?;
    Ok(config)
}

fn simulate(options: SimulationOptions) -> Result<()> {
    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing games in progress...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl-C handler")?;

    println!("Game of Life Simulation");
    println!("=======================");
    println!("First (blue): {}", options.first);
    println!("Second (red): {}", options.second);
    println!(
        "Board: {}x{}, {} pieces each, draw after {} moves",
        options.config.size, options.config.size, options.config.pieces, options.config.max_moves
    );
    if let Some(seed) = options.seed {
        println!("Seed: {}", seed);
    }
    println!();
    info!("starting {} games", options.games);

    let start = Instant::now();
    let stats = runner::run(&options, &running)?;
    let elapsed = start.elapsed();

    println!("\n=======================");
    if running.load(Ordering::SeqCst) {
        println!("Simulation complete!");
    } else {
        println!(
            "Simulation interrupted after {} of {} games.",
            stats.games, options.games
        );
    }
    println!("=======================");
    println!(
        "Played {} games of {} vs {}",
        stats.games, options.first, options.second
    );
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!();
    stats.print_summary();

    Ok(())
}

fn play(
    config: GameConfig,
    first: Option<Strategy>,
    second: Option<Strategy>,
    seed: Option<u64>,
) -> Result<()> {
    let stdin = io::stdin();
    let mut console = ConsoleInput::new(stdin.lock(), io::stdout());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("Welcome to the Game of Life boardgame");
    println!();

    loop {
        let strategies = (
            first.or_else(|| console.choose_strategy(Player::First)),
            second.or_else(|| console.choose_strategy(Player::Second)),
        );
        let (Some(first), Some(second)) = strategies else {
            println!("Input stream was closed, exiting");
            return Ok(());
        };
        println!();

        let mut board = Board::random(config, first, second, &mut rng)?;
        println!("{}", board);

        let result = game::play(&mut board, &mut rng, Some(&mut console), |board, turn| {
            println!(
                "The chosen move is: {} for the {} player playing as {}",
                turn.mov, turn.player, turn.strategy
            );
            println!("{}", board);
        });

        match result {
            Ok(Outcome::Win(winner)) => println!("The {} player won!", winner),
            Ok(Outcome::Draw) => println!("The game was a draw!"),
            Err(GameError::InputClosed) => {
                println!("Input stream was closed, exiting");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
        println!("The game took {} moves", board.move_count());

        if !console.play_again() {
            return Ok(());
        }
    }
}

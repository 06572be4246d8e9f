//! Reference position testing
//!
//! Loads hand-checked positions from `tests/data/reference_positions.json`
//! and verifies:
//! - Legal move count
//! - Game result
//! - Each bot strategy's choice
//! - The board after a move and its shuffle

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lifeboard_core::{select_move, Board, GameConfig, Move, Outcome, Player, Pos, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TestData {
    version: String,
    positions: Vec<Position>,
    transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
struct Position {
    description: String,
    active: Player,
    first: Vec<[i32; 2]>,
    second: Vec<[i32; 2]>,
    legal_move_count: usize,
    /// "first", "second" or "draw" for finished positions
    result: Option<String>,
    choices: BTreeMap<Strategy, MoveData>,
}

#[derive(Debug, Deserialize)]
struct Transition {
    description: String,
    active: Player,
    first: Vec<[i32; 2]>,
    second: Vec<[i32; 2]>,
    #[serde(rename = "move")]
    mov: MoveData,
    expect_first: Vec<[i32; 2]>,
    expect_second: Vec<[i32; 2]>,
    finished: bool,
}

#[derive(Debug, Deserialize)]
struct MoveData {
    from: [i32; 2],
    to: [i32; 2],
}

impl MoveData {
    fn to_move(&self) -> Move {
        Move::new(to_pos(self.from), to_pos(self.to))
    }
}

fn to_pos([row, col]: [i32; 2]) -> Pos {
    Pos::new(row, col)
}

fn to_positions(cells: &[[i32; 2]]) -> Vec<Pos> {
    cells.iter().copied().map(to_pos).collect()
}

fn build_board(first: &[[i32; 2]], second: &[[i32; 2]], active: Player) -> Board {
    Board::from_pieces(
        GameConfig::default(),
        to_positions(first),
        to_positions(second),
        active,
    )
    .expect("Reference position should be valid")
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win(Player::First) => "first",
        Outcome::Win(Player::Second) => "second",
        Outcome::Draw => "draw",
    }
}

fn load_test_data() -> TestData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/reference_positions.json");
    let file = File::open(&path).expect("Failed to open reference positions file");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse JSON")
}

#[test]
fn test_reference_positions() {
    let data = load_test_data();
    println!(
        "Loaded {} positions, {} transitions (v{})",
        data.positions.len(),
        data.transitions.len(),
        data.version
    );

    let mut failures: Vec<String> = Vec::new();

    for pos in &data.positions {
        let mut errors: Vec<String> = Vec::new();
        let board = build_board(&pos.first, &pos.second, pos.active);

        // 1. Legal move count
        let moves = board.legal_moves();
        if moves.len() != pos.legal_move_count {
            errors.push(format!(
                "Move count mismatch: expected {}, got {}",
                pos.legal_move_count,
                moves.len()
            ));
        }

        // 2. Result
        let result = board.game_result().ok().map(outcome_name);
        if result != pos.result.as_deref() {
            errors.push(format!(
                "Result mismatch: expected {:?}, got {:?}",
                pos.result, result
            ));
        }

        // 3. Strategy choices
        for (&strategy, expected) in &pos.choices {
            let mut rng = StdRng::seed_from_u64(0);
            match select_move(&board, strategy, &mut rng, None) {
                Ok(mov) if mov == expected.to_move() => {}
                Ok(mov) => errors.push(format!(
                    "{} chose {}, expected {}",
                    strategy,
                    mov,
                    expected.to_move()
                )),
                Err(e) => errors.push(format!("{} failed: {}", strategy, e)),
            }
        }

        if !errors.is_empty() {
            failures.push(format!("{}: {}", pos.description, errors.join("; ")));
        }
    }

    for tr in &data.transitions {
        let mut board = build_board(&tr.first, &tr.second, tr.active);
        if let Err(e) = board.apply_move(tr.mov.to_move()) {
            failures.push(format!("{}: move rejected: {}", tr.description, e));
            continue;
        }

        let first = to_positions(&tr.expect_first);
        let second = to_positions(&tr.expect_second);
        if board.pieces(Player::First) != first.as_slice()
            || board.pieces(Player::Second) != second.as_slice()
        {
            failures.push(format!(
                "{}: board mismatch, got first {:?} second {:?}",
                tr.description,
                board.pieces(Player::First),
                board.pieces(Player::Second)
            ));
        }
        if board.finished() != tr.finished {
            failures.push(format!(
                "{}: finished mismatch, expected {}",
                tr.description, tr.finished
            ));
        }
    }

    if !failures.is_empty() {
        println!("\nFailures:");
        for f in &failures {
            println!("  - {}", f);
        }
    }
    assert!(failures.is_empty(), "{} reference checks failed", failures.len());
}

#[test]
fn test_reference_choices_are_legal() {
    let data = load_test_data();
    for pos in &data.positions {
        let board = build_board(&pos.first, &pos.second, pos.active);
        let moves = board.legal_moves();
        for (strategy, expected) in &pos.choices {
            assert!(
                moves.contains(&expected.to_move()),
                "{}: {} choice is not a legal move",
                pos.description,
                strategy
            );
        }
    }
}

//! WASM bindings for lifeboard-core
//!
//! Provides a JavaScript-friendly API for the game logic. All rules stay in
//! the core; this only converts arguments and results.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::{select_move, Board, GameConfig, Move, Outcome, Player, Pos, Strategy};

/// WASM-friendly wrapper around a board and its random source
#[wasm_bindgen]
pub struct WasmGame {
    inner: Board,
    rng: StdRng,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a default-sized game with random placement.
    /// Strategies are given by name, e.g. "greedy" or "player".
    #[wasm_bindgen(constructor)]
    pub fn new(first: &str, second: &str, seed: u64) -> Result<WasmGame, JsError> {
        let first: Strategy = first.parse().map_err(to_js_error)?;
        let second: Strategy = second.parse().map_err(to_js_error)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let inner =
            Board::random(GameConfig::default(), first, second, &mut rng).map_err(to_js_error)?;
        Ok(WasmGame { inner, rng })
    }

    /// Board side length
    pub fn size(&self) -> usize {
        self.inner.config().size
    }

    /// Active player (1 or 2)
    #[wasm_bindgen(js_name = activePlayer)]
    pub fn active_player(&self) -> u8 {
        player_number(self.inner.active_player())
    }

    /// Name of the strategy bound to the active player
    #[wasm_bindgen(js_name = activeStrategy)]
    pub fn active_strategy(&self) -> String {
        self.inner.active_strategy().name().to_string()
    }

    #[wasm_bindgen(js_name = moveCount)]
    pub fn move_count(&self) -> u32 {
        self.inner.move_count()
    }

    /// Pieces of a player as [row, col, row, col, ...]
    pub fn pieces(&self, player: u8) -> Vec<i32> {
        let player = if player == 1 { Player::First } else { Player::Second };
        self.inner
            .pieces(player)
            .iter()
            .flat_map(|pos| [pos.row, pos.col])
            .collect()
    }

    /// Legal moves of the active player as an array of { from: [row, col], to: [row, col] }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let moves: Vec<WasmMove> = self
            .inner
            .legal_moves()
            .into_iter()
            .map(WasmMove::from)
            .collect();
        serde_wasm_bindgen::to_value(&moves).map_err(JsValue::from)
    }

    /// Apply a move for the active player. Returns true if it was legal.
    /// The turn does not pass; call `switchPlayer` afterwards.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> bool {
        let mov = Move::new(Pos::new(from_row, from_col), Pos::new(to_row, to_col));

        // Verify move is legal
        if !self.inner.legal_moves().contains(&mov) {
            return false;
        }

        self.inner.apply_move(mov).is_ok()
    }

    /// Let the active player's strategy pick a move and apply it.
    /// Returns the move played as { from, to }.
    #[wasm_bindgen(js_name = botMove)]
    pub fn bot_move(&mut self) -> Result<JsValue, JsValue> {
        let strategy = self.inner.active_strategy();
        let mov = select_move(&self.inner, strategy, &mut self.rng, None).map_err(to_js_value)?;
        self.inner.apply_move(mov).map_err(to_js_value)?;
        serde_wasm_bindgen::to_value(&WasmMove::from(mov)).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = switchPlayer)]
    pub fn switch_player(&mut self) {
        self.inner.switch_active_player();
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.inner.finished()
    }

    /// Get game result: "ongoing", "first_wins", "second_wins", or "draw"
    pub fn result(&self) -> String {
        match self.inner.game_result() {
            Ok(Outcome::Win(Player::First)) => "first_wins".to_string(),
            Ok(Outcome::Win(Player::Second)) => "second_wins".to_string(),
            Ok(Outcome::Draw) => "draw".to_string(),
            Err(_) => "ongoing".to_string(),
        }
    }

    /// Text rendering of the board
    pub fn render(&self) -> String {
        self.inner.to_string()
    }
}

fn player_number(player: Player) -> u8 {
    match player {
        Player::First => 1,
        Player::Second => 2,
    }
}

fn to_js_error(err: crate::GameError) -> JsError {
    JsError::new(&err.to_string())
}

fn to_js_value(err: crate::GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serializable move for JavaScript
#[derive(serde::Serialize)]
struct WasmMove {
    from: [i32; 2],
    to: [i32; 2],
}

impl From<Move> for WasmMove {
    fn from(mov: Move) -> Self {
        WasmMove {
            from: [mov.from.row, mov.from.col],
            to: [mov.to.row, mov.to.col],
        }
    }
}

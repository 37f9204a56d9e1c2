//! WASM bindings for blokus-core
//!
//! Provides a JavaScript-friendly API over the standard piece set.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{Action, Blokus, BoardState, GameConfig, Player};

/// A game in progress: the engine plus the current position.
#[wasm_bindgen]
pub struct WasmGame {
    engine: Blokus,
    state: BoardState,
}

#[wasm_bindgen]
impl WasmGame {
    /// New game on a `size` × `size` board with players in turn order (ids 1-255).
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, players: Vec<u8>) -> Result<WasmGame, JsError> {
        let config = GameConfig::new(size, players.into_iter().map(Player).collect());
        let engine = Blokus::standard(config)?;
        let state = engine.reset()?;
        Ok(WasmGame { engine, state })
    }

    /// Back to the initial position.
    pub fn reset(&mut self) -> Result<(), JsError> {
        self.state = self.engine.reset()?;
        Ok(())
    }

    /// Board side length
    pub fn size(&self) -> usize {
        self.state.size()
    }

    /// Occupancy grid, row-major: 0 for empty, otherwise the owning player id
    pub fn occupancy(&self) -> Vec<u8> {
        self.state.occupancy().to_vec()
    }

    /// Cell counts per player, in turn order
    pub fn scores(&self) -> Vec<u32> {
        self.state.scores().into_iter().map(|s| s as u32).collect()
    }

    /// Legal actions as an array of { piece, row, col, rotation, flip }
    #[wasm_bindgen(js_name = legalActions)]
    pub fn legal_actions(&self, player: u8) -> Result<JsValue, JsError> {
        let actions = self.engine.legal_actions(&self.state, Player(player))?;
        serde_wasm_bindgen::to_value(&actions).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Apply an action object. Returns { rewards, done, nextPlayer }.
    /// Illegal actions throw and leave the position unchanged.
    pub fn step(&mut self, player: u8, action: JsValue) -> Result<JsValue, JsError> {
        let action: Action =
            serde_wasm_bindgen::from_value(action).map_err(|e| JsError::new(&e.to_string()))?;
        let result = self.engine.step(&self.state, Player(player), &action)?;
        let summary = WasmStep {
            rewards: result.rewards,
            done: result.done,
            next_player: result.next_player.id(),
        };
        self.state = result.state;
        serde_wasm_bindgen::to_value(&summary).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isPlayerFinished)]
    pub fn is_player_finished(&self, player: u8) -> Result<bool, JsError> {
        Ok(self.engine.is_player_finished(&self.state, Player(player))?)
    }

    /// Check if no player can move
    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.engine.is_terminal(&self.state)
    }

    /// Occupancy grid as text, one row per line
    pub fn render(&self) -> String {
        self.state.to_string()
    }
}

/// Serializable step outcome for JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WasmStep {
    rewards: Vec<i8>,
    done: bool,
    next_player: u8,
}

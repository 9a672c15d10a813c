//! WASM bindings for pegboard-core
//!
//! Provides a JavaScript-friendly API over one game session.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::{artifact, Game, GameConfig};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from solution artifact bytes and an optional JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(artifact: &[u8], config: Option<String>) -> Result<WasmGame, JsValue> {
        let trie = artifact::decode(artifact).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = match config {
            Some(json) => {
                GameConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => GameConfig::default(),
        };
        Ok(WasmGame {
            inner: Game::with_config(Arc::new(trie), config),
        })
    }

    /// Click on a hole (0-14); meaning depends on the phase
    pub fn click(&mut self, hole: u8) {
        self.inner.click(hole as usize);
    }

    #[wasm_bindgen(js_name = pickHole)]
    pub fn pick_hole(&mut self, hole: u8) {
        self.inner.pick_hole(hole as usize);
    }

    #[wasm_bindgen(js_name = pickPeg)]
    pub fn pick_peg(&mut self, hole: u8) {
        self.inner.pick_peg(hole as usize);
    }

    pub fn undo(&mut self) {
        self.inner.undo();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Highlight the suggested jump. Returns { jump: { from, to }, solutions } or null
    pub fn hint(&mut self) -> Result<JsValue, JsValue> {
        let hint = self.inner.request_hint();
        serde_wasm_bindgen::to_value(&hint).map_err(JsValue::from)
    }

    /// Current prompt text
    pub fn prompt(&self) -> String {
        self.inner.prompt().to_string()
    }

    /// Winning games still reachable from the current position
    #[wasm_bindgen(js_name = solutionsLeft)]
    pub fn solutions_left(&self) -> f64 {
        self.inner.solutions_left() as f64
    }

    /// Full state as { status, holes, history }
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).map_err(JsValue::from)
    }

    /// Board as the text triangle
    pub fn render(&self) -> String {
        self.inner.board().to_string()
    }
}

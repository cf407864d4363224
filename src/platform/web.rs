//! Browser bindings
//!
//! The JavaScript side owns the animation frame loop and the touch buttons.
//! It calls `pump` with the frame delta and reads `snapshotJson` to draw.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::session::Session;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Cloud Dodge starting...");
}

/// A game session exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session sized to the viewport
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: f64) -> Result<WebGame, JsValue> {
        let config = GameConfig::with_screen(width, height);
        let session =
            Session::new(config, seed as u64).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame { session })
    }

    /// Start a session from a JSON config document
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str, seed: f64) -> Result<WebGame, JsValue> {
        let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let session =
            Session::new(config, seed as u64).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame { session })
    }

    /// Advance by the frame delta in milliseconds
    pub fn pump(&mut self, elapsed_ms: f64) {
        let elapsed_ms = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            elapsed_ms.round() as u64
        } else {
            0
        };
        self.session.pump(elapsed_ms);
        for event in self.session.drain_events() {
            log::debug!("{:?}", event);
        }
    }

    #[wasm_bindgen(js_name = moveLeft)]
    pub fn move_left(&mut self) {
        self.session.move_left();
    }

    #[wasm_bindgen(js_name = moveRight)]
    pub fn move_right(&mut self) {
        self.session.move_right();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Stop ticking for good (component unmount)
    pub fn dispose(&mut self) {
        self.session.dispose();
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.state().is_game_over()
    }

    /// Current frame state as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

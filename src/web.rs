//! Browser boundary: a thin `wasm-bindgen` wrapper around [`Board`].
//!
//! The JS side owns the tick timer and the keyboard listeners; it calls
//! `setInput` on key events and `step` once per tick, then applies the
//! returned diff to its pool of cell nodes.

use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::core::Board;
use crate::types::InputCodes;

#[wasm_bindgen(start)]
pub fn bootstrap() {
    console_error_panic_hook::set_once();
}

fn log(msg: &str) {
    console::log_1(&JsValue::from_str(msg));
}

#[wasm_bindgen]
pub struct WebGame {
    board: Board,
    input: InputCodes,
}

#[wasm_bindgen]
impl WebGame {
    /// Seeded from the wall clock; pass a fixed seed for replays.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> WebGame {
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u32);
        log(&format!("[divtris] new game, seed {seed}"));
        Self {
            board: Board::new(seed),
            input: [0; 4],
        }
    }

    /// Latch one input channel until the next call for it.
    /// Channels: 0 horizontal, 1 vertical, 2 swap, 3 pause.
    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&mut self, channel: usize, code: i8) {
        if let Some(slot) = self.input.get_mut(channel) {
            *slot = code;
        }
    }

    /// Advance one tick and return the frame diff as a plain JS object.
    #[wasm_bindgen(js_name = step)]
    pub fn step(&mut self) -> Result<JsValue, JsValue> {
        let diff = self.board.step(self.input);
        to_value(&diff).map_err(|e| e.into())
    }

    #[wasm_bindgen(js_name = swapPoints)]
    pub fn swap_points(&self) -> u8 {
        self.board.swap_points()
    }

    #[wasm_bindgen(js_name = lines)]
    pub fn lines(&self) -> u32 {
        self.board.lines()
    }
}

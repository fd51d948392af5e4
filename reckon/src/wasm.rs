use crate::{Operator, Puzzle, PuzzleConfig, Session, TermId};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Start a session from a `{"numbers": [...], "target": n}` record
    #[wasm_bindgen(constructor)]
    pub fn new(puzzle_json: &str) -> Result<WasmSession, JsValue> {
        console_error_panic_hook::set_once();

        let puzzle: Puzzle = serde_json::from_str(puzzle_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid puzzle JSON: {}", e)))?;
        let session = Session::new(puzzle).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSession { session })
    }

    /// Start a session with the puzzle generated from `seed`
    #[wasm_bindgen(js_name = fromSeed)]
    pub fn from_seed(seed: u64) -> Result<WasmSession, JsValue> {
        console_error_panic_hook::set_once();

        let puzzle = Puzzle::generate(seed, &PuzzleConfig::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let session = Session::new(puzzle).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSession { session })
    }

    #[wasm_bindgen(js_name = placeTerm)]
    pub fn place_term(&mut self, id: u64) -> String {
        to_json(&self.session.place_term(TermId::new(id)))
    }

    /// `symbol` is one of `+ - × ÷` (or `* /`)
    #[wasm_bindgen(js_name = placeOperator)]
    pub fn place_operator(&mut self, symbol: &str) -> String {
        match symbol.parse::<Operator>() {
            Ok(op) => to_json(&self.session.place_operator(op)),
            Err(e) => error_json(&e.to_string()),
        }
    }

    pub fn undo(&mut self) -> String {
        to_json(&self.session.undo())
    }

    pub fn clear(&mut self) -> String {
        to_json(&self.session.clear())
    }

    /// The "use" button: turn the working expression into a new term
    pub fn finalize(&mut self) -> String {
        to_json(&self.session.finalize())
    }

    pub fn submit(&self) -> String {
        to_json(&self.session.submit())
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.session.snapshot())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e.to_string()))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

//! Browser bindings. Clicks arrive in screen coordinates; everything
//! returned is in board coordinates together with the `rotated` flag.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::GameInstance;
use crate::types::{GameOptions, GameState, PieceKind, Square};

#[wasm_bindgen]
pub struct ChessGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl ChessGame {
    /// `options` may be `undefined` or an object such as
    /// `{ rotated: true, promotionDefault: "knight" }`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<ChessGame, JsValue> {
        let options: GameOptions = if options.is_undefined() || options.is_null() {
            GameOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self {
            inner: GameInstance::with_options(options),
        })
    }

    pub fn click(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let outcome = self.inner.click_view(row, col).map_err(to_js_error)?;
        to_js(&outcome)
    }

    /// Completes a pending promotion with a piece letter (`Q`, `R`, `B`,
    /// `N`); passing nothing withdraws the pawn move. An empty or unknown
    /// letter is an error and the promotion stays pending.
    pub fn promote(&mut self, letter: Option<String>) -> Result<JsValue, JsValue> {
        let choice = match letter {
            Some(letter) => Some(parse_piece_letter(&letter)?),
            None => None,
        };
        self.inner
            .complete_promotion(choice)
            .map_err(to_js_error)?;
        self.state()
    }

    /// Completes a pending promotion with the `promotionDefault` option.
    pub fn promote_default(&mut self) -> Result<JsValue, JsValue> {
        self.inner
            .complete_promotion_with_chooser()
            .map_err(to_js_error)?;
        self.state()
    }

    /// False when the side to move is mated or stalemated.
    pub fn has_legal_moves(&self) -> bool {
        self.inner.has_legal_moves_for_current()
    }

    /// Screen cell of board square `(row, col)` under the current rotation.
    pub fn square_to_view(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let square = Square::new(row, col)
            .ok_or_else(|| to_js_error(GameError::OutOfRange { row, col }))?;
        to_js(&self.inner.square_to_view(square))
    }

    pub fn rotate(&mut self) -> Result<JsValue, JsValue> {
        self.inner.rotate();
        self.state()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state: GameState = self.inner.to_game_state();
        to_js(&state)
    }

    pub fn legal_moves(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let square = self.inner.view_to_square(row, col).map_err(to_js_error)?;
        to_js(&self.inner.legal_moves(square))
    }
}

fn parse_piece_letter(letter: &str) -> Result<PieceKind, JsValue> {
    PieceKind::from_label(letter)
        .ok_or_else(|| JsValue::from_str(&format!("unknown piece letter {letter:?}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

//! Engine abstraction used by the console driver.
//!
//! Defines per-call search overrides and the output payload so callers can
//! drive any engine behind a single trait object.

use crate::errors::ChessResult;
use crate::game_state::chess_types::{GameState, Move};

/// Per-call overrides of the engine's configured limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub nodes: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> ChessResult<()> {
        Ok(())
    }

    /// Pick a move for the side to move. `best_move` is `None` only when
    /// there is no legal move.
    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> EngineOutput;
}

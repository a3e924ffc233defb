//! Coordinate move notation (`e2e4`, `e7e8q`).
//!
//! Parsing resolves against the legal moves of the side to move, so the
//! returned `Move` carries its real type and captured piece and can be
//! passed straight to `GameState::make_move`.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_position;

pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> ChessResult<Move> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessErrors::InvalidLongAlgebraic(long_algebraic.to_owned()));
    }

    let from = algebraic_to_position(&text[0..2])
        .map_err(|_| ChessErrors::InvalidLongAlgebraic(long_algebraic.to_owned()))?;
    let to = algebraic_to_position(&text[2..4])
        .map_err(|_| ChessErrors::InvalidLongAlgebraic(long_algebraic.to_owned()))?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_char(ch.to_ascii_lowercase()) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(ChessErrors::InvalidLongAlgebraic(long_algebraic.to_owned())),
        },
    };

    if !game_state.board().is_friendly(from, game_state.current_turn()) {
        return Err(ChessErrors::IllegalMove(format!(
            "{text}: no {} piece on {from}",
            game_state.current_turn()
        )));
    }

    game_state
        .get_legal_moves(from)
        .into_iter()
        .find(|mv| mv.to == to && mv.promotion == promotion)
        .ok_or_else(|| ChessErrors::IllegalMove(text.to_owned()))
}

/// Resolve a whitespace-separated list of coordinate moves, playing each
/// one on a copy of `game_state`.
pub fn long_algebraic_line_to_moves(line: &str, game_state: &GameState) -> ChessResult<Vec<Move>> {
    let mut replay = game_state.clone();
    line.split_whitespace()
        .map(|token| {
            let mv = long_algebraic_to_move(token, &replay)?;
            Ok(replay.apply_legal_move(mv))
        })
        .collect()
}

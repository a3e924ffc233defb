//! Full legal move generation pipeline.
//!
//! Dispatches piece-wise pseudo-legal generation, simulates each candidate on
//! a scratch copy of the board, and drops the ones that leave the mover's own
//! king attacked.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move_to_board;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::RuleContext;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Source of legal moves for a game, so perft and search can be pointed at
/// alternative generators in tests.
pub trait MoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move>;
}

/// Legal moves for the side to move, in board-scan order.
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        legal_moves_for_color(
            game_state.board(),
            game_state.current_turn(),
            &game_state.rule_context(),
        )
    }
}

/// Pseudo-legal moves of whatever piece stands on `from`.
pub fn pseudo_legal_moves_from(board: &Board, from: Position, ctx: &RuleContext, out: &mut Vec<Move>) {
    let Some(piece) = board.get_piece(from) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece, ctx, out),
        PieceKind::Knight => generate_knight_moves(board, from, piece, out),
        PieceKind::Bishop => generate_bishop_moves(board, from, piece, out),
        PieceKind::Rook => generate_rook_moves(board, from, piece, out),
        PieceKind::Queen => generate_queen_moves(board, from, piece, out),
        PieceKind::King => generate_king_moves(board, from, piece, ctx, out),
    }
}

/// True when playing `mv` does not leave the mover's king attacked.
#[inline]
pub fn is_legal_after(board: &Board, mv: &Move) -> bool {
    let mut scratch = board.clone();
    apply_move_to_board(&mut scratch, mv);
    !is_king_in_check(&scratch, mv.piece.color)
}

pub fn legal_moves_from(board: &Board, from: Position, ctx: &RuleContext) -> Vec<Move> {
    let mut pseudo = Vec::with_capacity(32);
    pseudo_legal_moves_from(board, from, ctx, &mut pseudo);
    pseudo.retain(|mv| is_legal_after(board, mv));
    pseudo
}

pub fn legal_moves_for_color(board: &Board, color: Color, ctx: &RuleContext) -> Vec<Move> {
    let mut pseudo = Vec::with_capacity(64);
    for (_, from) in board.pieces().filter(|(piece, _)| piece.color == color) {
        pseudo_legal_moves_from(board, from, ctx, &mut pseudo);
    }
    pseudo.retain(|mv| is_legal_after(board, mv));
    pseudo
}

/// Early-exit variant of [`legal_moves_for_color`] for status derivation.
pub fn has_any_legal_move(board: &Board, color: Color, ctx: &RuleContext) -> bool {
    let mut pseudo = Vec::with_capacity(32);
    for (_, from) in board.pieces().filter(|(piece, _)| piece.color == color) {
        pseudo.clear();
        pseudo_legal_moves_from(board, from, ctx, &mut pseudo);
        if pseudo.iter().any(|mv| is_legal_after(board, mv)) {
            return true;
        }
    }
    false
}

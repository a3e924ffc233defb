//! Attack and check detection.
//!
//! `is_square_attacked_by` scans outward from the target square instead of
//! generating the attacker's moves, so it stays independent of the move
//! generators it is used to validate.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

/// True when any piece of `attacker_color` attacks `pos`.
pub fn is_square_attacked_by(board: &Board, pos: Position, attacker_color: Color) -> bool {
    // A pawn attacks diagonally forward, so look one rank "behind" the target
    // from the attacker's point of view.
    let pawn_rank_step = -attacker_color.pawn_direction();
    for file_step in [-1i8, 1] {
        if let Some(from) = pos.offset(file_step, pawn_rank_step) {
            if board.get_piece(from) == Some(Piece::new(PieceKind::Pawn, attacker_color)) {
                return true;
            }
        }
    }

    if offset_hits(board, pos, &KNIGHT_OFFSETS, Piece::new(PieceKind::Knight, attacker_color)) {
        return true;
    }

    if offset_hits(board, pos, &KING_OFFSETS, Piece::new(PieceKind::King, attacker_color)) {
        return true;
    }

    if ray_hits(board, pos, &ROOK_DIRECTIONS, attacker_color, PieceKind::Rook) {
        return true;
    }

    ray_hits(board, pos, &BISHOP_DIRECTIONS, attacker_color, PieceKind::Bishop)
}

/// A missing king is treated as not in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_pos) = board.find_king(color) else {
        return false;
    };
    is_square_attacked_by(board, king_pos, color.opposite())
}

fn offset_hits(board: &Board, pos: Position, offsets: &[(i8, i8)], attacker: Piece) -> bool {
    offsets.iter().any(|&(df, dr)| {
        pos.offset(df, dr)
            .is_some_and(|from| board.get_piece(from) == Some(attacker))
    })
}

/// Walk each ray from `pos`; the first piece met attacks along the ray if it
/// is the attacker's `line_kind` or queen.
fn ray_hits(
    board: &Board,
    pos: Position,
    directions: &[(i8, i8)],
    attacker_color: Color,
    line_kind: PieceKind,
) -> bool {
    for &(df, dr) in directions {
        let mut cursor = pos.offset(df, dr);
        while let Some(sq) = cursor {
            if let Some(piece) = board.get_piece(sq) {
                if piece.color == attacker_color
                    && (piece.kind == line_kind || piece.kind == PieceKind::Queen)
                {
                    return true;
                }
                break;
            }
            cursor = sq.offset(df, dr);
        }
    }
    false
}

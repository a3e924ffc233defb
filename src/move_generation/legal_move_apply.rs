//! Board-level make/unmake of a single move.
//!
//! Only piece placement changes here. Rights, clocks, and turn bookkeeping
//! belong to `GameState`.

use crate::game_state::chess_types::*;

/// Square of the pawn removed by an en-passant capture.
#[inline]
pub fn en_passant_victim_square(mv: &Move) -> Position {
    Position::at(mv.to.file(), mv.from.rank())
}

/// The rook's `(from, to)` for a castling move.
#[inline]
pub fn castling_rook_squares(mv: &Move) -> Option<(Position, Position)> {
    let side = mv.move_type.castle_side()?;
    let rank = mv.from.rank();
    Some((
        Position::at(side.rook_home_file(), rank),
        Position::at(side.rook_target_file(), rank),
    ))
}

/// Apply every board side-effect of `mv`: en-passant removal, rook
/// relocation, the main move, and promotion substitution.
pub fn apply_move_to_board(board: &mut Board, mv: &Move) {
    if mv.move_type == MoveType::EnPassant {
        board.set_piece(en_passant_victim_square(mv), None);
    }

    if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
        board.move_piece(rook_from, rook_to);
    }

    board.move_piece(mv.from, mv.to);

    if let Some(promo) = mv.promotion {
        board.set_piece(mv.to, Some(Piece::new(promo, mv.piece.color)));
    }
}

/// Exact inverse of [`apply_move_to_board`].
pub fn revert_move_on_board(board: &mut Board, mv: &Move) {
    board.set_piece(mv.from, Some(mv.piece));

    if mv.move_type == MoveType::EnPassant {
        board.set_piece(mv.to, None);
        board.set_piece(en_passant_victim_square(mv), mv.captured);
    } else {
        board.set_piece(mv.to, mv.captured);
    }

    if let Some((rook_from, rook_to)) = castling_rook_squares(mv) {
        board.move_piece(rook_to, rook_from);
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move_to_board, revert_move_on_board};
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(name: &str) -> Position {
        algebraic_to_position(name).expect("square should parse")
    }

    fn round_trip(board_fen: &str, mv: Move, expected_after: &str) {
        let original = Board::from_fen(board_fen).expect("board should parse");
        let mut board = original.clone();
        apply_move_to_board(&mut board, &mv);
        assert_eq!(board.to_fen(), expected_after);
        revert_move_on_board(&mut board, &mv);
        assert_eq!(board, original);
    }

    #[test]
    fn castling_moves_the_rook() {
        let king = Piece::new(PieceKind::King, Color::White);
        round_trip(
            "4k3/8/8/8/8/8/8/R3K2R",
            Move::new(sq("e1"), sq("g1"), king, MoveType::CastleKingside),
            "4k3/8/8/8/8/8/8/R4RK1",
        );
        round_trip(
            "4k3/8/8/8/8/8/8/R3K2R",
            Move::new(sq("e1"), sq("c1"), king, MoveType::CastleQueenside),
            "4k3/8/8/8/8/8/8/2KR3R",
        );
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut mv = Move::new(
            sq("e5"),
            sq("d6"),
            Piece::new(PieceKind::Pawn, Color::White),
            MoveType::EnPassant,
        );
        mv.captured = Some(Piece::new(PieceKind::Pawn, Color::Black));
        round_trip("4k3/8/8/3pP3/8/8/8/4K3", mv, "4k3/8/3P4/8/8/8/8/4K3");
    }

    #[test]
    fn promotion_capture_restores_both_pieces() {
        let mut mv = Move::new(
            sq("b2"),
            sq("a1"),
            Piece::new(PieceKind::Pawn, Color::Black),
            MoveType::Promotion,
        );
        mv.captured = Some(Piece::new(PieceKind::Rook, Color::White));
        mv.promotion = Some(PieceKind::Knight);
        round_trip("4k3/8/8/8/8/8/1p6/R3K3", mv, "4k3/8/8/8/8/8/8/n3K3");
    }
}

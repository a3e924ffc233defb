use crate::game_state::chess_rules::KING_HOME_FILE;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked_by;
use crate::move_generation::legal_move_shared::{generate_step_moves, RuleContext, KING_OFFSETS};

pub fn generate_king_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    ctx: &RuleContext,
    out: &mut Vec<Move>,
) {
    generate_step_moves(board, from, piece, &KING_OFFSETS, out);
    generate_castling_moves(board, from, piece, ctx, out);
}

fn generate_castling_moves(
    board: &Board,
    king_from: Position,
    piece: Piece,
    ctx: &RuleContext,
    out: &mut Vec<Move>,
) {
    let side = piece.color;
    let back_rank = side.back_rank();
    if king_from != Position::at(KING_HOME_FILE, back_rank) {
        return;
    }

    let enemy = side.opposite();
    let mut king_checked: Option<bool> = None;

    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !ctx.castling_rights.has(side, castle_side) {
            continue;
        }

        let rook_home = Position::at(castle_side.rook_home_file(), back_rank);
        if board.get_piece(rook_home) != Some(Piece::new(PieceKind::Rook, side)) {
            continue;
        }

        // Every square strictly between king and rook must be empty.
        let (low, high) = if castle_side.rook_home_file() > KING_HOME_FILE {
            (KING_HOME_FILE + 1, castle_side.rook_home_file())
        } else {
            (castle_side.rook_home_file() + 1, KING_HOME_FILE)
        };
        if !(low..high).all(|file| board.is_empty(Position::at(file, back_rank))) {
            continue;
        }

        // Cannot castle out of check.
        let in_check = *king_checked
            .get_or_insert_with(|| is_square_attacked_by(board, king_from, enemy));
        if in_check {
            return;
        }

        // Transit and destination squares; the queenside b-file square only
        // needs to be empty.
        let king_to_file = castle_side.king_target_file();
        let transit_file = castle_side.rook_target_file();
        let path_attacked = [transit_file, king_to_file]
            .into_iter()
            .any(|file| is_square_attacked_by(board, Position::at(file, back_rank), enemy));
        if path_attacked {
            continue;
        }

        let move_type = match castle_side {
            CastleSide::Kingside => MoveType::CastleKingside,
            CastleSide::Queenside => MoveType::CastleQueenside,
        };
        out.push(Move::new(
            king_from,
            Position::at(king_to_file, back_rank),
            piece,
            move_type,
        ));
    }
}

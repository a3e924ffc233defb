use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::RuleContext;

pub fn generate_pawn_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    ctx: &RuleContext,
    out: &mut Vec<Move>,
) {
    let side = piece.color;
    let dir = side.pawn_direction();

    // pushes
    if let Some(one_step) = from.offset(0, dir) {
        if board.is_empty(one_step) {
            push_pawn_move(from, one_step, piece, None, out);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, dir) {
                    if board.is_empty(two_step) {
                        out.push(Move::new(from, two_step, piece, MoveType::Normal));
                    }
                }
            }
        }
    }

    // captures and en-passant
    for file_delta in [-1i8, 1] {
        let Some(to) = from.offset(file_delta, dir) else {
            continue;
        };

        if let Some(target) = board.get_piece(to) {
            if target.color != side {
                push_pawn_move(from, to, piece, Some(target), out);
            }
        } else if ctx.en_passant_target == Some(to) {
            let Some(victim_square) = Position::new(to.file(), from.rank()) else {
                continue;
            };
            let victim = Piece::new(PieceKind::Pawn, side.opposite());
            if board.get_piece(victim_square) == Some(victim) {
                let mut mv = Move::new(from, to, piece, MoveType::EnPassant);
                mv.captured = Some(victim);
                out.push(mv);
            }
        }
    }
}

/// Push a single move, or all four promotion choices when `to` is the last
/// rank.
fn push_pawn_move(
    from: Position,
    to: Position,
    piece: Piece,
    captured: Option<Piece>,
    out: &mut Vec<Move>,
) {
    if to.rank() == piece.color.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            let mut mv = Move::new(from, to, piece, MoveType::Promotion);
            mv.captured = captured;
            mv.promotion = Some(promo);
            out.push(mv);
        }
        return;
    }

    let move_type = if captured.is_some() {
        MoveType::Capture
    } else {
        MoveType::Normal
    };
    let mut mv = Move::new(from, to, piece, move_type);
    mv.captured = captured;
    out.push(mv);
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_shared::RuleContext;
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(name: &str) -> Position {
        algebraic_to_position(name).expect("square should parse")
    }

    fn pawn_moves(board_fen: &str, from: &str, color: Color, ctx: RuleContext) -> Vec<Move> {
        let board = Board::from_fen(board_fen).expect("board should parse");
        let mut out = Vec::new();
        generate_pawn_moves(
            &board,
            sq(from),
            Piece::new(PieceKind::Pawn, color),
            &ctx,
            &mut out,
        );
        out
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let moves = pawn_moves("8/8/8/8/8/8/4P3/8", "e2", Color::White, RuleContext::default());
        assert_eq!(moves.len(), 2);

        let moves = pawn_moves("8/8/8/8/4n3/8/4P3/8", "e2", Color::White, RuleContext::default());
        assert_eq!(moves.len(), 1);

        let moves = pawn_moves("8/8/8/8/8/4n3/4P3/8", "e2", Color::White, RuleContext::default());
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_enumerates_four_pieces_in_order() {
        let moves = pawn_moves("3r4/4P3/8/8/8/8/8/8", "e7", Color::White, RuleContext::default());
        assert_eq!(moves.len(), 8);

        let promos: Vec<_> = moves
            .iter()
            .filter(|mv| mv.to == sq("e8"))
            .map(|mv| mv.promotion.expect("promotion piece"))
            .collect();
        assert_eq!(promos, PieceKind::PROMOTIONS.to_vec());
        assert!(moves
            .iter()
            .filter(|mv| mv.to == sq("d8"))
            .all(|mv| mv.move_type == MoveType::Promotion && mv.captured.is_some()));
    }

    #[test]
    fn en_passant_requires_a_real_enemy_pawn() {
        let ctx = RuleContext {
            en_passant_target: Some(sq("d6")),
            ..RuleContext::default()
        };
        let moves = pawn_moves("8/8/8/3pP3/8/8/8/8", "e5", Color::White, ctx);
        let ep: Vec<_> = moves
            .iter()
            .filter(|mv| mv.move_type == MoveType::EnPassant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, sq("d6"));
        assert_eq!(ep[0].captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));

        let moves = pawn_moves("8/8/8/3nP3/8/8/8/8", "e5", Color::White, ctx);
        assert!(moves.iter().all(|mv| mv.move_type != MoveType::EnPassant));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("8/3p4/2N5/8/8/8/8/8", "d7", Color::Black, RuleContext::default());
        let targets: Vec<String> = moves.iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(moves.len(), 3);
        assert!(targets.contains(&"d6".to_owned()));
        assert!(targets.contains(&"d5".to_owned()));
        assert!(targets.contains(&"c6".to_owned()));
    }
}

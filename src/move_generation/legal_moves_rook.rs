use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_ray_moves, ROOK_DIRECTIONS};

pub fn generate_rook_moves(board: &Board, from: Position, piece: Piece, out: &mut Vec<Move>) {
    generate_ray_moves(board, from, piece, &ROOK_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_rook_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn rook_always_sees_fourteen_squares_on_empty_board() {
        let board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        for pos in [Position::new(0, 0), Position::new(3, 4), Position::new(7, 7)] {
            let mut out = Vec::new();
            generate_rook_moves(&board, pos.expect("square"), rook, &mut out);
            assert_eq!(out.len(), 14);
        }
    }

    #[test]
    fn rook_captures_but_does_not_pass_enemy() {
        let board = Board::from_fen("8/8/8/8/R2p4/8/8/8").expect("board should parse");
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let mut out = Vec::new();
        generate_rook_moves(&board, Position::new(0, 3).expect("a4"), rook, &mut out);
        let captures: Vec<_> = out.iter().filter(|mv| mv.is_capture()).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to.to_string(), "d4");
        assert!(!out.iter().any(|mv| mv.to.to_string() == "e4"));
    }
}

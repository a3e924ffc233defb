use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_step_moves, KNIGHT_OFFSETS};

pub fn generate_knight_moves(board: &Board, from: Position, piece: Piece, out: &mut Vec<Move>) {
    generate_step_moves(board, from, piece, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::chess_types::*;

    #[test]
    fn knight_skips_friendly_squares() {
        let board = Board::from_fen("8/8/8/8/8/8/3P4/1N6").expect("board should parse");
        let knight = Piece::new(PieceKind::Knight, Color::White);
        let from = Position::new(1, 0).expect("b1");
        let mut out = Vec::new();
        generate_knight_moves(&board, from, knight, &mut out);

        let targets: Vec<String> = out.iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(out.len(), 2);
        assert!(targets.contains(&"a3".to_owned()));
        assert!(targets.contains(&"c3".to_owned()));
    }
}

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_ray_moves, BISHOP_DIRECTIONS};

pub fn generate_bishop_moves(board: &Board, from: Position, piece: Piece, out: &mut Vec<Move>) {
    generate_ray_moves(board, from, piece, &BISHOP_DIRECTIONS, out);
}

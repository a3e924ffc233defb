use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_ray_moves, QUEEN_DIRECTIONS};

pub fn generate_queen_moves(board: &Board, from: Position, piece: Piece, out: &mut Vec<Move>) {
    generate_ray_moves(board, from, piece, &QUEEN_DIRECTIONS, out);
}

//! Shared pieces of pseudo-legal generation: the rule context handed down
//! from `GameState`, direction tables, and the step/ray walkers used by the
//! per-piece generators.

use crate::game_state::chess_types::*;

/// The parts of `GameState` that move rules depend on beyond the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleContext {
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Position>,
}

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// Build a normal move or a capture, depending on what stands on `to`.
#[inline]
pub fn build_move(board: &Board, from: Position, to: Position, piece: Piece) -> Move {
    match board.get_piece(to) {
        Some(target) => {
            let mut mv = Move::new(from, to, piece, MoveType::Capture);
            mv.captured = Some(target);
            mv
        }
        None => Move::new(from, to, piece, MoveType::Normal),
    }
}

/// Fixed-offset moves (knight, king): on board and not onto a friendly piece.
pub fn generate_step_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    offsets: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        if board.is_friendly(to, piece.color) {
            continue;
        }
        out.push(build_move(board, from, to, piece));
    }
}

/// Sliding moves: walk each ray until the edge or a blocker. An enemy
/// blocker yields one final capture.
pub fn generate_ray_moves(
    board: &Board,
    from: Position,
    piece: Piece,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match board.get_piece(to) {
                None => out.push(Move::new(from, to, piece, MoveType::Normal)),
                Some(blocker) => {
                    if blocker.color != piece.color {
                        out.push(build_move(board, from, to, piece));
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
}

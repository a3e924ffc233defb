//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays modular by delegating static position scoring to this trait,
//! so alternate heuristics can be swapped without altering search code.
//! Scores are centipawns from White's point of view.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    generate_ray_moves, generate_step_moves, BISHOP_DIRECTIONS, KNIGHT_OFFSETS,
    QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
use crate::tables::piece_square_tables::piece_square_bonus;

pub trait BoardScorer {
    /// Score the board; positive favors White.
    fn score(&self, board: &Board) -> i32;
}

/// Material only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub fn material_balance_white_minus_black(board: &Board) -> i32 {
        board
            .pieces()
            .map(|(piece, _)| sign(piece.color) * piece.kind.value())
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        Self::material_balance_white_minus_black(board)
    }
}

/// Material, piece-square tables, pawn structure, king shield, and mobility.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    const MOBILITY_WEIGHT: i32 = 2;
    const DOUBLED_PAWN_PENALTY: i32 = 20;
    const ISOLATED_PAWN_PENALTY: i32 = 15;
    const PAWN_SHIELD_BONUS: i32 = 10;
    /// Passed-pawn bonus by ranks advanced from the pawn's own back rank.
    const PASSED_PAWN_BONUS: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];

    fn positional_term(board: &Board, endgame: bool) -> i32 {
        board
            .pieces()
            .map(|(piece, pos)| {
                sign(piece.color) * piece_square_bonus(piece.kind, piece.color, pos, endgame)
            })
            .sum()
    }

    fn pawn_structure_term(board: &Board) -> i32 {
        let mut pawn_files = [[0i32; 8]; 2];
        for (piece, pos) in board.pieces() {
            if piece.kind == PieceKind::Pawn {
                pawn_files[piece.color.index()][pos.file() as usize] += 1;
            }
        }

        let mut score = 0;
        for color in [Color::White, Color::Black] {
            let own = &pawn_files[color.index()];
            let mut term = 0;

            for &count in own {
                if count > 1 {
                    term -= Self::DOUBLED_PAWN_PENALTY * (count - 1);
                }
            }

            for (piece, pos) in board.pieces() {
                if piece != Piece::new(PieceKind::Pawn, color) {
                    continue;
                }

                let file = pos.file() as usize;
                let left = file.checked_sub(1).map_or(0, |f| own[f]);
                let right = own.get(file + 1).copied().unwrap_or(0);
                if left == 0 && right == 0 {
                    term -= Self::ISOLATED_PAWN_PENALTY;
                }

                if is_passed_pawn(board, pos, color) {
                    let advanced = match color {
                        Color::White => pos.rank(),
                        Color::Black => 7 - pos.rank(),
                    };
                    term += Self::PASSED_PAWN_BONUS[advanced as usize];
                }
            }

            score += sign(color) * term;
        }
        score
    }

    fn king_safety_term(board: &Board) -> i32 {
        let mut score = 0;
        for color in [Color::White, Color::Black] {
            let Some(king) = board.find_king(color) else {
                continue;
            };
            let shield = [-1i8, 0, 1]
                .into_iter()
                .filter_map(|df| king.offset(df, color.pawn_direction()))
                .filter(|&pos| board.get_piece(pos) == Some(Piece::new(PieceKind::Pawn, color)))
                .count() as i32;
            score += sign(color) * shield * Self::PAWN_SHIELD_BONUS;
        }
        score
    }

    fn mobility_term(board: &Board) -> i32 {
        let mut scratch = Vec::with_capacity(32);
        let mut white_minus_black = 0;

        for (piece, pos) in board.pieces() {
            scratch.clear();
            match piece.kind {
                PieceKind::Knight => generate_step_moves(board, pos, piece, &KNIGHT_OFFSETS, &mut scratch),
                PieceKind::Bishop => generate_ray_moves(board, pos, piece, &BISHOP_DIRECTIONS, &mut scratch),
                PieceKind::Rook => generate_ray_moves(board, pos, piece, &ROOK_DIRECTIONS, &mut scratch),
                PieceKind::Queen => generate_ray_moves(board, pos, piece, &QUEEN_DIRECTIONS, &mut scratch),
                PieceKind::Pawn | PieceKind::King => continue,
            }
            white_minus_black += sign(piece.color) * scratch.len() as i32;
        }

        white_minus_black * Self::MOBILITY_WEIGHT
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, board: &Board) -> i32 {
        let endgame = is_endgame(board);
        let material = MaterialScorer::material_balance_white_minus_black(board);
        let positional = Self::positional_term(board, endgame);
        let pawns = Self::pawn_structure_term(board);
        let king_safety = if endgame { 0 } else { Self::king_safety_term(board) };
        let mobility = Self::mobility_term(board);
        material + positional + pawns + king_safety + mobility
    }
}

/// Static evaluation with the standard scorer.
#[inline]
pub fn evaluate(board: &Board) -> i32 {
    StandardScorer.score(board)
}

/// No queens on the board, or every side that has a queen has at most one
/// other non-pawn piece.
pub fn is_endgame(board: &Board) -> bool {
    let mut queens = [0u32; 2];
    let mut minors_and_rooks = [0u32; 2];
    for (piece, _) in board.pieces() {
        match piece.kind {
            PieceKind::Queen => queens[piece.color.index()] += 1,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook => {
                minors_and_rooks[piece.color.index()] += 1
            }
            PieceKind::Pawn | PieceKind::King => {}
        }
    }

    [Color::White, Color::Black]
        .into_iter()
        .all(|color| queens[color.index()] == 0 || minors_and_rooks[color.index()] <= 1)
}

/// No enemy pawn ahead of this pawn on its own or an adjacent file.
pub fn is_passed_pawn(board: &Board, pos: Position, color: Color) -> bool {
    let enemy_pawn = Piece::new(PieceKind::Pawn, color.opposite());
    board.pieces().all(|(piece, other)| {
        if piece != enemy_pawn || other.file().abs_diff(pos.file()) > 1 {
            return true;
        }
        match color {
            Color::White => other.rank() <= pos.rank(),
            Color::Black => other.rank() >= pos.rank(),
        }
    })
}

#[inline]
fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn board(fen_board: &str) -> Board {
        Board::from_fen(fen_board).expect("board should parse")
    }

    fn mirror(board: &Board) -> Board {
        let mut out = Board::empty();
        for (piece, pos) in board.pieces() {
            let flipped = Position::new(pos.file(), 7 - pos.rank()).expect("mirror square");
            out.set_piece(flipped, Some(Piece::new(piece.kind, piece.color.opposite())));
        }
        out
    }

    #[test]
    fn starting_position_is_balanced() {
        let start = GameState::from_fen(STARTING_POSITION_FEN).expect("FEN should parse");
        assert_eq!(evaluate(start.board()), 0);
        assert_eq!(MaterialScorer.score(start.board()), 0);
    }

    #[test]
    fn color_mirrored_positions_negate() {
        for fen in [
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "4k3/8/8/3P4/8/8/PP6/4K3",
        ] {
            let b = board(fen);
            assert_eq!(evaluate(&b), -evaluate(&mirror(&b)), "{fen}");
        }
    }

    #[test]
    fn extra_queen_dominates() {
        let b = board("4k3/8/8/8/8/8/8/3QK3");
        assert!(evaluate(&b) > 800);
        assert_eq!(MaterialScorer.score(&b), 900);
    }

    #[test]
    fn endgame_phase_detection() {
        assert!(!is_endgame(&board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")));
        assert!(is_endgame(&board("r3k3/pppppppp/8/8/8/8/PPPPPPPP/R3K3")));
        assert!(is_endgame(&board("3qk3/8/8/8/8/8/8/2NQK3")));
        assert!(!is_endgame(&board("3qk3/8/8/8/8/8/8/1NBQK3")));
    }

    #[test]
    fn passed_pawn_detection() {
        let b = board("4k3/8/8/3P4/8/8/8/4K3");
        assert!(is_passed_pawn(&b, Position::new(3, 4).expect("d5"), Color::White));

        let b = board("4k3/2p5/8/3P4/8/8/8/4K3");
        assert!(!is_passed_pawn(&b, Position::new(3, 4).expect("d5"), Color::White));

        // an enemy pawn behind does not block
        let b = board("4k3/8/8/3P4/2p5/8/8/4K3");
        assert!(is_passed_pawn(&b, Position::new(3, 4).expect("d5"), Color::White));
    }

    #[test]
    fn doubled_and_isolated_pawns_are_penalised() {
        let healthy = board("4k3/8/8/8/8/8/3PP3/4K3");
        let doubled = board("4k3/8/8/8/8/3P4/3P4/4K3");
        assert!(
            StandardScorer::pawn_structure_term(&healthy)
                > StandardScorer::pawn_structure_term(&doubled)
        );
    }
}

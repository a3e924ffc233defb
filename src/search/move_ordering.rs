//! Move ordering heuristics.
//!
//! Moves are scored once and sorted best-first. Captures use MVV-LVA on top
//! of a fixed capture bonus; promotions and checks get fixed bonuses, and a
//! checkmating move outranks everything. Quiet moves are nudged toward the
//! centre.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move_to_board;
use crate::move_generation::legal_move_checks::is_king_in_check;

pub const CAPTURE_BONUS: i32 = 10_000;
pub const PROMOTION_BONUS: i32 = 8_000;
pub const CHECK_BONUS: i32 = 5_000;
pub const CHECKMATE_BONUS: i32 = 1_000_000;
pub const CENTRALIZATION_WEIGHT: i32 = 5;

/// Ordering score for a legal move of the side to move in `game_state`.
pub fn score_move(game_state: &GameState, mv: &Move) -> i32 {
    let mut score = 0;

    match mv.captured {
        Some(victim) => {
            score += CAPTURE_BONUS + victim.kind.value() - mv.piece.kind.value() / 10;
        }
        None => score += centralization_bonus(mv.to),
    }

    if let Some(promo) = mv.promotion {
        score += PROMOTION_BONUS + promo.value();
    }

    let mut scratch = game_state.board().clone();
    apply_move_to_board(&mut scratch, mv);
    if is_king_in_check(&scratch, mv.piece.color.opposite()) {
        score += CHECK_BONUS;

        // Only checking moves can mate, so the full replay is limited to them.
        let mut child = game_state.clone();
        if child.apply_legal_move(*mv).is_checkmate {
            score += CHECKMATE_BONUS;
        }
    }

    score
}

/// `(14 - manhattan distance to the centre in half-squares) * weight`.
#[inline]
pub fn centralization_bonus(pos: Position) -> i32 {
    let file_dist = (2 * pos.file() as i32 - 7).abs();
    let rank_dist = (2 * pos.rank() as i32 - 7).abs();
    (14 - (file_dist + rank_dist)) * CENTRALIZATION_WEIGHT
}

/// Sort best-first. Ties keep generation order.
pub fn order_moves(game_state: &GameState, moves: Vec<Move>) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| (score_move(game_state, &mv), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

/// Candidate cap for interior nodes with `depth` plies remaining.
#[inline]
pub fn interior_breadth(depth: u8) -> usize {
    match depth {
        0 | 1 => 20,
        2 => 15,
        _ => 10,
    }
}

/// Move `mv` (matched by squares, type, and promotion) to the front.
pub fn promote_to_front(moves: &mut [Move], mv: &Move) {
    if let Some(idx) = moves.iter().position(|candidate| candidate.matches(mv)) {
        moves[..=idx].rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn lan(game: &GameState, text: &str) -> Move {
        long_algebraic_to_move(text, game).expect("move should resolve")
    }

    #[test]
    fn mvv_lva_prefers_cheap_attacker_on_big_victim() {
        let g = game("k7/8/5r2/3q4/2P1N3/8/8/4K3 w - - 0 1");
        let pawn_takes_queen = score_move(&g, &lan(&g, "c4d5"));
        let knight_takes_rook = score_move(&g, &lan(&g, "e4f6"));
        let quiet = score_move(&g, &lan(&g, "e1f1"));
        assert_eq!(pawn_takes_queen, CAPTURE_BONUS + 900 - 10);
        assert_eq!(knight_takes_rook, CAPTURE_BONUS + 500 - 32);
        assert!(knight_takes_rook > quiet);
    }

    #[test]
    fn checkmate_outranks_everything() {
        let g = game("k7/8/1K6/8/8/8/8/n6R w - - 0 1");
        let ordered = order_moves(&g, g.get_all_current_legal_moves());
        assert_eq!(ordered[0].to_long_algebraic(), "h1h8");
        assert!(score_move(&g, &ordered[0]) >= CHECKMATE_BONUS);
        assert_eq!(ordered[1].to_long_algebraic(), "h1a1");
    }

    #[test]
    fn centre_squares_score_highest() {
        assert_eq!(centralization_bonus(Position::new(3, 3).expect("d4")), 60);
        assert_eq!(centralization_bonus(Position::new(0, 0).expect("a1")), 0);
        assert_eq!(centralization_bonus(Position::new(7, 7).expect("h8")), 0);
    }

    #[test]
    fn breadth_shrinks_with_depth() {
        assert_eq!(interior_breadth(1), 20);
        assert_eq!(interior_breadth(2), 15);
        assert_eq!(interior_breadth(5), 10);
    }

    #[test]
    fn promote_to_front_keeps_relative_order() {
        let g = GameState::new_game();
        let mut moves = g.get_all_current_legal_moves();
        let third = moves[2];
        let (first, second) = (moves[0], moves[1]);
        promote_to_front(&mut moves, &third);
        assert_eq!(moves[0], third);
        assert_eq!(moves[1], first);
        assert_eq!(moves[2], second);
    }
}

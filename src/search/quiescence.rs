//! Capture-only extension search.
//!
//! Entered at the horizon when enabled in `SearchConfig`. Uses the static
//! evaluation as a stand-pat bound, skips captures that cannot swing the
//! window even with a generous margin (delta pruning), and caps both the
//! number of captures tried per node and the extension depth.

use crate::game_state::chess_types::*;
use crate::search::board_scoring::BoardScorer;
use crate::search::iterative_deepening::{terminal_score, SearchContext};

pub const DELTA_MARGIN: i32 = 200;

pub(crate) fn quiescence<S: BoardScorer>(
    ctx: &mut SearchContext<'_, S>,
    game_state: &GameState,
    mut alpha: i32,
    mut beta: i32,
    depth_left: u8,
) -> i32 {
    let stand_pat = ctx.static_eval(game_state);
    if ctx.budget.tick() {
        return stand_pat;
    }
    if game_state.is_game_over() {
        return terminal_score(game_state);
    }
    if depth_left == 0 {
        return stand_pat;
    }

    let maximizing = game_state.current_turn() == Color::White;
    if maximizing {
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);
    } else {
        if stand_pat <= alpha {
            return stand_pat;
        }
        beta = beta.min(stand_pat);
    }

    let mut captures: Vec<Move> = game_state
        .get_all_current_legal_moves()
        .into_iter()
        .filter(Move::is_capture)
        .collect();
    captures.sort_by_key(|mv| std::cmp::Reverse(capture_gain(mv) * 10 - mv.piece.kind.value()));

    for mv in captures.into_iter().take(ctx.config.quiescence_max_captures) {
        let gain = capture_gain(&mv);
        if maximizing && stand_pat + gain + DELTA_MARGIN < alpha {
            continue;
        }
        if !maximizing && stand_pat - gain - DELTA_MARGIN > beta {
            continue;
        }

        let mut child = game_state.clone();
        child.apply_legal_move(mv);
        let score = quiescence(ctx, &child, alpha, beta, depth_left - 1);
        if ctx.budget.is_stopped() {
            return stand_pat;
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
        if alpha >= beta {
            break;
        }
    }

    if maximizing {
        alpha
    } else {
        beta
    }
}

/// Material a capture can win, counting the promotion upgrade.
#[inline]
fn capture_gain(mv: &Move) -> i32 {
    let victim = mv.captured.map_or(0, |p| p.kind.value());
    let upgrade = mv
        .promotion
        .map_or(0, |promo| promo.value() - PieceKind::Pawn.value());
    victim + upgrade
}

//! Iterative deepening search with minimax alpha-beta pruning.
//!
//! White maximizes and Black minimizes; every score is from White's point of
//! view, matching the evaluator. Each completed depth replaces the fallback
//! move, so a budget trip mid-iteration still leaves a legal answer.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;
use crate::search::board_scoring::{BoardScorer, StandardScorer};
use crate::search::move_ordering::{interior_breadth, order_moves, promote_to_front};
use crate::search::quiescence::quiescence;
use crate::search::search_budget::SearchBudget;
use crate::search::transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};
use crate::search::zobrist::compute_zobrist_key;

/// Base checkmate score, reduced by the length of the game's move history
/// at the point the mate is found.
pub const MATE_SCORE: i32 = 100_000;

const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Scale of the root jitter; 0 disables it.
    pub randomness: f64,
    pub max_time_ms: u64,
    pub max_nodes: u64,
    pub use_quiescence: bool,
    pub quiescence_depth: u8,
    pub quiescence_max_captures: usize,
    /// Only examine the best few ordered moves below the root.
    pub limit_interior_breadth: bool,
    pub use_transposition_table: bool,
    pub tt_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            randomness: 0.15,
            max_time_ms: 1_000,
            max_nodes: 8_000,
            use_quiescence: false,
            quiescence_depth: 4,
            quiescence_max_captures: 8,
            limit_interior_breadth: true,
            use_transposition_table: true,
            tt_capacity: 100_000,
        }
    }
}

impl SearchConfig {
    /// Full-width, deterministic, and without time or node limits.
    pub fn unbounded() -> Self {
        Self {
            max_depth: 3,
            randomness: 0.0,
            max_time_ms: u64::MAX,
            max_nodes: u64::MAX,
            limit_interior_breadth: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    /// Deepest fully completed iteration.
    pub reached_depth: u8,
    pub nodes: u64,
    /// The budget tripped before `max_depth` completed.
    pub aborted: bool,
    pub tt_stats: TTStats,
}

/// State shared by every node of one top-level search.
pub(crate) struct SearchContext<'a, S: BoardScorer> {
    pub scorer: &'a S,
    pub config: &'a SearchConfig,
    pub budget: SearchBudget,
    pub tt: &'a mut TranspositionTable,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    #[inline]
    pub fn static_eval(&self, game_state: &GameState) -> i32 {
        self.scorer.score(game_state.board())
    }
}

/// Score of a finished game: mate is `MATE_SCORE` minus the number of moves
/// played so far, signed for the winner; every other ending is zero.
pub(crate) fn terminal_score(game_state: &GameState) -> i32 {
    let plies = i32::try_from(game_state.move_history().len()).unwrap_or(MATE_SCORE);
    match game_state.status() {
        GameStatus::Checkmate { winner: Color::White } => MATE_SCORE - plies,
        GameStatus::Checkmate { winner: Color::Black } => -(MATE_SCORE - plies),
        _ => 0,
    }
}

/// Owns what survives between searches: the scorer, the transposition
/// table, the jitter RNG, and an optional external stop flag.
pub struct Searcher<S: BoardScorer = StandardScorer> {
    scorer: S,
    tt: TranspositionTable,
    rng: StdRng,
    stop_signal: Option<Arc<AtomicBool>>,
}

impl Searcher<StandardScorer> {
    pub fn new() -> Self {
        Self::with_scorer(StandardScorer, None)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_scorer(StandardScorer, Some(seed))
    }
}

impl Default for Searcher<StandardScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer> Searcher<S> {
    pub fn with_scorer(scorer: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            scorer,
            tt: TranspositionTable::with_capacity(SearchConfig::default().tt_capacity),
            rng,
            stop_signal: None,
        }
    }

    /// Flag polled alongside the clock; setting it ends the search early.
    pub fn set_stop_signal(&mut self, stop_signal: Option<Arc<AtomicBool>>) {
        self.stop_signal = stop_signal;
    }

    pub fn clear_transposition_table(&mut self) {
        self.tt.clear();
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn search(&mut self, game_state: &GameState, config: &SearchConfig) -> SearchResult {
        let legal = game_state.get_all_current_legal_moves();
        let static_score = self.scorer.score(game_state.board());

        match legal.len() {
            0 => {
                let best_score = if game_state.is_game_over() {
                    terminal_score(game_state)
                } else {
                    static_score
                };
                return SearchResult {
                    best_score,
                    ..SearchResult::default()
                };
            }
            1 => {
                return SearchResult {
                    best_move: legal.first().copied(),
                    best_score: static_score,
                    ..SearchResult::default()
                };
            }
            _ => {}
        }

        if self.tt.capacity() != config.tt_capacity.max(2) {
            self.tt = TranspositionTable::with_capacity(config.tt_capacity);
        }
        self.tt.prepare_for_search();

        let mut ctx = SearchContext {
            scorer: &self.scorer,
            config,
            budget: SearchBudget::new(config.max_time_ms, config.max_nodes, self.stop_signal.clone()),
            tt: &mut self.tt,
        };

        let mut root_moves = order_moves(game_state, legal);
        let mut best_move = root_moves[0];
        let mut best_score = static_score;
        let mut reached_depth = 0;
        let mut aborted = false;

        for depth in 1..=config.max_depth.max(1) {
            if reached_depth > 0 {
                promote_to_front(&mut root_moves, &best_move);
            }

            match search_root(&mut ctx, &mut self.rng, game_state, &root_moves, depth) {
                Some((mv, score)) => {
                    best_move = mv;
                    best_score = score;
                    reached_depth = depth;
                    log::debug!(
                        "depth {depth} best {mv} score {score} nodes {} elapsed {:?}",
                        ctx.budget.nodes(),
                        ctx.budget.elapsed()
                    );
                }
                None => {
                    aborted = true;
                    log::debug!("depth {depth} aborted, keeping {best_move}");
                    break;
                }
            }
        }

        let nodes = ctx.budget.nodes();
        SearchResult {
            best_move: Some(best_move),
            best_score,
            reached_depth,
            nodes,
            aborted,
            tt_stats: self.tt.stats(),
        }
    }
}

/// One full root iteration. `None` when the budget tripped part-way.
fn search_root<S: BoardScorer>(
    ctx: &mut SearchContext<'_, S>,
    rng: &mut StdRng,
    game_state: &GameState,
    moves: &[Move],
    depth: u8,
) -> Option<(Move, i32)> {
    let maximizing = game_state.current_turn() == Color::White;
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    // (move, jittered score, raw score)
    let mut best: Option<(Move, i32, i32)> = None;

    for &mv in moves {
        let mut child = game_state.clone();
        child.apply_legal_move(mv);
        let score = minimax(ctx, &child, depth - 1, alpha, beta);
        if ctx.budget.is_stopped() {
            return None;
        }

        let jittered = score + root_jitter(rng, ctx.config.randomness);
        let improves = match best {
            None => true,
            Some((_, current, _)) if maximizing => jittered > current,
            Some((_, current, _)) => jittered < current,
        };
        if improves {
            best = Some((mv, jittered, score));
        }

        if maximizing {
            alpha = alpha.max(jittered);
        } else {
            beta = beta.min(jittered);
        }
    }

    best.map(|(mv, _, score)| (mv, score))
}

#[inline]
fn root_jitter(rng: &mut StdRng, randomness: f64) -> i32 {
    if randomness <= 0.0 {
        return 0;
    }
    ((rng.random::<f64>() - 0.5) * randomness * 100.0) as i32
}

fn minimax<S: BoardScorer>(
    ctx: &mut SearchContext<'_, S>,
    game_state: &GameState,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if ctx.budget.tick() {
        return ctx.static_eval(game_state);
    }
    if game_state.is_game_over() {
        return terminal_score(game_state);
    }

    let (alpha_orig, beta_orig) = (alpha, beta);
    let key = ctx
        .config
        .use_transposition_table
        .then(|| compute_zobrist_key(game_state));

    if let Some(entry) = key.and_then(|key| ctx.tt.probe(key, depth)) {
        match entry.bound {
            Bound::Exact => return entry.score,
            Bound::Lower => alpha = alpha.max(entry.score),
            Bound::Upper => beta = beta.min(entry.score),
        }
        if alpha >= beta {
            return entry.score;
        }
    }

    if depth == 0 {
        return if ctx.config.use_quiescence {
            let q_depth = ctx.config.quiescence_depth;
            quiescence(ctx, game_state, alpha, beta, q_depth)
        } else {
            ctx.static_eval(game_state)
        };
    }

    let mut moves = order_moves(game_state, game_state.get_all_current_legal_moves());
    if ctx.config.limit_interior_breadth {
        moves.truncate(interior_breadth(depth));
    }

    let maximizing = game_state.current_turn() == Color::White;
    let mut best = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;

    for mv in moves {
        let mut child = game_state.clone();
        child.apply_legal_move(mv);
        let score = minimax(ctx, &child, depth - 1, alpha, beta);

        if maximizing {
            if score > best {
                best = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        } else {
            if score < best {
                best = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
        }

        if ctx.budget.is_stopped() || alpha >= beta {
            break;
        }
    }

    if ctx.budget.is_stopped() {
        return best;
    }

    if let Some(key) = key {
        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        ctx.tt.store(
            key,
            TTEntry {
                depth,
                score: best,
                bound,
                best_move,
            },
        );
    }

    best
}

//! Computer opponent built on the iterative deepening searcher.
//!
//! `ChessAI` carries a difficulty, the search settings derived from it, and a
//! `Searcher` whose transposition table persists between moves of one game.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::engines::difficulty::Difficulty;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::search::board_scoring::BoardScorer;
use crate::search::iterative_deepening::{terminal_score, SearchConfig, SearchResult, Searcher};

/// Evaluation summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAnalysis {
    /// Centipawns, positive favours White.
    pub evaluation: i32,
    pub best_move: Option<Move>,
    pub depth: u8,
}

pub struct ChessAI {
    difficulty: Difficulty,
    config: SearchConfig,
    searcher: Searcher,
    nodes_searched: u64,
}

pub fn create_ai(difficulty: Difficulty) -> ChessAI {
    ChessAI::new(difficulty)
}

impl ChessAI {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_searcher(difficulty, Searcher::new())
    }

    /// Reproducible root jitter.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::from_searcher(difficulty, Searcher::with_seed(seed))
    }

    fn from_searcher(difficulty: Difficulty, searcher: Searcher) -> Self {
        Self {
            difficulty,
            config: difficulty.config(),
            searcher,
            nodes_searched: 0,
        }
    }

    /// Switch level. Any option overrides are dropped.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.config = difficulty.config();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_stop_signal(&mut self, stop_signal: Option<Arc<AtomicBool>>) {
        self.searcher.set_stop_signal(stop_signal);
    }

    /// Nodes visited by the most recent search.
    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn get_best_move(&mut self, game_state: &GameState) -> Option<Move> {
        let config = self.config;
        self.run(game_state, &config).best_move
    }

    /// Like `get_best_move`, without root jitter.
    pub fn get_hint(&mut self, game_state: &GameState) -> Option<Move> {
        let config = self.deterministic_config();
        self.run(game_state, &config).best_move
    }

    /// One ply, static evaluation only.
    pub fn get_fast_hint(&self, game_state: &GameState) -> Option<Move> {
        let maximizing = game_state.current_turn() == Color::White;
        game_state
            .get_all_current_legal_moves()
            .into_iter()
            .map(|mv| {
                let mut child = game_state.clone();
                child.apply_legal_move(mv);
                let score = if child.is_game_over() {
                    terminal_score(&child)
                } else {
                    self.searcher.scorer().score(child.board())
                };
                (mv, if maximizing { score } else { -score })
            })
            .fold(None, |best: Option<(Move, i32)>, (mv, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((mv, score)),
            })
            .map(|(mv, _)| mv)
    }

    pub fn analyze_position(&mut self, game_state: &GameState) -> PositionAnalysis {
        let config = self.deterministic_config();
        let result = self.run(game_state, &config);
        PositionAnalysis {
            evaluation: result.best_score,
            best_move: result.best_move,
            depth: result.reached_depth,
        }
    }

    fn deterministic_config(&self) -> SearchConfig {
        SearchConfig {
            randomness: 0.0,
            ..self.config
        }
    }

    fn run(&mut self, game_state: &GameState, config: &SearchConfig) -> SearchResult {
        let result = self.searcher.search(game_state, config);
        self.nodes_searched = result.nodes;
        result
    }
}

fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value.trim().parse().map_err(|_| ChessErrors::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

impl Engine for ChessAI {
    fn name(&self) -> &str {
        "Checkmate Core"
    }

    fn new_game(&mut self) {
        self.searcher.clear_transposition_table();
        self.nodes_searched = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        match name.to_ascii_lowercase().as_str() {
            "difficulty" => self.set_difficulty(value.parse()?),
            "quiescence" => self.config.use_quiescence = parse_option(name, value)?,
            "maxnodes" => self.config.max_nodes = parse_option(name, value)?,
            "maxtimems" => self.config.max_time_ms = parse_option(name, value)?,
            _ => {
                return Err(ChessErrors::InvalidOption {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })
            }
        }
        log::debug!("option {name} = {value}");
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> EngineOutput {
        let mut config = self.config;
        if let Some(depth) = params.depth {
            config.max_depth = depth.max(1);
        }
        if let Some(movetime) = params.movetime_ms {
            config.max_time_ms = movetime;
        }
        if let Some(nodes) = params.nodes {
            config.max_nodes = nodes;
        }

        let result = self.run(game_state, &config);

        let mut out = EngineOutput {
            best_move: result.best_move,
            ..EngineOutput::default()
        };
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {}",
            result.reached_depth, result.best_score, result.nodes
        ));
        out.info_lines.push(format!(
            "info string difficulty {} tt_hits {}/{}{}",
            self.difficulty,
            result.tt_stats.hits,
            result.tt_stats.probes,
            if result.aborted { " aborted" } else { "" }
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn lan(mv: Option<Move>) -> Option<String> {
        mv.map(|mv| mv.to_long_algebraic())
    }

    #[test]
    fn every_level_finds_mate_in_one() {
        let position = game("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        for level in Difficulty::ALL {
            let mut ai = ChessAI::with_seed(level, 11);
            assert_eq!(lan(ai.get_best_move(&position)).as_deref(), Some("h1h8"), "{level}");
            assert!(ai.get_nodes_searched() > 0);
        }
    }

    #[test]
    fn no_move_when_the_game_is_over() {
        let mated = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let mut ai = create_ai(Difficulty::Hard);
        assert!(ai.get_best_move(&mated).is_none());
        assert!(ai.get_hint(&mated).is_none());
        assert!(ai.get_fast_hint(&mated).is_none());
    }

    #[test]
    fn best_move_is_always_legal() {
        let mut position = GameState::new_game();
        let mut ai = ChessAI::with_seed(Difficulty::Easy, 3);
        for _ in 0..6 {
            let mv = ai.get_best_move(&position).expect("a move should exist");
            assert!(position.make_move(&mv), "{mv} should be legal");
        }
        assert_eq!(position.move_history().len(), 6);
    }

    #[test]
    fn fast_hint_takes_the_free_queen() {
        let position = game("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let ai = create_ai(Difficulty::Easy);
        assert_eq!(lan(ai.get_fast_hint(&position)).as_deref(), Some("d1d5"));

        // Black side picks its own best, not White's.
        let position = game("3rk3/8/8/3Q4/8/8/8/4K3 b - - 0 1");
        assert_eq!(lan(ai.get_fast_hint(&position)).as_deref(), Some("d8d5"));
    }

    #[test]
    fn analysis_reports_depth_and_white_positive_score() {
        let position = game("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        let mut ai = ChessAI::with_seed(Difficulty::Medium, 1);
        let analysis = ai.analyze_position(&position);
        assert_eq!(analysis.depth, 2);
        assert!(analysis.evaluation > 800);
        assert!(analysis.best_move.is_some());
    }

    #[test]
    fn set_difficulty_resets_config() {
        let mut ai = create_ai(Difficulty::Easy);
        ai.set_option("MaxNodes", "123").expect("option should apply");
        assert_eq!(ai.config().max_nodes, 123);

        ai.set_difficulty(Difficulty::Master);
        assert_eq!(ai.difficulty(), Difficulty::Master);
        assert_eq!(*ai.config(), Difficulty::Master.config());
    }

    #[test]
    fn engine_options_are_validated() {
        let mut ai = create_ai(Difficulty::Medium);
        ai.set_option("difficulty", "hard").expect("difficulty should apply");
        assert_eq!(ai.difficulty(), Difficulty::Hard);
        ai.set_option("Quiescence", "true").expect("bool should parse");
        assert!(ai.config().use_quiescence);

        assert!(matches!(
            ai.set_option("MaxTimeMs", "soon"),
            Err(ChessErrors::InvalidOption { .. })
        ));
        assert!(matches!(
            ai.set_option("Hash", "64"),
            Err(ChessErrors::InvalidOption { .. })
        ));
        assert!(matches!(
            ai.set_option("Difficulty", "impossible"),
            Err(ChessErrors::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn choose_move_honours_go_params_and_reports_info() {
        let mut position = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &position).expect("e2e4 is legal");
        assert!(position.make_move(&mv));

        let mut ai = ChessAI::with_seed(Difficulty::Master, 9);
        let out = ai.choose_move(
            &position,
            &GoParams {
                depth: Some(1),
                ..GoParams::default()
            },
        );
        let best = out.best_move.expect("a reply should exist");
        assert_eq!(best.piece.color, Color::Black);
        assert!(out.info_lines[0].starts_with("info depth 1 score cp "));
        assert_eq!(ai.name(), "Checkmate Core");
    }
}

//! Crate root module declarations for the checkmate chess core.
//!
//! This file exposes the top-level subsystems (game state, move generation,
//! search, engines, and utility codecs) so the console driver, benches, and
//! external callers can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod quiescence;
    pub mod search_budget;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod chess_ai;
    pub mod difficulty;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}

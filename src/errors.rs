//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by parsing utilities and
//! configuration entry points. Move application is deliberately not part of
//! it: `GameState::make_move` reports illegal attempts with `false` so a UI
//! can probe legality without handling errors.

/// Unified error type for the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessErrors {
    /// A FEN string had the wrong shape or an unparsable field.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// The board field of a FEN string could not be parsed.
    #[error("invalid FEN board field: {0}")]
    InvalidFenBoard(String),

    /// A square name such as `e4` could not be parsed.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// A coordinate move such as `e2e4` or `e7e8q` could not be parsed.
    #[error("invalid long algebraic move: {0}")]
    InvalidLongAlgebraic(String),

    /// A move was well-formed but is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A PGN tag pair could not be parsed.
    #[error("invalid PGN header: {0}")]
    InvalidPgnHeader(String),

    /// A difficulty name outside `easy|medium|hard|master`.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// An engine option name or value was rejected.
    #[error("invalid engine option {name}: {value}")]
    InvalidOption { name: String, value: String },
}

pub type ChessResult<T> = Result<T, ChessErrors>;

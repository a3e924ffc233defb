//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position and the thresholds
//! used when deriving draw status.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture before the fifty-move draw.
pub const FIFTY_MOVE_HALF_MOVES: u16 = 100;

/// Occurrences of the same position that make a threefold repetition.
pub const REPETITION_COUNT: usize = 3;

/// File the king starts on.
pub const KING_HOME_FILE: u8 = 4;

//! Square-name conversions.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and `Position`
//! values, reused by the FEN, SAN, PGN, and long-algebraic codecs.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::Position;

/// Convert a square name (for example: "e4") to a position.
#[inline]
pub fn algebraic_to_position(square: &str) -> ChessResult<Position> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    Position::new(file - b'a', rank - b'1').ok_or_else(|| ChessErrors::InvalidAlgebraic(square.to_owned()))
}

/// Convert a position to its square name (for example: "e4").
#[inline]
pub fn position_to_algebraic(pos: Position) -> String {
    pos.to_string()
}

/// File letter `a..h` to zero-based index.
#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

/// Rank digit `1..8` to zero-based index.
#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}

#[inline]
pub fn file_to_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_position, file_from_char, position_to_algebraic, rank_from_char};

    #[test]
    fn round_trip_square_conversions() {
        let a1 = algebraic_to_position("a1").expect("a1 should parse");
        assert_eq!((a1.file(), a1.rank()), (0, 0));
        let h8 = algebraic_to_position("h8").expect("h8 should parse");
        assert_eq!(h8.index(), 63);
        assert_eq!(position_to_algebraic(h8), "h8");
        assert_eq!(position_to_algebraic(a1), "a1");
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(algebraic_to_position("i1").is_err());
        assert!(algebraic_to_position("a9").is_err());
        assert!(algebraic_to_position("e").is_err());
        assert!(algebraic_to_position("e44").is_err());
    }

    #[test]
    fn file_and_rank_chars() {
        assert_eq!(file_from_char('c'), Some(2));
        assert_eq!(file_from_char('z'), None);
        assert_eq!(rank_from_char('8'), Some(7));
        assert_eq!(rank_from_char('0'), None);
    }
}

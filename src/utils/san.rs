//! Standard Algebraic Notation for single moves.
//!
//! Both directions work against the position *before* the move: rendering
//! needs the other legal moves for disambiguation, and parsing resolves the
//! token against them.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{file_from_char, file_to_char, rank_from_char};

/// Render a legal move of the side to move in `game_state`.
pub fn move_to_san(game_state: &GameState, mv: &Move) -> String {
    let mut out = match mv.move_type.castle_side() {
        Some(CastleSide::Kingside) => "O-O".to_owned(),
        Some(CastleSide::Queenside) => "O-O-O".to_owned(),
        None => body(game_state, mv),
    };

    let mut after = game_state.clone();
    let played = after.apply_legal_move(*mv);
    if played.is_checkmate {
        out.push('#');
    } else if played.is_check {
        out.push('+');
    }
    out
}

fn body(game_state: &GameState, mv: &Move) -> String {
    let mut out = String::with_capacity(8);

    if mv.piece.kind == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_to_char(mv.from.file()));
        }
    } else {
        out.push(mv.piece.kind.fen_char().to_ascii_uppercase());

        let rivals: Vec<Position> = game_state
            .get_all_current_legal_moves()
            .into_iter()
            .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
            .map(|other| other.from)
            .collect();
        if !rivals.is_empty() {
            let file_unique = rivals.iter().all(|from| from.file() != mv.from.file());
            let rank_unique = rivals.iter().all(|from| from.rank() != mv.from.rank());
            if file_unique {
                out.push(file_to_char(mv.from.file()));
            } else if rank_unique {
                out.push(rank_char(mv.from.rank()));
            } else {
                out.push_str(&mv.from.to_string());
            }
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&mv.to.to_string());

    if let Some(promo) = mv.promotion {
        out.push('=');
        out.push(promo.fen_char().to_ascii_uppercase());
    }
    out
}

#[inline]
fn rank_char(rank: u8) -> char {
    char::from(b'1' + rank)
}

/// Resolve a SAN token against the legal moves of the side to move.
/// Check, mate, and annotation suffixes are ignored; `0-0` is accepted for
/// castling and the `=` before a promotion piece is optional.
pub fn san_to_move(game_state: &GameState, token: &str) -> ChessResult<Move> {
    let cleaned = token
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    let legal = game_state.get_all_current_legal_moves();

    let castle = match cleaned {
        "O-O" | "0-0" => Some(CastleSide::Kingside),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castle {
        return legal
            .into_iter()
            .find(|mv| mv.move_type.castle_side() == Some(side))
            .ok_or_else(|| ChessErrors::IllegalMove(token.to_owned()));
    }

    let pattern = SanPattern::parse(cleaned).ok_or_else(|| ChessErrors::IllegalMove(token.to_owned()))?;
    let mut candidates = legal.into_iter().filter(|mv| pattern.accepts(mv));
    match (candidates.next(), candidates.next()) {
        (Some(mv), None) => Ok(mv),
        (Some(_), Some(_)) => Err(ChessErrors::IllegalMove(format!("{token} is ambiguous"))),
        (None, _) => Err(ChessErrors::IllegalMove(token.to_owned())),
    }
}

/// The constraints a non-castling SAN token places on a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SanPattern {
    kind: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Position,
    promotion: Option<PieceKind>,
}

impl SanPattern {
    fn parse(text: &str) -> Option<Self> {
        let mut chars: Vec<char> = text.chars().filter(|&c| c != 'x' && c != '-').collect();

        let kind = match chars.first() {
            Some(&c) if c.is_ascii_uppercase() => {
                chars.remove(0);
                PieceKind::from_char(c).filter(|&kind| kind != PieceKind::Pawn)?
            }
            _ => PieceKind::Pawn,
        };

        let mut promotion = None;
        if chars.last().is_some_and(|c| c.is_ascii_uppercase()) {
            let promo = chars.pop().and_then(PieceKind::from_char)?;
            if !PieceKind::PROMOTIONS.contains(&promo) {
                return None;
            }
            promotion = Some(promo);
            if chars.last() == Some(&'=') {
                chars.pop();
            }
        }

        if chars.len() < 2 {
            return None;
        }
        let split = chars.len() - 2;
        let to = Position::new(file_from_char(chars[split])?, rank_from_char(chars[split + 1])?)?;

        let mut from_file = None;
        let mut from_rank = None;
        for &c in &chars[..split] {
            if let Some(file) = file_from_char(c).filter(|_| from_file.is_none()) {
                from_file = Some(file);
            } else if let Some(rank) = rank_from_char(c).filter(|_| from_rank.is_none()) {
                from_rank = Some(rank);
            } else {
                return None;
            }
        }

        Some(Self {
            kind,
            from_file,
            from_rank,
            to,
            promotion,
        })
    }

    fn accepts(&self, mv: &Move) -> bool {
        mv.piece.kind == self.kind
            && mv.move_type.castle_side().is_none()
            && mv.to == self.to
            && mv.promotion == self.promotion
            && self.from_file.map_or(true, |file| mv.from.file() == file)
            && self.from_rank.map_or(true, |rank| mv.from.rank() == rank)
    }
}

#[cfg(test)]
mod tests {
    use super::{move_to_san, san_to_move};
    use crate::game_state::chess_types::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn san_of(game: &GameState, lan: &str) -> String {
        let mv = long_algebraic_to_move(lan, game).expect("move should resolve");
        move_to_san(game, &mv)
    }

    #[test]
    fn renders_basic_moves() {
        let start = GameState::new_game();
        assert_eq!(san_of(&start, "e2e4"), "e4");
        assert_eq!(san_of(&start, "g1f3"), "Nf3");

        let castling = game("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert_eq!(san_of(&castling, "e1g1"), "O-O");
        assert_eq!(san_of(&castling, "e1c1"), "O-O-O");

        let en_passant = game("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
        assert_eq!(san_of(&en_passant, "e5d6"), "exd6");
    }

    #[test]
    fn renders_promotion_check_and_mate() {
        let promo = game("8/4P3/8/8/8/8/k6P/4K3 w - - 0 1");
        assert_eq!(san_of(&promo, "e7e8q"), "e8=Q");
        assert_eq!(san_of(&promo, "e7e8r"), "e8=R");

        let mate = game("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        assert_eq!(san_of(&mate, "h1h8"), "Rh8#");
        assert_eq!(san_of(&mate, "h1a1"), "Ra1+");
    }

    #[test]
    fn disambiguates_by_file_then_rank_then_square() {
        // Knights on b1 and f1 both reach d2.
        let by_file = game("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(san_of(&by_file, "b1d2"), "Nbd2");

        // Rooks on a1 and a5 share the a-file.
        let by_rank = game("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(san_of(&by_rank, "a1a3"), "R1a3");

        // Queens on e1, h1, and h4 all reach e4. The h1 queen shares a file
        // with h4 and a rank with e1.
        let by_square = game("8/8/k7/8/7Q/8/8/K3Q2Q w - - 0 1");
        assert_eq!(san_of(&by_square, "h1e4"), "Qh1e4");
    }

    #[test]
    fn parses_tokens_back_to_moves() {
        let start = GameState::new_game();
        let mv = san_to_move(&start, "Nf3").expect("Nf3 should resolve");
        assert_eq!(mv.to_long_algebraic(), "g1f3");
        let mv = san_to_move(&start, "e4!?").expect("e4 should resolve");
        assert_eq!(mv.to_long_algebraic(), "e2e4");

        let castling = game("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        assert_eq!(
            san_to_move(&castling, "0-0-0").expect("castle").move_type,
            MoveType::CastleQueenside
        );

        let promo = game("8/4P3/8/8/8/8/k6P/4K3 w - - 0 1");
        assert_eq!(san_to_move(&promo, "e8=N").expect("promo").promotion, Some(PieceKind::Knight));
        assert_eq!(san_to_move(&promo, "e8Q").expect("promo").promotion, Some(PieceKind::Queen));

        let by_file = game("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(san_to_move(&by_file, "Nfd2").expect("Nfd2").from.to_string(), "f1");
    }

    #[test]
    fn rejects_ambiguous_and_impossible_tokens() {
        let by_file = game("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert!(san_to_move(&by_file, "Nd2").is_err());
        assert!(san_to_move(&by_file, "Qd2").is_err());
        assert!(san_to_move(&by_file, "e9").is_err());
        assert!(san_to_move(&by_file, "O-O").is_err());
        assert!(san_to_move(&by_file, "hello").is_err());
    }
}

//! Core value types shared by the board, move generation, and search.
//!
//! Everything here is a small `Copy` value. Boards and game states are built
//! from these, and `Move` is the sole interchange record handed to callers.

use std::fmt;

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank (zero-indexed) the pawns of this color start on.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank (zero-indexed) on which pawns of this color promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank step a pawn of this color advances by.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Home rank of the king and rooks.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece kind; color is carried separately by [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices, in the order they are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    /// Lowercase FEN letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a FEN/SAN piece letter, ignoring case.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

/// A colored piece. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter, uppercase for white.
    pub fn to_fen_char(self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_char(ch).map(|kind| Piece::new(kind, color))
    }
}

/// Board coordinate, `file` a..h and `rank` 1..8, both zero-indexed.
///
/// Only constructible with in-range values; off-board arithmetic goes through
/// [`Position::offset`], which returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// In-range constructor for compile-time constants and loops over `0..8`.
    #[inline]
    pub(crate) const fn at(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self { file, rank }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Square index `0..64`, `a1 == 0`, `h8 == 63`.
    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize) * 8 + self.file as usize
    }

    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = self.file as i8 + d_file;
        let rank = self.rank as i8 + d_rank;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Iterate all 64 squares, a1..h1, a2..h2, ..., h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Position::at(file, rank)))
    }

    /// True for dark squares (a1 is dark).
    #[inline]
    pub const fn is_dark_square(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Home file of the rook on this side.
    #[inline]
    pub const fn rook_home_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File the rook lands on.
    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
}

/// Four independent castling flags. Rights are only ever cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    #[inline]
    pub const fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    #[inline]
    pub fn clear(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside = false,
            (Color::White, CastleSide::Queenside) => self.white_queenside = false,
            (Color::Black, CastleSide::Kingside) => self.black_kingside = false,
            (Color::Black, CastleSide::Queenside) => self.black_queenside = false,
        }
    }

    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::Kingside);
        self.clear(color, CastleSide::Queenside);
    }

    /// Four-bit mask (`K=1, Q=2, k=4, q=8`) for hashing.
    #[inline]
    pub const fn bits(&self) -> usize {
        (self.white_kingside as usize)
            | (self.white_queenside as usize) << 1
            | (self.black_kingside as usize) << 2
            | (self.black_queenside as usize) << 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    Capture,
    EnPassant,
    CastleKingside,
    CastleQueenside,
    Promotion,
}

impl MoveType {
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveType::CastleKingside => Some(CastleSide::Kingside),
            MoveType::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// A move record.
///
/// `is_check` / `is_checkmate` stay `false` on generated candidates and are
/// only filled in once the move has been applied to a real game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub move_type: MoveType,
    pub is_check: bool,
    pub is_checkmate: bool,
}

impl Move {
    pub(crate) const fn new(from: Position, to: Position, piece: Piece, move_type: MoveType) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            move_type,
            is_check: false,
            is_checkmate: false,
        }
    }

    /// Equality as used by `make_move`: squares, move type, and promotion.
    #[inline]
    pub fn matches(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.move_type == other.move_type
            && self.promotion == other.promotion
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Coordinate notation, for example `e2e4` or `e7e8q`.
    pub fn to_long_algebraic(&self) -> String {
        let mut out = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            out.push(promo.fen_char());
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    FiftyMove,
    ThreefoldRepetition,
    InsufficientMaterial,
    Agreement,
}

/// Game lifecycle. Every state other than `Waiting` and `InProgress` is
/// absorbing until the game is reset or reloaded from FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Waiting,
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    Resignation { winner: Color },
    Timeout { winner: Color },
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Waiting | GameStatus::InProgress)
    }

    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner }
            | GameStatus::Resignation { winner }
            | GameStatus::Timeout { winner } => Some(winner),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(self, GameStatus::Stalemate | GameStatus::Draw(_))
    }

    /// PGN result token.
    pub const fn result_str(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None if self.is_draw() => "1/2-1/2",
            None => "*",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_offset_rejects_off_board() {
        let a1 = Position::new(0, 0).expect("a1");
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(7, 7), Position::new(7, 7));
        assert_eq!(Position::new(8, 0), None);
    }

    #[test]
    fn position_display_uses_algebraic_names() {
        assert_eq!(Position::new(4, 3).expect("e4").to_string(), "e4");
        assert_eq!(Position::new(7, 7).expect("h8").to_string(), "h8");
    }

    #[test]
    fn square_colors_alternate() {
        assert!(Position::new(0, 0).expect("a1").is_dark_square());
        assert!(!Position::new(1, 0).expect("b1").is_dark_square());
        assert!(Position::new(7, 7).expect("h8").is_dark_square());
    }

    #[test]
    fn castling_rights_bits_are_distinct() {
        assert_eq!(CastlingRights::NONE.bits(), 0);
        assert_eq!(CastlingRights::ALL.bits(), 15);
        let mut rights = CastlingRights::ALL;
        rights.clear(Color::Black, CastleSide::Queenside);
        assert_eq!(rights.bits(), 7);
        rights.clear_color(Color::White);
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn result_tokens_follow_status() {
        assert_eq!(GameStatus::Checkmate { winner: Color::White }.result_str(), "1-0");
        assert_eq!(GameStatus::Timeout { winner: Color::Black }.result_str(), "0-1");
        assert_eq!(GameStatus::Stalemate.result_str(), "1/2-1/2");
        assert_eq!(GameStatus::Draw(DrawReason::FiftyMove).result_str(), "1/2-1/2");
        assert_eq!(GameStatus::InProgress.result_str(), "*");
    }
}

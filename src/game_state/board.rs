//! 8x8 mailbox board.
//!
//! The board only knows where pieces stand. Turn, castling rights, and clocks
//! live on `GameState`; move rules live in `move_generation`.

use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};
use crate::utils::fen_generator::generate_board_field;
use crate::utils::fen_parser::parse_board_field;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // [rank][file]
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial setup.
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                let file = file as u8;
                board.set_piece(Position::at(file, color.back_rank()), Some(Piece::new(kind, color)));
                board.set_piece(
                    Position::at(file, color.pawn_start_rank()),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        board
    }

    #[inline]
    pub fn is_valid_position(file: i8, rank: i8) -> bool {
        (0..8).contains(&file) && (0..8).contains(&rank)
    }

    #[inline]
    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.rank() as usize][pos.file() as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.rank() as usize][pos.file() as usize] = piece;
    }

    /// Move whatever stands on `from` to `to`, returning what was on `to`.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let moving = self.get_piece(from);
        let captured = self.get_piece(to);
        self.set_piece(to, moving);
        self.set_piece(from, None);
        captured
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get_piece(pos).is_none()
    }

    /// True when `pos` holds a piece of the opponent of `color`.
    #[inline]
    pub fn is_enemy(&self, pos: Position, color: Color) -> bool {
        matches!(self.get_piece(pos), Some(p) if p.color != color)
    }

    #[inline]
    pub fn is_friendly(&self, pos: Position, color: Color) -> bool {
        matches!(self.get_piece(pos), Some(p) if p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        Position::all().find(|&pos| {
            self.get_piece(pos) == Some(Piece::new(PieceKind::King, color))
        })
    }

    pub fn get_pieces_by_color(&self, color: Color) -> Vec<(Piece, Position)> {
        self.pieces()
            .filter(|(piece, _)| piece.color == color)
            .collect()
    }

    /// All occupied squares, a1..h8 order.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Position)> + '_ {
        Position::all().filter_map(move |pos| self.get_piece(pos).map(|piece| (piece, pos)))
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces()
            .filter(|(piece, _)| *piece == Piece::new(kind, color))
            .count()
    }

    /// FEN board field (ranks 8 to 1, `/`-separated).
    pub fn to_fen(&self) -> String {
        generate_board_field(self)
    }

    pub fn from_fen(board_field: &str) -> ChessResult<Self> {
        parse_board_field(board_field)
    }
}

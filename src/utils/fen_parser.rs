//! FEN parser.
//!
//! Splits a Forsyth-Edwards Notation string into its fields. The board field
//! becomes a `Board`; the remaining fields become plain values that
//! `GameState` adopts. Fewer than four fields is a hard error; missing move
//! counters default to `0` and `1`.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Board, CastlingRights, Color, Piece, Position};
use crate::utils::algebraic::algebraic_to_position;

/// All six FEN fields, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Position>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

pub fn parse_fen(fen: &str) -> ChessResult<ParsedFen> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(ChessErrors::InvalidFen(format!(
            "expected at least 4 fields, found {}: {fen}",
            parts.len()
        )));
    }
    if parts.len() > 6 {
        return Err(ChessErrors::InvalidFen(format!("FEN has extra trailing fields: {fen}")));
    }

    let board = parse_board_field(parts[0])?;
    let side_to_move = parse_side_to_move(parts[1])?;
    let castling_rights = parse_castling_rights(parts[2])?;
    let en_passant_target = parse_en_passant_target(parts[3])?;
    let halfmove_clock = match parts.get(4) {
        Some(field) => field
            .parse::<u16>()
            .map_err(|_| ChessErrors::InvalidFen(format!("invalid halfmove clock: {field}")))?,
        None => 0,
    };
    let fullmove_number = match parts.get(5) {
        Some(field) => field
            .parse::<u16>()
            .map_err(|_| ChessErrors::InvalidFen(format!("invalid fullmove number: {field}")))?,
        None => 1,
    };

    Ok(ParsedFen {
        board,
        side_to_move,
        castling_rights,
        en_passant_target,
        halfmove_clock,
        fullmove_number,
    })
}

/// Parse only the board field. Each rank must account for exactly eight
/// cells, counting digit runs as empty squares.
pub fn parse_board_field(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenBoard(format!(
            "board layout must contain 8 ranks: {board_part}"
        )));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenBoard(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(ChessErrors::InvalidFenBoard(format!(
                        "rank '{rank_str}' has more than 8 files"
                    )));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessErrors::InvalidFenBoard(format!("invalid piece character '{ch}'"))
            })?;
            let pos = Position::new(file, board_rank).ok_or_else(|| {
                ChessErrors::InvalidFenBoard(format!("rank '{rank_str}' has more than 8 files"))
            })?;
            board.set_piece(pos, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(ChessErrors::InvalidFenBoard(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidFen(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => {
                return Err(ChessErrors::InvalidFen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_target(en_passant_part: &str) -> ChessResult<Option<Position>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_position(en_passant_part)
        .map(Some)
        .map_err(|_| ChessErrors::InvalidFen(format!("invalid en-passant square: {en_passant_part}")))
}

/// The repetition key of a FEN: board, turn, castling, and en-passant fields,
/// without the two move counters.
pub fn fen_position_prefix(fen: &str) -> &str {
    let fen = fen.trim();
    let mut spaces = 0;
    for (idx, ch) in fen.char_indices() {
        if ch == ' ' {
            spaces += 1;
            if spaces == 4 {
                return &fen[..idx];
            }
        }
    }
    fen
}

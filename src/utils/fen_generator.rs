use crate::game_state::chess_types::{Board, CastlingRights, Color, Position};
use crate::game_state::game_state::GameState;

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.current_turn() {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state.board()),
        side_to_move,
        generate_castling_field(game_state.castling_rights()),
        generate_en_passant_field(game_state.en_passant_target()),
        game_state.half_move_clock(),
        game_state.full_move_number()
    )
}

pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match board.get_piece(Position::at(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if rights.white_kingside {
        out.push('K');
    }
    if rights.white_queenside {
        out.push('Q');
    }
    if rights.black_kingside {
        out.push('k');
    }
    if rights.black_queenside {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Position>) -> String {
    square.map_or_else(|| "-".to_owned(), |sq| sq.to_string())
}

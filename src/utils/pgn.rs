//! PGN read/write utilities for game history interchange.
//!
//! Export writes the Seven Tag Roster (plus `SetUp`/`FEN` for games that did
//! not start from the standard position) and SAN movetext replayed from the
//! initial position. Import is best-effort: headers must be well-formed, but
//! move tokens that do not resolve to a legal move are logged and skipped.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::san::{move_to_san, san_to_move};

/// A parsed PGN document.
#[derive(Debug, Clone)]
pub struct PgnGame {
    /// Tag pairs in document order.
    pub headers: Vec<(String, String)>,
    pub game: GameState,
    pub result: String,
    /// Movetext tokens that could not be played.
    pub skipped: Vec<String>,
}

impl PgnGame {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub fn export_pgn(game_state: &GameState) -> String {
    let result = game_state.result_string();
    let date = chrono::Local::now().format("%Y.%m.%d").to_string();

    let mut headers: Vec<(&str, String)> = vec![
        ("Event", "Casual Game".to_owned()),
        ("Site", "Local".to_owned()),
        ("Date", date),
        ("Round", "-".to_owned()),
        ("White", "White".to_owned()),
        ("Black", "Black".to_owned()),
        ("Result", result.to_owned()),
    ];
    if game_state.initial_fen() != STARTING_POSITION_FEN {
        headers.push(("SetUp", "1".to_owned()));
        headers.push(("FEN", game_state.initial_fen().to_owned()));
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = movetext(game_state);
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');
    out
}

/// SAN tokens with move numbers, replaying the history on one board.
fn movetext(game_state: &GameState) -> Vec<String> {
    let history = game_state.move_history();
    let mut parts = Vec::with_capacity(history.len() + history.len() / 2 + 1);

    let mut replay = match GameState::from_fen(game_state.initial_fen()) {
        Ok(replay) => replay,
        Err(err) => {
            log::warn!("cannot replay history for PGN export: {err}");
            return parts;
        }
    };

    for (ply, mv) in history.iter().enumerate() {
        let number = replay.full_move_number();
        match replay.current_turn() {
            Color::White => parts.push(format!("{number}.")),
            Color::Black if ply == 0 => parts.push(format!("{number}...")),
            Color::Black => {}
        }
        parts.push(move_to_san(&replay, mv));
        replay.apply_legal_move(*mv);
    }
    parts
}

/// Parse `pgn` into a game. Equivalent to `read_pgn(pgn)?.game`.
pub fn import_pgn(pgn: &str) -> ChessResult<GameState> {
    read_pgn(pgn).map(|parsed| parsed.game)
}

pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = Vec::<(String, String)>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            headers.push(parse_header_line(trimmed)?);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let header = |key: &str| {
        headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    let fen = header("FEN");
    let mut game = match (header("SetUp"), fen) {
        (_, Some(fen)) => GameState::from_fen(fen)?,
        (Some("1"), None) => {
            return Err(ChessErrors::InvalidPgnHeader(
                "SetUp is 1 but the FEN tag is missing".to_owned(),
            ))
        }
        _ => GameState::new_game(),
    };

    let mut result = "*".to_owned();
    let mut skipped = Vec::new();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join("\n"));
    for token in movetext.split_whitespace() {
        let token = strip_move_number(token);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }

        if is_result_token(token) {
            result = token.to_owned();
            break;
        }

        match san_to_move(&game, token) {
            Ok(mv) if !game.is_game_over() => {
                game.apply_legal_move(mv);
            }
            Ok(_) => {
                log::warn!("skipping PGN move {token}: game already over");
                skipped.push(token.to_owned());
            }
            Err(err) => {
                log::warn!("skipping PGN move {token}: {err}");
                skipped.push(token.to_owned());
            }
        }
    }

    if let Some(header_result) = header("Result").filter(|r| is_result_token(r)) {
        result = header_result.to_owned();
    }
    apply_declared_result(&mut game, &result);

    Ok(PgnGame {
        headers,
        game,
        result,
        skipped,
    })
}

/// A decisive or drawn result on a game the moves left in progress came
/// from resignation or agreement.
fn apply_declared_result(game: &mut GameState, result: &str) {
    if game.status() != GameStatus::InProgress {
        return;
    }
    match result {
        "1-0" => {
            game.resign(Color::Black);
        }
        "0-1" => {
            game.resign(Color::White);
        }
        "1/2-1/2" => {
            game.agree_draw();
        }
        _ => {}
    }
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessErrors::InvalidPgnHeader(line.to_owned());

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.trim().split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    if key.is_empty() {
        return Err(invalid());
    }
    Ok((key.to_owned(), value.replace("\\\"", "\"")))
}

/// Drop `{...}` comments, `;` rest-of-line comments, and `(...)` variations.
fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut line_comment = false;

    for ch in text.chars() {
        if line_comment {
            if ch == '\n' {
                line_comment = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth = paren_depth.saturating_add(1),
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            ';' if brace_depth == 0 => line_comment = true,
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...`, and `12.e4` all lose their number prefix.
fn strip_move_number(token: &str) -> &str {
    let digits = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() < token.len() && digits.starts_with('.') {
        digits.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn play(game: &mut GameState, moves: &[&str]) {
        for lan in moves {
            let mv = long_algebraic_to_move(lan, game).expect("move should resolve");
            assert!(game.make_move(&mv), "{lan} should apply");
        }
    }

    #[test]
    fn export_writes_roster_and_numbered_san() {
        let mut game = GameState::new_game();
        play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);

        let pgn = export_pgn(&game);
        let lines: Vec<&str> = pgn.lines().collect();
        assert_eq!(lines[0], "[Event \"Casual Game\"]");
        assert!(lines[2].starts_with("[Date \""));
        assert_eq!(lines[6], "[Result \"*\"]");
        assert!(!pgn.contains("[SetUp"));
        assert_eq!(lines[8], "1. e4 e5 2. Nf3 Nc6 3. Bb5 *");
    }

    #[test]
    fn export_marks_mate_and_result() {
        let mut game = GameState::new_game();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.is_checkmate());

        let pgn = export_pgn(&game);
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.trim_end().ends_with("1. f3 e5 2. g4 Qh4# 0-1"));
    }

    #[test]
    fn custom_start_writes_setup_and_black_move_number() {
        let fen = "4k3/8/8/8/8/8/4p3/K7 b - - 0 40";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        play(&mut game, &["e2e1q", "a1a2"]);

        let pgn = export_pgn(&game);
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
        assert!(pgn.contains("40... e1=Q+ 41. Ka2 *"));
    }

    #[test]
    fn round_trip_restores_the_game() {
        let mut game = GameState::new_game();
        play(
            &mut game,
            &["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6", "d8a5", "c6b7", "a5b5", "b7a8q"],
        );

        let restored = import_pgn(&export_pgn(&game)).expect("PGN should parse");
        assert_eq!(restored.to_fen(), game.to_fen());
        assert_eq!(restored.move_history(), game.move_history());
        assert_eq!(restored.status(), GameStatus::InProgress);
    }

    #[test]
    fn round_trip_from_custom_fen() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN");
        play(&mut game, &["e1c1", "e8g8"]);

        let parsed = read_pgn(&export_pgn(&game)).expect("PGN should parse");
        assert_eq!(parsed.header("SetUp"), Some("1"));
        assert_eq!(parsed.game.initial_fen(), game.initial_fen());
        assert_eq!(parsed.game.to_fen(), game.to_fen());
    }

    #[test]
    fn import_strips_comments_variations_and_nags() {
        let pgn = r#"[Event "Annotated"]
[Result "*"]

1. e4 {best by test} e5 (1... c5 2. Nf3) 2. Nf3 $1 ; the king's knight
Nc6 3.Bb5 a6!? *"#;
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert!(parsed.skipped.is_empty(), "{:?}", parsed.skipped);
        assert_eq!(parsed.game.move_history().len(), 6);
        assert_eq!(
            parsed.game.to_fen(),
            "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4"
        );
        assert_eq!(parsed.header("Event"), Some("Annotated"));
    }

    #[test]
    fn bad_tokens_are_skipped() {
        let parsed = read_pgn("1. e4 Ke7?? 2. Qz9 e5 *").expect("PGN should parse");
        assert_eq!(parsed.skipped, vec!["Ke7??".to_owned(), "Qz9".to_owned()]);
        // Without the bad tokens, e5 lands as Black's reply.
        assert_eq!(parsed.game.move_history().len(), 2);
    }

    #[test]
    fn declared_result_ends_an_unfinished_game() {
        let game = import_pgn("[Result \"1-0\"]\n\n1. e4 e5 1-0").expect("PGN should parse");
        assert_eq!(game.status(), GameStatus::Resignation { winner: Color::White });

        let game = import_pgn("1. d4 d5 1/2-1/2").expect("PGN should parse");
        assert!(game.is_draw());
    }

    #[test]
    fn malformed_headers_are_errors() {
        assert!(matches!(read_pgn("[Event Casual]\n1. e4 *"), Err(ChessErrors::InvalidPgnHeader(_))));
        assert!(matches!(read_pgn("[SetUp \"1\"]\n1. e4 *"), Err(ChessErrors::InvalidPgnHeader(_))));
        assert!(matches!(
            read_pgn("[FEN \"not a fen\"]\n1. e4 *"),
            Err(ChessErrors::InvalidFen(_) | ChessErrors::InvalidFenBoard(_))
        ));
    }
}

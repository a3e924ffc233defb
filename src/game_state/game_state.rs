//! The game object.
//!
//! `GameState` owns one `Board` plus turn, castling rights, en-passant
//! target, clocks, move/position history, and the derived status. It is
//! mutated only through `make_move` / `undo_move` (and the administrative
//! transitions), and is cheap enough to clone that search explores branches
//! on clones.

use std::fmt;

use crate::errors::ChessResult;
use crate::game_state::chess_rules::{
    FIFTY_MOVE_HALF_MOVES, REPETITION_COUNT, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move_to_board, revert_move_on_board};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    has_any_legal_move, legal_moves_for_color, legal_moves_from,
};
use crate::move_generation::legal_move_shared::RuleContext;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{fen_position_prefix, parse_fen};
use crate::utils::pgn::{export_pgn, import_pgn};
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_turn: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Position>,
    half_move_clock: u16,
    full_move_number: u16,

    move_history: Vec<Move>,
    // One FEN per position reached, starting with the initial one.
    position_history: Vec<String>,

    status: GameStatus,
    initial_fen: String,
}

/// A fresh game in the standard position, waiting for `start()`.
impl Default for GameState {
    fn default() -> Self {
        let mut game = Self {
            board: Board::starting_position(),
            current_turn: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
            half_move_clock: 0,
            full_move_number: 1,
            move_history: Vec::new(),
            position_history: Vec::new(),
            status: GameStatus::Waiting,
            initial_fen: STARTING_POSITION_FEN.to_owned(),
        };
        game.position_history.push(game.to_fen());
        game
    }
}

impl GameState {
    /// Standard starting position, already in progress.
    pub fn new_game() -> Self {
        let mut game = Self::default();
        game.status = GameStatus::InProgress;
        game
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let parsed = parse_fen(fen)?;
        let mut game = Self {
            board: parsed.board,
            current_turn: parsed.side_to_move,
            castling_rights: parsed.castling_rights,
            en_passant_target: parsed.en_passant_target,
            half_move_clock: parsed.halfmove_clock,
            full_move_number: parsed.fullmove_number,
            move_history: Vec::new(),
            position_history: Vec::new(),
            status: GameStatus::InProgress,
            initial_fen: String::new(),
        };

        let normalized = game.to_fen();
        game.initial_fen = normalized.clone();
        game.position_history.push(normalized);

        let has_moves = has_any_legal_move(&game.board, game.current_turn, &game.rule_context());
        game.status = game.derive_status(has_moves);
        Ok(game)
    }

    /// Replace this game with the position in `fen`. On error the game is
    /// left untouched.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        *self = Self::from_fen(fen)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn to_pgn(&self) -> String {
        export_pgn(self)
    }

    /// Replace this game with the one described by `pgn`. Unresolvable move
    /// tokens are skipped.
    pub fn load_pgn(&mut self, pgn: &str) -> ChessResult<()> {
        *self = import_pgn(pgn)?;
        Ok(())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    #[inline]
    pub fn half_move_clock(&self) -> u16 {
        self.half_move_clock
    }

    #[inline]
    pub fn full_move_number(&self) -> u16 {
        self.full_move_number
    }

    #[inline]
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    #[inline]
    pub fn position_history(&self) -> &[String] {
        &self.position_history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// FEN the game started from.
    #[inline]
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    #[inline]
    pub fn rule_context(&self) -> RuleContext {
        RuleContext {
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
        }
    }

    // --- Move queries ---

    /// Legal moves of the piece on `from`, whichever color it is.
    pub fn get_legal_moves(&self, from: Position) -> Vec<Move> {
        legal_moves_from(&self.board, from, &self.rule_context())
    }

    pub fn get_all_legal_moves(&self, color: Color) -> Vec<Move> {
        legal_moves_for_color(&self.board, color, &self.rule_context())
    }

    pub fn get_all_current_legal_moves(&self) -> Vec<Move> {
        self.get_all_legal_moves(self.current_turn)
    }

    // --- Transitions ---

    /// Waiting -> InProgress.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Waiting {
            return false;
        }
        self.status = GameStatus::InProgress;
        true
    }

    /// Play `mv` if it matches a legal move of the side to move. Returns
    /// `false` and leaves the game untouched otherwise.
    pub fn make_move(&mut self, mv: &Move) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        if mv.piece.color != self.current_turn || !self.board.is_friendly(mv.from, self.current_turn) {
            return false;
        }

        let Some(legal) = self
            .get_legal_moves(mv.from)
            .into_iter()
            .find(|candidate| candidate.matches(mv))
        else {
            return false;
        };

        self.apply_legal_move(legal);
        true
    }

    /// Apply a move already known to be legal and return it with
    /// `is_check` / `is_checkmate` filled in.
    pub(crate) fn apply_legal_move(&mut self, mut mv: Move) -> Move {
        let mover = mv.piece.color;
        let opponent = mover.opposite();

        apply_move_to_board(&mut self.board, &mv);
        self.update_castling_rights(&mv);

        self.en_passant_target = if mv.piece.kind == PieceKind::Pawn
            && mv.from.rank().abs_diff(mv.to.rank()) == 2
        {
            Position::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2)
        } else {
            None
        };

        if mv.piece.kind == PieceKind::Pawn || mv.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock = self.half_move_clock.saturating_add(1);
        }
        if mover == Color::Black {
            self.full_move_number = self.full_move_number.saturating_add(1);
        }
        self.current_turn = opponent;

        let opponent_has_moves = has_any_legal_move(&self.board, opponent, &self.rule_context());
        mv.is_check = is_king_in_check(&self.board, opponent);
        mv.is_checkmate = mv.is_check && !opponent_has_moves;

        self.move_history.push(mv);
        self.position_history.push(self.to_fen());

        let previous = self.status;
        self.status = self.derive_status(opponent_has_moves);
        if self.status.is_terminal() && !previous.is_terminal() {
            log::info!("game over after {mv}: {:?}", self.status);
        }

        mv
    }

    /// Take back the last move. Refused once the game has ended.
    pub fn undo_move(&mut self) -> Option<Move> {
        if self.status.is_terminal() {
            return None;
        }
        let mv = self.move_history.pop()?;

        revert_move_on_board(&mut self.board, &mv);
        self.current_turn = mv.piece.color;
        if mv.piece.color == Color::Black {
            self.full_move_number = self.full_move_number.saturating_sub(1);
        }
        self.position_history.pop();

        // Rights, en-passant target, and the half-move clock come back from
        // the previous snapshot.
        if let Some(Ok(previous)) = self.position_history.last().map(|fen| parse_fen(fen)) {
            self.castling_rights = previous.castling_rights;
            self.en_passant_target = previous.en_passant_target;
            self.half_move_clock = previous.halfmove_clock;
        }

        Some(mv)
    }

    pub fn resign(&mut self, color: Color) -> bool {
        self.finish(GameStatus::Resignation {
            winner: color.opposite(),
        })
    }

    /// `color` ran out of time.
    pub fn timeout(&mut self, color: Color) -> bool {
        self.finish(GameStatus::Timeout {
            winner: color.opposite(),
        })
    }

    pub fn agree_draw(&mut self) -> bool {
        self.finish(GameStatus::Draw(DrawReason::Agreement))
    }

    fn finish(&mut self, status: GameStatus) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        log::info!("game over: {status:?}");
        self.status = status;
        true
    }

    fn update_castling_rights(&mut self, mv: &Move) {
        let mover = mv.piece.color;
        let opponent = mover.opposite();

        match mv.piece.kind {
            PieceKind::King => self.castling_rights.clear_color(mover),
            PieceKind::Rook => {
                for side in [CastleSide::Kingside, CastleSide::Queenside] {
                    if mv.from == Position::at(side.rook_home_file(), mover.back_rank()) {
                        self.castling_rights.clear(mover, side);
                    }
                }
            }
            _ => {}
        }

        if mv.is_capture() {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if mv.to == Position::at(side.rook_home_file(), opponent.back_rank()) {
                    self.castling_rights.clear(opponent, side);
                }
            }
        }
    }

    fn derive_status(&self, side_to_move_has_moves: bool) -> GameStatus {
        if !side_to_move_has_moves {
            return if is_king_in_check(&self.board, self.current_turn) {
                GameStatus::Checkmate {
                    winner: self.current_turn.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.is_fifty_move_rule() {
            return GameStatus::Draw(DrawReason::FiftyMove);
        }
        if self.is_threefold_repetition() {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if self.is_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        GameStatus::InProgress
    }

    // --- Status queries ---

    /// Side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_in_check(&self.board, self.current_turn)
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status, GameStatus::Checkmate { .. })
    }

    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    /// Stalemate or any drawn status.
    pub fn is_draw(&self) -> bool {
        self.status.is_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_fifty_move_rule(&self) -> bool {
        self.half_move_clock >= FIFTY_MOVE_HALF_MOVES
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.position_history.last() else {
            return false;
        };
        let key = fen_position_prefix(current);
        self.position_history
            .iter()
            .filter(|fen| fen_position_prefix(fen) == key)
            .count()
            >= REPETITION_COUNT
    }

    /// K v K, K+minor v K, and K+B v K+B with both bishops on the same
    /// square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Piece, Position)> = Vec::with_capacity(2);
        for (piece, pos) in self.board.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => minors.push((piece, pos)),
                _ => return false,
            }
        }

        match minors.as_slice() {
            [] | [_] => true,
            [(a, a_pos), (b, b_pos)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && a_pos.is_dark_square() == b_pos.is_dark_square()
            }
            _ => false,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }

    /// `1-0`, `0-1`, `1/2-1/2`, or `*`.
    pub fn result_string(&self) -> &'static str {
        self.status.result_str()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_game_state(self))?;
        write!(f, "{}", self.to_fen())
    }
}

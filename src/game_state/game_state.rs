//! Game state aggregate.
//!
//! `GameState` owns the board and everything that is not visible on it: side
//! to move, cached king squares, castling rights, the en passant target, the
//! clocks, the draw flag and the undo stack that doubles as the move log. It is
//! only ever changed through `make_move` / `undo_move`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{STARTING_POSITION_FEN, REPETITION_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_safe_on;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves_in_place, LegalMoveGenerator,
};
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::resolve_long_algebraic;

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,

    // --- Side and state flags ---
    pub side_to_move: Color,
    /// Indexed by `Color::index()`; always equal to the kings on `board`.
    pub king_squares: [Square; 2],
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    /// Set once a draw rule fires; cleared only by undoing past that move.
    pub draw_reason: Option<DrawReason>,

    // --- Repetition support ---
    pub zobrist_key: u64,

    // --- Make/unmake stack, also the move log ---
    pub undo_stack: Vec<UndoState>,
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Assemble a state from position facts, checking that each side has
    /// exactly one king and that the side not to move is not in check.
    pub fn from_position(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        fullmove_number: u16,
    ) -> ChessResult<Self> {
        let mut king_squares = [Square::new(0, 0); 2];
        for color in [Color::Light, Color::Dark] {
            match board.count_kings(color) {
                0 => return Err(ChessErrors::MissingKing(color)),
                1 => {}
                _ => return Err(ChessErrors::TooManyKings(color)),
            }
            king_squares[color.index()] = board
                .find_king(color)
                .ok_or(ChessErrors::MissingKing(color))?;
        }

        let waiting = side_to_move.opposite();
        if !is_king_safe_on(&board, waiting, king_squares[waiting.index()]) {
            return Err(ChessErrors::OpponentInCheck(waiting));
        }

        Ok(Self {
            board,
            side_to_move,
            king_squares,
            castling_rights,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number,
            draw_reason: None,
            zobrist_key: compute_zobrist_key(&board, side_to_move, castling_rights, None),
            undo_stack: Vec::new(),
        })
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Legal moves for the side to move, in board order.
    #[inline]
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        LegalMoveGenerator.generate_legal_moves(self)
    }

    /// Apply a move produced by `legal_moves` for this exact position.
    #[inline]
    pub fn make_move(&mut self, mv: &ChessMove) {
        apply_move(self, mv);
    }

    /// Take back the last move. Returns `None` when nothing has been played.
    #[inline]
    pub fn undo_move(&mut self) -> Option<ChessMove> {
        undo_move(self)
    }

    /// Resolve long algebraic notation ("e2e4", "e7e8n") against the legal
    /// moves of this position.
    #[inline]
    pub fn resolve_move(&self, text: &str) -> ChessResult<ChessMove> {
        resolve_long_algebraic(self, text)
    }

    #[inline]
    pub fn last_move(&self) -> Option<&ChessMove> {
        self.undo_stack.last().map(|undo| &undo.mv)
    }

    /// Moves played since construction, oldest first.
    pub fn move_log(&self) -> impl Iterator<Item = &ChessMove> + '_ {
        self.undo_stack.iter().map(|undo| &undo.mv)
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        let color = self.side_to_move;
        !is_king_safe_on(&self.board, color, self.king_square(color))
    }

    /// Occurrences of the current position, counting this one. Only positions
    /// since the last pawn move or capture can repeat.
    pub fn repetition_count(&self) -> usize {
        let window = (self.halfmove_clock as usize).min(self.undo_stack.len());
        let earlier = self.undo_stack[self.undo_stack.len() - window..]
            .iter()
            .filter(|undo| undo.prev_zobrist_key == self.zobrist_key)
            .count();
        earlier + 1
    }

    #[inline]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= REPETITION_LIMIT
    }

    /// Checkmate and stalemate take precedence over a draw flag set by the
    /// same move.
    pub fn game_status(&self) -> GameStatus {
        let mut moves = Vec::new();
        let check_info = generate_legal_moves_in_place(self, &mut moves);
        if moves.is_empty() {
            return if check_info.in_check {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        match self.draw_reason {
            Some(reason) => GameStatus::Draw(reason),
            None => GameStatus::Ongoing,
        }
    }
}

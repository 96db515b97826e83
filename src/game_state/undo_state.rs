use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Single undo record for `make_move` / `undo_move`.
///
/// Carries the applied move together with every piece of state the move
/// overwrote, so popping one record is enough to restore the position.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: ChessMove,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_draw_reason: Option<DrawReason>,
    pub prev_king_squares: [Square; 2],

    pub prev_zobrist_key: u64,
}

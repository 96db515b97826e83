//! Legal rook move generation.
//!
//! Rook rays run to the board edge or the first blocker. A pinned rook keeps
//! only the two directions along its pin line.

use crate::game_state::chess_types::{GameState, Piece, Square};
use crate::move_generation::legal_move_checks::CheckInfo;
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::rays::ROOK_DIRECTIONS;

pub fn generate_rook_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    check_info: &CheckInfo,
    out: &mut Vec<ChessMove>,
) {
    push_slider_moves(
        &game_state.board,
        from,
        piece,
        ROOK_DIRECTIONS,
        check_info.pin_direction(from),
        out,
    );
}

use crate::game_state::chess_types::{GameState, Piece, Square};
use crate::move_generation::legal_move_checks::CheckInfo;
use crate::moves::chess_move::ChessMove;
use crate::moves::knight_moves::knight_targets;

/// A pinned knight has no legal move: no jump stays on a pin line.
pub fn generate_knight_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    check_info: &CheckInfo,
    out: &mut Vec<ChessMove>,
) {
    if check_info.pin_direction(from).is_some() {
        return;
    }

    let board = &game_state.board;
    for &to in knight_targets(from) {
        if !board.is_color(to, piece.color) {
            out.push(ChessMove::new(from, to, piece, board));
        }
    }
}

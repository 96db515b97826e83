//! Legal pawn move generation.
//!
//! Pushes, double pushes from the start row, diagonal captures and en
//! passant. A promoting move is emitted once per destination with the default
//! queen choice; callers that enumerate promotions expand it themselves.

use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::{GameState, Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::{is_king_safe_on, CheckInfo};
use crate::move_generation::legal_move_shared::pin_allows;
use crate::moves::chess_move::ChessMove;
use crate::moves::pawn_moves::{pawn_capture_offsets, pawn_forward};

pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    check_info: &CheckInfo,
    out: &mut Vec<ChessMove>,
) {
    let board = &game_state.board;
    let color = piece.color;
    let pin = check_info.pin_direction(from);
    let forward = pawn_forward(color);

    if pin_allows(pin, forward) {
        if let Some(one_step) = from.offset(forward).filter(|sq| board.is_empty(*sq)) {
            out.push(ChessMove::new(from, one_step, piece, board));

            if from.row == pawn_start_row(color) {
                if let Some(two_step) = one_step.offset(forward).filter(|sq| board.is_empty(*sq)) {
                    out.push(ChessMove::new(from, two_step, piece, board));
                }
            }
        }
    }

    for capture in pawn_capture_offsets(color) {
        if !pin_allows(pin, capture) {
            continue;
        }
        let Some(to) = from.offset(capture) else {
            continue;
        };

        if board.is_color(to, color.opposite()) {
            out.push(ChessMove::new(from, to, piece, board));
        } else if game_state.en_passant_square == Some(to) {
            let mv = ChessMove::en_passant(from, to, piece, board);
            if mv.captured_piece == Some(Piece::new(color.opposite(), PieceKind::Pawn))
                && en_passant_keeps_king_safe(game_state, &mv)
            {
                out.push(mv);
            }
        }
    }
}

/// En passant empties two squares on the mover's row at once, which can open
/// a rank attack that no single-piece pin reports. Replay it on a scratch
/// board and ask the detector directly.
fn en_passant_keeps_king_safe(game_state: &GameState, mv: &ChessMove) -> bool {
    let color = mv.moving_piece.color;
    let mut scratch = game_state.board;
    scratch.take(mv.from);
    scratch.take(mv.en_passant_capture_square());
    scratch.place(mv.to, mv.moving_piece);
    is_king_safe_on(&scratch, color, game_state.king_square(color))
}

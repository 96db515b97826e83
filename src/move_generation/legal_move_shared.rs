use std::ops::Range;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Offset, Piece, Square};
use crate::moves::chess_move::ChessMove;
use crate::moves::rays::{ray_length, ray_square, DIRECTIONS};

/// True when a piece pinned along `pin` may step along `step`.
#[inline]
pub fn pin_allows(pin: Option<Offset>, step: Offset) -> bool {
    pin.map_or(true, |direction| direction.is_colinear_with(step))
}

/// Walk the given ray directions from `from`, stopping on the first occupied
/// square and including it when it holds an enemy piece. Directions that
/// leave a pin line are skipped entirely.
pub fn push_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: Range<usize>,
    pin: Option<Offset>,
    out: &mut Vec<ChessMove>,
) {
    for dir in directions {
        if !pin_allows(pin, DIRECTIONS[dir]) {
            continue;
        }

        for distance in 1..=ray_length(from, dir) {
            let to = ray_square(from, dir, distance);
            match board.piece_at(to) {
                None => out.push(ChessMove::new(from, to, piece, board)),
                Some(target) => {
                    if target.color != piece.color {
                        out.push(ChessMove::new(from, to, piece, board));
                    }
                    break;
                }
            }
        }
    }
}

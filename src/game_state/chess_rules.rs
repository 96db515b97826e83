//! Canonical chess-rule constants.
//!
//! Starting position, draw thresholds and the fixed geometry of castling.

use crate::game_state::chess_types::{CastleSide, Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value that forces a draw.
pub const FIFTY_MOVE_LIMIT: u16 = 50;

/// Occurrences of one position that force a draw.
pub const REPETITION_LIMIT: usize = 3;

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub between: &'static [Square],
    /// Squares the king crosses or lands on; none may be attacked.
    pub king_path: &'static [Square],
}

const LIGHT_KINGSIDE: CastlingGeometry = CastlingGeometry {
    king_from: Square::new(7, 4),
    king_to: Square::new(7, 6),
    rook_from: Square::new(7, 7),
    rook_to: Square::new(7, 5),
    between: &[Square::new(7, 5), Square::new(7, 6)],
    king_path: &[Square::new(7, 5), Square::new(7, 6)],
};

const LIGHT_QUEENSIDE: CastlingGeometry = CastlingGeometry {
    king_from: Square::new(7, 4),
    king_to: Square::new(7, 2),
    rook_from: Square::new(7, 0),
    rook_to: Square::new(7, 3),
    between: &[Square::new(7, 1), Square::new(7, 2), Square::new(7, 3)],
    king_path: &[Square::new(7, 3), Square::new(7, 2)],
};

const DARK_KINGSIDE: CastlingGeometry = CastlingGeometry {
    king_from: Square::new(0, 4),
    king_to: Square::new(0, 6),
    rook_from: Square::new(0, 7),
    rook_to: Square::new(0, 5),
    between: &[Square::new(0, 5), Square::new(0, 6)],
    king_path: &[Square::new(0, 5), Square::new(0, 6)],
};

const DARK_QUEENSIDE: CastlingGeometry = CastlingGeometry {
    king_from: Square::new(0, 4),
    king_to: Square::new(0, 2),
    rook_from: Square::new(0, 0),
    rook_to: Square::new(0, 3),
    between: &[Square::new(0, 1), Square::new(0, 2), Square::new(0, 3)],
    king_path: &[Square::new(0, 3), Square::new(0, 2)],
};

#[inline]
pub const fn castling_geometry(color: Color, side: CastleSide) -> &'static CastlingGeometry {
    match (color, side) {
        (Color::Light, CastleSide::Kingside) => &LIGHT_KINGSIDE,
        (Color::Light, CastleSide::Queenside) => &LIGHT_QUEENSIDE,
        (Color::Dark, CastleSide::Kingside) => &DARK_KINGSIDE,
        (Color::Dark, CastleSide::Queenside) => &DARK_QUEENSIDE,
    }
}

/// Castling side whose rook starts on `square`, if any.
#[inline]
pub fn rook_home_side(square: Square) -> Option<(Color, CastleSide)> {
    match (square.row, square.col) {
        (7, 7) => Some((Color::Light, CastleSide::Kingside)),
        (7, 0) => Some((Color::Light, CastleSide::Queenside)),
        (0, 7) => Some((Color::Dark, CastleSide::Kingside)),
        (0, 0) => Some((Color::Dark, CastleSide::Queenside)),
        _ => None,
    }
}

/// Row a pawn of `color` starts on.
#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::Light => 6,
        Color::Dark => 1,
    }
}

/// Farthest row for `color`, where its pawns promote.
#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    match color {
        Color::Light => 0,
        Color::Dark => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_home_squares_match_castling_geometry() {
        for color in [Color::Light, Color::Dark] {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                let geometry = castling_geometry(color, side);
                assert_eq!(rook_home_side(geometry.rook_from), Some((color, side)));
                assert!(geometry.king_path.contains(&geometry.king_to));
            }
        }
    }
}

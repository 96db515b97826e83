use crate::game_state::chess_types::{Color, Offset};

/// One-square push direction for `color`. Light pawns move toward row 0.
#[inline]
pub const fn pawn_forward(color: Color) -> Offset {
    match color {
        Color::Light => Offset::new(-1, 0),
        Color::Dark => Offset::new(1, 0),
    }
}

/// Diagonal capture steps for `color`, queenside file first.
#[inline]
pub const fn pawn_capture_offsets(color: Color) -> [Offset; 2] {
    let forward = pawn_forward(color).d_row;
    [Offset::new(forward, -1), Offset::new(forward, 1)]
}

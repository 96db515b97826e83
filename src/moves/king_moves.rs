//! King step tables.

use crate::game_state::chess_types::Square;
use crate::moves::rays::{generate_targets, TargetList, DIRECTIONS};

pub const KING_TARGETS: [TargetList; 64] = generate_targets(&DIRECTIONS);

/// On-board neighbours of `square`.
#[inline]
pub fn king_targets(square: Square) -> &'static [Square] {
    KING_TARGETS[square.index()].as_slice()
}

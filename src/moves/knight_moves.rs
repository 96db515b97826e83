use crate::game_state::chess_types::{Offset, Square};
use crate::moves::rays::{generate_targets, TargetList};

pub const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(2, 1),
    Offset::new(1, 2),
    Offset::new(-2, 1),
    Offset::new(-1, 2),
    Offset::new(2, -1),
    Offset::new(1, -2),
    Offset::new(-2, -1),
    Offset::new(-1, -2),
];

pub const KNIGHT_TARGETS: [TargetList; 64] = generate_targets(&KNIGHT_OFFSETS);

#[inline]
pub fn knight_targets(square: Square) -> &'static [Square] {
    KNIGHT_TARGETS[square.index()].as_slice()
}

#[cfg(test)]
mod tests {
    use super::knight_targets;
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_targets_from_d4_has_eight_targets() {
        assert_eq!(knight_targets(Square::new(4, 3)).len(), 8);
    }

    #[test]
    fn knight_targets_from_corner_has_two_targets() {
        let targets = knight_targets(Square::new(7, 0));
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&Square::new(5, 1)));
        assert!(targets.contains(&Square::new(6, 2)));
    }
}

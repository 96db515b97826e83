//! Pin and check detection around a king square.
//!
//! Rays are cast in the eight queen directions from the king, and the eight
//! knight jumps are probed. The first piece met on a ray decides it:
//!
//! - own piece: becomes a pin candidate; a second own piece kills the ray;
//! - enemy attacker matching the ray: check if no candidate, else a pin;
//! - any other enemy piece: the ray is dead.
//!
//! The king square is a parameter, so legality of a hypothetical king square
//! (king steps, castling transit) is asked without touching the board. Any
//! square holding the side's own king is treated as empty during the scan,
//! otherwise a relocated king would shield itself.
//!
//! This runs once per legality query and once per king destination, which
//! makes it the hottest code in deep enumeration. It does not allocate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Offset, PieceKind, Square};
use crate::moves::knight_moves::knight_targets;
use crate::moves::pawn_moves::pawn_forward;
use crate::moves::rays::{ray_length, ray_square, DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

const MAX_PINS: usize = 8;
const MAX_CHECKS: usize = 16;

/// A friendly piece that may only move along `direction` (king outward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub pinned_square: Square,
    pub direction: Offset,
}

/// An attacker on the king. `direction` is the ray step from the king toward
/// the attacker, or the knight jump for knight checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub attacker_square: Square,
    pub direction: Offset,
}

#[derive(Debug, Clone, Copy)]
pub struct CheckInfo {
    pub in_check: bool,
    pins: [Pin; MAX_PINS],
    pin_count: u8,
    checks: [Check; MAX_CHECKS],
    check_count: u8,
}

impl CheckInfo {
    const fn new() -> Self {
        let origin = Square::new(0, 0);
        let still = Offset::new(0, 0);
        Self {
            in_check: false,
            pins: [Pin {
                pinned_square: origin,
                direction: still,
            }; MAX_PINS],
            pin_count: 0,
            checks: [Check {
                attacker_square: origin,
                direction: still,
            }; MAX_CHECKS],
            check_count: 0,
        }
    }

    #[inline]
    pub fn pins(&self) -> &[Pin] {
        &self.pins[..self.pin_count as usize]
    }

    #[inline]
    pub fn checks(&self) -> &[Check] {
        &self.checks[..self.check_count as usize]
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.check_count >= 2
    }

    /// Pin line of the piece on `square`, if it is pinned.
    #[inline]
    pub fn pin_direction(&self, square: Square) -> Option<Offset> {
        self.pins()
            .iter()
            .find(|pin| pin.pinned_square == square)
            .map(|pin| pin.direction)
    }

    #[inline]
    fn push_pin(&mut self, pin: Pin) {
        self.pins[self.pin_count as usize] = pin;
        self.pin_count += 1;
    }

    #[inline]
    fn push_check(&mut self, check: Check) {
        self.checks[self.check_count as usize] = check;
        self.check_count += 1;
        self.in_check = true;
    }
}

/// Full pin/check facts for a `color` king standing on `king_square`.
pub fn inspect_king_safety(board: &Board, color: Color, king_square: Square) -> CheckInfo {
    scan(board, color, king_square, false)
}

/// True when a `color` king on `king_square` would not be attacked.
#[inline]
pub fn is_king_safe_on(board: &Board, color: Color, king_square: Square) -> bool {
    !scan(board, color, king_square, true).in_check
}

fn scan(board: &Board, color: Color, king_square: Square, stop_at_first_check: bool) -> CheckInfo {
    let mut info = CheckInfo::new();
    let pawn_attack_row = pawn_forward(color).d_row;

    for dir in QUEEN_DIRECTIONS {
        let step = DIRECTIONS[dir];
        let orthogonal = ROOK_DIRECTIONS.contains(&dir);
        let mut pin_candidate: Option<Square> = None;

        for distance in 1..=ray_length(king_square, dir) {
            let square = ray_square(king_square, dir, distance);
            let Some(piece) = board.piece_at(square) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if pin_candidate.is_some() {
                    break;
                }
                pin_candidate = Some(square);
                continue;
            }

            let attacks_along_ray = match piece.kind {
                PieceKind::Queen => true,
                PieceKind::Rook => orthogonal,
                PieceKind::Bishop => !orthogonal,
                PieceKind::Pawn => distance == 1 && !orthogonal && step.d_row == pawn_attack_row,
                PieceKind::King => distance == 1,
                PieceKind::Knight => false,
            };

            if attacks_along_ray {
                match pin_candidate {
                    None => {
                        info.push_check(Check {
                            attacker_square: square,
                            direction: step,
                        });
                        if stop_at_first_check {
                            return info;
                        }
                    }
                    Some(pinned_square) => info.push_pin(Pin {
                        pinned_square,
                        direction: step,
                    }),
                }
            }
            break;
        }
    }

    for &square in knight_targets(king_square) {
        if let Some(piece) = board.piece_at(square) {
            if piece.color != color && piece.kind == PieceKind::Knight {
                info.push_check(Check {
                    attacker_square: square,
                    direction: Offset::new(
                        square.row as i8 - king_square.row as i8,
                        square.col as i8 - king_square.col as i8,
                    ),
                });
                if stop_at_first_check {
                    return info;
                }
            }
        }
    }

    info
}

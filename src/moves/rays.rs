//! Compile-time direction and ray tables.
//!
//! Sliding generation and the pin/check detector walk rays out of a square.
//! The tables below store, per square and direction, how many steps remain
//! before the board edge, so the hot loops never bounds-check per step.

use std::ops::Range;

use crate::game_state::chess_types::{Offset, Square};

/// Four orthogonal steps followed by four diagonal steps.
pub const DIRECTIONS: [Offset; 8] = [
    Offset::new(-1, 0),
    Offset::new(0, -1),
    Offset::new(1, 0),
    Offset::new(0, 1),
    Offset::new(-1, -1),
    Offset::new(-1, 1),
    Offset::new(1, -1),
    Offset::new(1, 1),
];

pub const ROOK_DIRECTIONS: Range<usize> = 0..4;
pub const BISHOP_DIRECTIONS: Range<usize> = 4..8;
pub const QUEEN_DIRECTIONS: Range<usize> = 0..8;

pub const RAY_LENGTHS: [[u8; 8]; 64] = generate_ray_lengths();

/// Number of squares from `square` to the edge along `DIRECTIONS[direction]`.
#[inline]
pub const fn ray_length(square: Square, direction: usize) -> u8 {
    RAY_LENGTHS[square.index()][direction]
}

/// `distance` steps along `DIRECTIONS[direction]`; caller keeps
/// `distance <= ray_length(square, direction)`.
#[inline]
pub const fn ray_square(square: Square, direction: usize, distance: u8) -> Square {
    let step = DIRECTIONS[direction];
    let row = square.row as i8 + step.d_row * distance as i8;
    let col = square.col as i8 + step.d_col * distance as i8;
    Square::new(row as u8, col as u8)
}

const fn generate_ray_lengths() -> [[u8; 8]; 64] {
    let mut table = [[0u8; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut dir = 0usize;

        while dir < 8 {
            let step = DIRECTIONS[dir];
            let mut length = 0u8;
            let mut r = row + step.d_row;
            let mut c = col + step.d_col;
            while r >= 0 && r < 8 && c >= 0 && c < 8 {
                length += 1;
                r += step.d_row;
                c += step.d_col;
            }
            table[sq][dir] = length;
            dir += 1;
        }

        sq += 1;
    }

    table
}

/// Up to eight on-board destinations reachable from one square by fixed jumps.
#[derive(Debug, Clone, Copy)]
pub struct TargetList {
    squares: [Square; 8],
    len: u8,
}

impl TargetList {
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }
}

/// Precompute jump targets for every square from a set of eight offsets.
pub const fn generate_targets(offsets: &[Offset; 8]) -> [TargetList; 64] {
    let empty = TargetList {
        squares: [Square::new(0, 0); 8],
        len: 0,
    };
    let mut table = [empty; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut i = 0usize;

        while i < 8 {
            let r = row + offsets[i].d_row;
            let c = col + offsets[i].d_col;
            if r >= 0 && r < 8 && c >= 0 && c < 8 {
                let len = table[sq].len as usize;
                table[sq].squares[len] = Square::new(r as u8, c as u8);
                table[sq].len += 1;
            }
            i += 1;
        }

        sq += 1;
    }

    table
}

//! Zobrist hashing for position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for sq in kind {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square.index()]
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[castling_rights.bits() as usize]
}

#[inline]
pub fn en_passant_file_key(col: u8) -> u64 {
    tables().en_passant_file[col as usize]
}

/// Xor'd in when Dark is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Key of a position: placement, side to move, castling rights and the file
/// of the en passant target.
pub fn compute_zobrist_key(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
) -> u64 {
    let mut key = board
        .pieces()
        .fold(0u64, |acc, (square, piece)| acc ^ piece_square_key(piece, square));

    if side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_key(castling_rights);

    if let Some(ep_square) = en_passant_square {
        key ^= en_passant_file_key(ep_square.col);
    }

    key
}

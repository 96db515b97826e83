//! Fixed 8x8 mailbox board.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

/// Piece placement, at most one piece per square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.set(square, Some(piece));
    }

    /// Remove and return whatever stands on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].take()
    }

    /// True when `square` holds a piece of `color`.
    #[inline]
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color == color)
    }

    /// Occupied squares in row-major order (a8, b8, ..., h1).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..64).filter_map(move |index| {
            let square = Square::from_index(index);
            self.piece_at(square).map(|piece| (square, piece))
        })
    }

    /// Locate the king of `color` by scanning the grid.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
            .map(|(square, _)| square)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
            .count()
    }
}

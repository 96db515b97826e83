//! Fully described move value.
//!
//! A `ChessMove` snapshots the moving and captured pieces when it is built, so
//! it stays meaningful after the board it came from has changed. That is what
//! lets undo restore a position from the move alone.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::board::Board;
use crate::game_state::chess_rules::promotion_row;
use crate::game_state::chess_types::{Piece, PieceKind, Square};

/// Kinds a pawn may promote to, in the order perft expands them.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

#[derive(Debug, Clone, Copy)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub moving_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub is_en_passant: bool,
    pub is_pawn_promotion: bool,
    pub promotion_choice: PieceKind,
    pub is_castling: bool,
}

impl ChessMove {
    /// Ordinary move or capture; the captured piece is whatever stands on `to`.
    pub fn new(from: Square, to: Square, moving_piece: Piece, board: &Board) -> Self {
        let is_pawn_promotion =
            moving_piece.kind == PieceKind::Pawn && to.row == promotion_row(moving_piece.color);
        Self {
            from,
            to,
            moving_piece,
            captured_piece: board.piece_at(to),
            is_en_passant: false,
            is_pawn_promotion,
            promotion_choice: PieceKind::Queen,
            is_castling: false,
        }
    }

    /// En passant capture; the victim stands one rank behind `to`, on the
    /// mover's origin row.
    pub fn en_passant(from: Square, to: Square, moving_piece: Piece, board: &Board) -> Self {
        Self {
            captured_piece: board.piece_at(Square::new(from.row, to.col)),
            is_en_passant: true,
            ..Self::new(from, to, moving_piece, board)
        }
    }

    /// King half of a castling move. The rook relocation is implied by `to`.
    pub fn castling(from: Square, to: Square, king: Piece) -> Self {
        Self {
            from,
            to,
            moving_piece: king,
            captured_piece: None,
            is_en_passant: false,
            is_pawn_promotion: false,
            promotion_choice: PieceKind::Queen,
            is_castling: true,
        }
    }

    /// Build from a board snapshot, reading the moving piece off `from`.
    pub fn from_board(from: Square, to: Square, board: &Board) -> Option<Self> {
        board
            .piece_at(from)
            .map(|moving_piece| Self::new(from, to, moving_piece, board))
    }

    /// Same move with another promotion choice. Ignored for non-promotions.
    #[inline]
    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion_choice = kind;
        self
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.moving_piece.kind == PieceKind::Pawn && self.from.row.abs_diff(self.to.row) == 2
    }

    /// Square passed over by a two-square pawn advance.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.is_double_pawn_push()
            .then(|| Square::new((self.from.row + self.to.row) / 2, self.from.col))
    }

    /// Square the en passant victim stands on.
    #[inline]
    pub fn en_passant_capture_square(&self) -> Square {
        Square::new(self.from.row, self.to.col)
    }

    /// Piece that stands on `to` after the move.
    #[inline]
    pub fn placed_piece(&self) -> Piece {
        if self.is_pawn_promotion {
            Piece::new(self.moving_piece.color, self.promotion_choice)
        } else {
            self.moving_piece
        }
    }
}

/// Moves compare by origin and destination only.
impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for ChessMove {}

impl Hash for ChessMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.is_pawn_promotion {
            write!(f, "{}", self.promotion_choice.fen_char())?;
        }
        Ok(())
    }
}

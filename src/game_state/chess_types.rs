//! Value types shared by every subsystem.
//!
//! Squares are `(row, col)` pairs where row 0 is the eighth rank and col 0 is
//! the a-file, matching the order ranks appear in a FEN placement field.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN letter for this kind.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece. Empty squares are `None` on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for Light, lowercase for Dark.
    #[inline]
    pub fn fen_char(self) -> char {
        match self.color {
            Color::Light => self.kind.fen_char().to_ascii_uppercase(),
            Color::Dark => self.kind.fen_char(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_fen_char(ch).map(|kind| Piece::new(color, kind))
    }
}

/// Unit step (or knight jump) between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub d_row: i8,
    pub d_col: i8,
}

impl Offset {
    #[inline]
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    #[inline]
    pub const fn reversed(self) -> Self {
        Self {
            d_row: -self.d_row,
            d_col: -self.d_col,
        }
    }

    /// True when `other` lies on the same line as `self` (same or opposite step).
    #[inline]
    pub fn is_colinear_with(self, other: Offset) -> bool {
        self == other || self == other.reversed()
    }
}

/// Board coordinate, both components in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index, `0 == a8` and `63 == h1`.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        }
    }

    /// Step by `offset`, returning `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, offset: Offset) -> Option<Square> {
        self.offset_by(offset, 1)
    }

    /// Step `distance` times by `offset`.
    #[inline]
    pub fn offset_by(self, offset: Offset, distance: i8) -> Option<Square> {
        let row = self.row as i8 + offset.d_row * distance;
        let col = self.col as i8 + offset.d_col * distance;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Chess rank number, `1..=8`.
    #[inline]
    pub const fn rank(self) -> u8 {
        8 - self.row
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.col), self.rank())
    }
}

/// Four independent castling-rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        light_kingside: true,
        light_queenside: true,
        dark_kingside: true,
        dark_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        light_kingside: false,
        light_queenside: false,
        dark_kingside: false,
        dark_queenside: false,
    };

    #[inline]
    pub const fn get(self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::Light, CastleSide::Kingside) => self.light_kingside,
            (Color::Light, CastleSide::Queenside) => self.light_queenside,
            (Color::Dark, CastleSide::Kingside) => self.dark_kingside,
            (Color::Dark, CastleSide::Queenside) => self.dark_queenside,
        }
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::Light, CastleSide::Kingside) => self.light_kingside = false,
            (Color::Light, CastleSide::Queenside) => self.light_queenside = false,
            (Color::Dark, CastleSide::Kingside) => self.dark_kingside = false,
            (Color::Dark, CastleSide::Queenside) => self.dark_queenside = false,
        }
    }

    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
    }

    /// Packed `KQkq` bit mask (`0..=15`), used for hashing.
    #[inline]
    pub const fn bits(self) -> u8 {
        (self.light_kingside as u8)
            | (self.light_queenside as u8) << 1
            | (self.dark_kingside as u8) << 2
            | (self.dark_queenside as u8) << 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Why a game was declared drawn by rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// Terminal classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type for caller-input failures: position
//! descriptions that do not parse and move notation that does not resolve to a
//! legal move. Move generation, apply and undo are infallible and never
//! produce one.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Color;

pub type ChessResult<T> = Result<T, ChessErrors>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// FEN string with malformed structure or an invalid field.
    ///
    /// Payload: description of the offending field.
    InvalidFenString(String),

    /// Unexpected character in the FEN piece-placement field.
    InvalidFenToken(char),

    /// The position has no king for the given color.
    MissingKing(Color),

    /// The position has more than one king for the given color.
    TooManyKings(Color),

    /// The side that just moved (not the side to move) is left in check.
    OpponentInCheck(Color),

    /// A square or move string that is not valid long algebraic notation.
    InvalidAlgebraicString(String),

    /// Well-formed notation that matches no legal move in the position.
    NoSuchLegalMove(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::InvalidFenString(msg) => write!(f, "invalid FEN: {msg}"),
            ChessErrors::InvalidFenToken(ch) => {
                write!(f, "invalid piece character '{ch}' in FEN board layout")
            }
            ChessErrors::MissingKing(color) => write!(f, "position has no {color:?} king"),
            ChessErrors::TooManyKings(color) => {
                write!(f, "position has more than one {color:?} king")
            }
            ChessErrors::OpponentInCheck(color) => {
                write!(f, "{color:?} king is in check but it is not {color:?} to move")
            }
            ChessErrors::InvalidAlgebraicString(text) => {
                write!(f, "invalid long algebraic notation: {text}")
            }
            ChessErrors::NoSuchLegalMove(text) => write!(f, "no legal move matches {text}"),
        }
    }
}

impl Error for ChessErrors {}

#[cfg(test)]
mod tests {
    use super::ChessErrors;
    use crate::game_state::chess_types::Color;

    #[test]
    fn display_includes_payload() {
        assert_eq!(
            ChessErrors::NoSuchLegalMove("e2e5".to_owned()).to_string(),
            "no legal move matches e2e5"
        );
        assert_eq!(
            ChessErrors::MissingKing(Color::Dark).to_string(),
            "position has no Dark king"
        );
        assert_eq!(
            ChessErrors::OpponentInCheck(Color::Dark).to_string(),
            "Dark king is in check but it is not Dark to move"
        );
    }
}

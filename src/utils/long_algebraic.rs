//! Long algebraic move notation ("e2e4", "e7e8q").
//!
//! Rendering is a pure function of the move. Parsing always resolves against
//! the legal moves of a position, so a string never turns into a move the
//! position does not allow.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from));
    out.push_str(&square_to_algebraic(mv.to));
    if mv.is_pawn_promotion {
        out.push(promotion_to_char(mv.promotion_choice));
    }
    out
}

/// Find the legal move `long_algebraic` names in `game_state`. A missing
/// promotion letter means a queen.
pub fn resolve_long_algebraic(game_state: &GameState, long_algebraic: &str) -> ChessResult<ChessMove> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()));
    }

    let invalid = |_| ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned());
    let from = algebraic_to_square(&text[0..2]).map_err(invalid)?;
    let to = algebraic_to_square(&text[2..4]).map_err(invalid)?;
    let promotion = match text.chars().nth(4) {
        Some(ch) => Some(
            char_to_promotion(ch)
                .ok_or_else(|| ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()))?,
        ),
        None => None,
    };

    let mv = game_state
        .legal_moves()
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to)
        .ok_or_else(|| ChessErrors::NoSuchLegalMove(text.to_owned()))?;

    match promotion {
        Some(_) if !mv.is_pawn_promotion => Err(ChessErrors::NoSuchLegalMove(text.to_owned())),
        Some(kind) => Ok(mv.with_promotion(kind)),
        None => Ok(mv),
    }
}

fn promotion_to_char(piece: PieceKind) -> char {
    piece.fen_char()
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}

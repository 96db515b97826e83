//! Move generator abstraction.
//!
//! Perft and engines ask for moves through this trait so alternative
//! generators (restricted or instrumented ones in tests) can stand in.

use crate::game_state::chess_types::GameState;
use crate::moves::chess_move::ChessMove;

pub trait MoveGenerator: Send + Sync {
    /// Fill `out` with the legal moves of the side to move. `out` is cleared
    /// first so callers can reuse one buffer per search ply.
    fn generate_legal_moves_into(&self, game_state: &GameState, out: &mut Vec<ChessMove>);

    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<ChessMove> {
        let mut out = Vec::with_capacity(64);
        self.generate_legal_moves_into(game_state, &mut out);
        out
    }
}

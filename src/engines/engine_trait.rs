//! Engine abstraction layer.
//!
//! Anything that picks a move for the side to move implements `Engine`, so the
//! match harness and the console driver can pit strategies against each other
//! without knowing which is which.

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput>;
}

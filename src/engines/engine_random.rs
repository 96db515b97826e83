//! Uniform random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! self-play testing, and as the console opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic engine; the same seed replays the same choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlyChess Random"
    }

    fn choose_move(&mut self, game_state: &GameState) -> ChessResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(game_state);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        if let Some(mv) = out.best_move {
            out.info_lines
                .push(format!("info string random_engine chose {mv}"));
        }

        Ok(out)
    }
}

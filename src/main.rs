//! Console game against the random engine.
//!
//! You play Light. Enter moves in long algebraic notation (`e2e4`, `e7e8n`),
//! or one of: `moves`, `undo`, `fen`, `quit`.

use std::io::{self, BufRead, Write};

use plychess::chess_errors::ChessErrors;
use plychess::engines::engine_random::RandomEngine;
use plychess::engines::engine_trait::Engine;
use plychess::game_state::chess_types::{Color, GameStatus};
use plychess::game_state::game_state::GameState;
use plychess::utils::long_algebraic::move_to_long_algebraic;
use plychess::utils::render_game_state::render_game_state;

fn print_position(game: &GameState) {
    println!("\n{}\n", render_game_state(game));
    if game.is_in_check() {
        println!("check");
    }
}

/// Announce a finished game. Returns true when play cannot continue.
fn report_status(game: &GameState) -> bool {
    match game.game_status() {
        GameStatus::Ongoing => false,
        GameStatus::Checkmate { winner } => {
            println!("checkmate, {winner:?} wins");
            true
        }
        GameStatus::Stalemate => {
            println!("stalemate");
            true
        }
        GameStatus::Draw(reason) => {
            println!("draw: {reason:?}");
            true
        }
    }
}

fn main() -> Result<(), ChessErrors> {
    let mut game = GameState::new_game();
    let mut engine = RandomEngine::new();
    let stdin = io::stdin();

    println!("{} - you play Light", engine.name());
    print_position(&game);
    print!("> ");
    io::stdout().flush().ok();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let command = line.trim();

        match command {
            "" => {}
            "quit" | "exit" => break,
            "fen" => println!("{}", game.get_fen()),
            "moves" => {
                let moves: Vec<String> = game.legal_moves().iter().map(move_to_long_algebraic).collect();
                println!("{}", moves.join(" "));
            }
            "undo" => {
                // Take back the engine reply and the player's move.
                game.undo_move();
                if game.side_to_move == Color::Dark {
                    game.undo_move();
                }
                print_position(&game);
            }
            text => match game.resolve_move(text) {
                Ok(mv) => {
                    game.make_move(&mv);
                    print_position(&game);
                    if !report_status(&game) {
                        let out = engine.choose_move(&game)?;
                        if let Some(reply) = out.best_move {
                            println!("engine plays {}", move_to_long_algebraic(&reply));
                            game.make_move(&reply);
                            print_position(&game);
                            report_status(&game);
                        }
                    }
                }
                Err(err) => println!("{err}"),
            },
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    Ok(())
}

//! Perft / divide runner.
//!
//! Usage:
//! `cargo run --release --bin perft`
//! `cargo run --release --bin perft -- --depth 5 --threads 8`
//! `cargo run --release --bin perft -- --fen "<fen>" --depth 3 --divide`

use std::sync::Arc;
use std::time::Instant;

use chrono::Local;

use plychess::chess_errors::ChessErrors;
use plychess::game_state::chess_rules::STARTING_POSITION_FEN;
use plychess::game_state::game_state::GameState;
use plychess::move_generation::legal_move_generator::LegalMoveGenerator;
use plychess::move_generation::move_generator::MoveGenerator;
use plychess::move_generation::perft::{perft_detailed, perft_divide, perft_parallel};

fn parse_arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_arg_num<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    parse_arg_value(args, flag)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), ChessErrors> {
    let args: Vec<String> = std::env::args().collect();
    let depth: u8 = parse_arg_num(&args, "--depth", 4);
    let threads: usize = parse_arg_num(&args, "--threads", 1usize).max(1);
    let fen = parse_arg_value(&args, "--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let divide = args.iter().any(|a| a == "--divide");
    let detailed = args.iter().any(|a| a == "--detailed");

    let game = GameState::from_fen(&fen)?;
    println!(
        "perft run {} depth={} threads={}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        depth,
        threads
    );
    println!("fen: {}", game.get_fen());

    let started = Instant::now();
    let nodes = if divide {
        let lines = perft_divide(&LegalMoveGenerator, &game, depth);
        for (mv, count) in &lines {
            println!("{mv}: {count}");
        }
        lines.iter().map(|(_, count)| count).sum()
    } else if detailed {
        let counts = perft_detailed(&game, depth);
        println!("{counts:?}");
        counts.nodes
    } else {
        let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
        perft_parallel(generator, &game, depth, threads)
    };
    let elapsed = started.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        (nodes as f64 / elapsed.as_secs_f64()) as u64
    } else {
        0
    };
    println!(
        "nodes={} elapsed_ms={} nps={}",
        nodes,
        elapsed.as_millis(),
        nps
    );
    Ok(())
}

//! Random-vs-random self-play series.
//!
//! Run with:
//! `cargo run --release --bin random_match`
//! `cargo run --release --bin random_match -- --games 20 --seed 7 --max-plies 400 --verbose`

use chrono::Local;

use plychess::chess_errors::ChessErrors;
use plychess::engines::engine_random::RandomEngine;
use plychess::engines::engine_trait::Engine;
use plychess::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn parse_arg_num<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), ChessErrors> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let games: u16 = parse_arg_num(&args, "--games", 10);
    let base_seed: u64 = parse_arg_num(&args, "--seed", 1234);
    let max_plies: u16 = parse_arg_num(&args, "--max-plies", 300);

    println!(
        "random match series {} games={} seed={} max_plies={}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        games,
        base_seed,
        max_plies
    );

    let player1 = move || Box::new(RandomEngine::with_seed(base_seed)) as Box<dyn Engine>;
    let player2 =
        move || Box::new(RandomEngine::with_seed(base_seed.wrapping_add(1))) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games,
            base_seed,
            per_game: MatchConfig {
                max_plies,
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}

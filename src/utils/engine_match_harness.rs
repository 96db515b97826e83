//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other in-process, with an
//! optional seeded random opening prefix, and stops at checkmate, stalemate, a
//! draw rule or a ply cap.

use chrono::{DateTime, Local};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::{Color, DrawReason, GameStatus};
use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawRepetition,
    DrawFiftyMoveRule,
    DrawMaxPlies,
}

impl MatchOutcome {
    #[inline]
    pub fn is_draw(self) -> bool {
        !matches!(
            self,
            MatchOutcome::WhiteWinCheckmate | MatchOutcome::BlackWinCheckmate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    Draw(MatchOutcome),
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 2,
            opening_max_plies: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub started_at: DateTime<Local>,
    pub final_state: GameState,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Outcome for a finished position, `None` while play continues.
fn terminal_outcome(state: &GameState) -> Option<MatchOutcome> {
    match state.game_status() {
        GameStatus::Ongoing => None,
        GameStatus::Checkmate {
            winner: Color::Light,
        } => Some(MatchOutcome::WhiteWinCheckmate),
        GameStatus::Checkmate {
            winner: Color::Dark,
        } => Some(MatchOutcome::BlackWinCheckmate),
        GameStatus::Stalemate => Some(MatchOutcome::DrawStalemate),
        GameStatus::Draw(DrawReason::ThreefoldRepetition) => Some(MatchOutcome::DrawRepetition),
        GameStatus::Draw(DrawReason::FiftyMoveRule) => Some(MatchOutcome::DrawFiftyMoveRule),
    }
}

/// Play a single seeded engine-vs-engine match from the standard start.
///
/// `engine_white` is White, `engine_black` is Black.
pub fn play_engine_match(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    play_engine_match_from_state_internal(
        GameState::new_game(),
        &mut engine_white,
        &mut engine_black,
        seed,
        config,
        true,
    )
}

/// Play a single match from a caller-provided state, without the random
/// opening prefix.
pub fn play_engine_match_from_state(
    mut engine_white: Box<dyn Engine>,
    mut engine_black: Box<dyn Engine>,
    start_state: GameState,
    seed: u64,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    play_engine_match_from_state_internal(
        start_state,
        &mut engine_white,
        &mut engine_black,
        seed,
        config,
        false,
    )
}

fn play_engine_match_from_state_internal(
    mut state: GameState,
    engine_white: &mut Box<dyn Engine>,
    engine_black: &mut Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> ChessResult<MatchResult> {
    let started_at = Local::now();
    engine_white.new_game();
    engine_black.new_game();

    let opening_moves_lan = if apply_random_opening {
        apply_seeded_random_opening(
            &mut state,
            seed,
            config.opening_min_plies,
            config.opening_max_plies,
        )
    } else {
        Vec::new()
    };

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        started_at,
        final_state: GameState::new_game(),
        opening_moves_lan,
        played_moves_lan: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        if let Some(outcome) = terminal_outcome(&state) {
            result.outcome = outcome;
            break;
        }

        let mover = state.side_to_move;
        let started = Instant::now();
        let out = match mover {
            Color::Light => engine_white.choose_move(&state)?,
            Color::Dark => engine_black.choose_move(&state)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Light => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Dark => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        // Re-resolve through notation so an engine can never play a move the
        // position does not allow.
        let proposed = out
            .best_move
            .ok_or_else(|| ChessErrors::NoSuchLegalMove("(none)".to_owned()))?;
        let lan = move_to_long_algebraic(&proposed);
        let chosen = state.resolve_move(&lan)?;

        result.played_moves_lan.push(lan);
        state.make_move(&chosen);
    }

    if result.outcome == MatchOutcome::DrawMaxPlies {
        if let Some(outcome) = terminal_outcome(&state) {
            result.outcome = outcome;
        }
    }
    result.final_state = state;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> ChessResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (white, black) = if player1_is_white {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} white={} black={}",
                i + 1,
                config.games,
                seed,
                white,
                black
            );
        }

        let result = if player1_is_white {
            play_engine_match(player1_factory(), player2_factory(), seed, config.per_game.clone())?
        } else {
            play_engine_match(player2_factory(), player1_factory(), seed, config.per_game.clone())?
        };

        if config.verbose {
            println!(
                "[match] started={} plies={} moves={}",
                result.started_at.format("%Y-%m-%d %H:%M:%S"),
                result.played_moves_lan.len(),
                result.played_moves_lan.join(" ")
            );
        }

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.black_move_count,
                result.white_total_time_ns,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.white_move_count,
                result.black_total_time_ns,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_color = match result.outcome {
            MatchOutcome::WhiteWinCheckmate => Some(Color::Light),
            MatchOutcome::BlackWinCheckmate => Some(Color::Dark),
            _ => None,
        };
        let mapped = match winner_color {
            Some(color) => {
                let player1_won = (color == Color::Light) == player1_is_white;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWinCheckmate { player, color }
            }
            None => {
                stats.draws += 1;
                SeriesOutcome::Draw(result.outcome)
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} p1_wins={} p2_wins={} draws={}\n",
                i + 1,
                config.games,
                mapped,
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

/// Play a seeded number of uniformly random plies on `state`, stopping early
/// if the game ends. Returns the moves played.
fn apply_seeded_random_opening(
    state: &mut GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves_lan = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let legal_moves = state.legal_moves();
        if legal_moves.is_empty() {
            break;
        }

        let chosen = legal_moves[rng.random_range(0..legal_moves.len())];
        opening_moves_lan.push(move_to_long_algebraic(&chosen));
        state.make_move(&chosen);
    }

    opening_moves_lan
}

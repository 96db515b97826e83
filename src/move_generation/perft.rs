//! Exhaustive move-path enumeration ("perft").
//!
//! Walks the game tree with make/undo on a private copy of the state. Each
//! promoting move is expanded into all four promotion choices, so counts match
//! published reference values.

use std::panic;
use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves_in_place;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::{ChessMove, PROMOTION_KINDS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

/// Call `visit` once per promotion choice, or once for a non-promoting move.
#[inline]
fn for_each_choice(mv: &ChessMove, mut visit: impl FnMut(ChessMove)) {
    if mv.is_pawn_promotion {
        for kind in PROMOTION_KINDS {
            visit(mv.with_promotion(kind));
        }
    } else {
        visit(*mv);
    }
}

#[inline]
fn choice_count(mv: &ChessMove) -> u64 {
    if mv.is_pawn_promotion {
        PROMOTION_KINDS.len() as u64
    } else {
        1
    }
}

/// Leaf node count at `depth`.
pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, game_state: &GameState, depth: u8) -> u64 {
    let mut state = game_state.clone();
    perft_nodes(generator, &mut state, depth)
}

fn perft_nodes<G: MoveGenerator + ?Sized>(generator: &G, game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generator.generate_legal_moves(game_state);
    if depth == 1 {
        return moves.iter().map(choice_count).sum();
    }

    let mut nodes = 0;
    for mv in &moves {
        for_each_choice(mv, |choice| {
            game_state.make_move(&choice);
            nodes += perft_nodes(generator, game_state, depth - 1);
            game_state.undo_move();
        });
    }
    nodes
}

/// Leaf count plus a breakdown of what the final move of each path did.
pub fn perft_detailed(game_state: &GameState, depth: u8) -> PerftCounts {
    let mut state = game_state.clone();
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_detailed_recurse(&mut state, depth, &mut counts);
    counts
}

fn perft_detailed_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let mut moves = Vec::new();
    generate_legal_moves_in_place(game_state, &mut moves);

    for mv in &moves {
        for_each_choice(mv, |choice| {
            game_state.make_move(&choice);
            if depth == 1 {
                record_leaf(game_state, &choice, counts);
            } else {
                perft_detailed_recurse(game_state, depth - 1, counts);
            }
            game_state.undo_move();
        });
    }
}

fn record_leaf(game_state: &GameState, mv: &ChessMove, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant {
        counts.en_passant += 1;
    }
    if mv.is_castling {
        counts.castles += 1;
    }
    if mv.is_pawn_promotion {
        counts.promotions += 1;
    }

    let mut replies = Vec::new();
    let check_info = generate_legal_moves_in_place(game_state, &mut replies);
    if check_info.in_check {
        counts.checks += 1;
        if check_info.is_double_check() {
            counts.double_checks += 1;
        }
        if replies.is_empty() {
            counts.checkmates += 1;
        }
    }
}

/// Node count below each root move, promotions listed per choice, in
/// generation order.
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> Vec<(ChessMove, u64)> {
    let mut state = game_state.clone();
    let mut out = Vec::new();
    if depth == 0 {
        return out;
    }

    for mv in generator.generate_legal_moves(&state) {
        for_each_choice(&mv, |choice| {
            state.make_move(&choice);
            let nodes = perft_nodes(generator, &mut state, depth - 1);
            state.undo_move();
            out.push((choice, nodes));
        });
    }
    out
}

/// `perft` with root moves spread over `threads` workers, each walking its own
/// clone of the state.
pub fn perft_parallel(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
    threads: usize,
) -> u64 {
    if depth <= 1 {
        return perft(generator.as_ref(), game_state, depth);
    }

    let mut root_choices = Vec::new();
    for mv in generator.generate_legal_moves(game_state) {
        for_each_choice(&mv, |choice| root_choices.push(choice));
    }

    let workers = threads.clamp(1, root_choices.len().max(1));
    let mut buckets: Vec<Vec<ChessMove>> = vec![Vec::new(); workers];
    for (i, mv) in root_choices.into_iter().enumerate() {
        buckets[i % workers].push(mv);
    }

    let mut handles = Vec::with_capacity(workers);
    for bucket in buckets {
        let generator_ref = Arc::clone(&generator);
        let mut state = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut nodes = 0u64;
            for mv in bucket {
                state.make_move(&mv);
                nodes += perft_nodes(generator_ref.as_ref(), &mut state, depth - 1);
                state.undo_move();
            }
            nodes
        }));
    }

    let mut total = 0;
    for handle in handles {
        match handle.join() {
            Ok(nodes) => total += nodes,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> u64 {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        perft(&LegalMoveGenerator, &game, depth)
    }

    #[test]
    fn perft_starting_position() {
        assert_eq!(nodes(STARTING_POSITION_FEN, 0), 1);
        assert_eq!(nodes(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(nodes(STARTING_POSITION_FEN, 2), 400);
        assert_eq!(nodes(STARTING_POSITION_FEN, 3), 8_902);
        assert_eq!(nodes(STARTING_POSITION_FEN, 4), 197_281);
    }

    #[test]
    fn perft_kiwipete() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        assert_eq!(nodes(KIWIPETE, 2), 2_039);
    }

    #[test]
    fn perft_position_3_en_passant_pins() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2_812);
    }

    #[test]
    fn perft_position_4_promotions() {
        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
    }

    #[test]
    fn perft_position_5() {
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1_486);
    }

    #[test]
    fn detailed_counts_match_reference_breakdown() {
        let start = GameState::new_game();
        let counts = perft_detailed(&start, 3);
        assert_eq!(counts.nodes, 8_902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);

        let kiwipete = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let counts = perft_detailed(&kiwipete, 2);
        assert_eq!(counts.nodes, 2_039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.promotions, 0);
        assert_eq!(counts.checks, 3);
        assert_eq!(counts.double_checks, 0);
        assert_eq!(counts.checkmates, 0);
    }

    #[test]
    fn detailed_counts_discovered_and_double_checks() {
        // Every knight move uncovers the e2 rook; Nd6 and Nf6 also check directly.
        let game = GameState::from_fen("4k3/8/8/8/4N3/8/4R3/K7 w - - 0 1").expect("FEN should parse");
        let counts = perft_detailed(&game, 1);
        assert_eq!(counts.nodes, 20);
        assert_eq!(counts.captures, 0);
        assert_eq!(counts.checks, 8);
        assert_eq!(counts.double_checks, 2);
        assert_eq!(counts.checkmates, 0);
    }

    #[test]
    fn divide_sums_to_perft_and_lists_each_promotion() {
        let game = GameState::from_fen(POSITION_4).expect("FEN should parse");
        let divide = perft_divide(&LegalMoveGenerator, &game, 2);
        let total: u64 = divide.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 264);

        let promoting = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let promotions: Vec<String> = perft_divide(&LegalMoveGenerator, &promoting, 1)
            .iter()
            .filter(|(mv, _)| mv.is_pawn_promotion)
            .map(|(mv, _)| mv.to_string())
            .collect();
        assert_eq!(promotions, vec!["a7a8q", "a7a8n", "a7a8r", "a7a8b"]);
    }

    #[test]
    fn parallel_perft_matches_single_thread() {
        let game = GameState::new_game();
        let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
        assert_eq!(perft_parallel(Arc::clone(&generator), &game, 3, 4), 8_902);
        assert_eq!(perft_parallel(generator, &game, 1, 4), 20);
    }

    #[test]
    fn perft_leaves_the_input_state_untouched() {
        let game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let fen_before = game.get_fen();
        perft(&LegalMoveGenerator, &game, 2);
        assert_eq!(game.get_fen(), fen_before);
        assert!(game.undo_stack.is_empty());
    }
}

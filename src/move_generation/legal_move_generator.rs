//! Full legal move generation pipeline.
//!
//! Detects pins and checks for the side to move, dispatches per-piece
//! generators over the board in row-major order, then narrows the result:
//!
//! - not in check: everything generated is legal, castling is appended;
//! - single check: non-king moves must capture the checker or land on the
//!   ray between checker and king;
//! - double check: only king moves.

use crate::game_state::chess_types::{GameState, PieceKind, Square};
use crate::move_generation::legal_move_checks::{inspect_king_safety, Check, CheckInfo};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves_into(&self, game_state: &GameState, out: &mut Vec<ChessMove>) {
        generate_legal_moves_in_place(game_state, out);
    }
}

/// Generate legal moves into `out` and return the check facts used, so the
/// caller can classify an empty result as mate or stalemate.
pub fn generate_legal_moves_in_place(game_state: &GameState, out: &mut Vec<ChessMove>) -> CheckInfo {
    out.clear();
    let color = game_state.side_to_move;
    let king_square = game_state.king_square(color);
    let check_info = inspect_king_safety(&game_state.board, color, king_square);

    match check_info.checks() {
        [] => {
            generate_piece_moves(game_state, &check_info, out);
            generate_castling_moves(game_state, out);
        }
        [check] => {
            generate_piece_moves(game_state, &check_info, out);
            let resolving = check_resolution_mask(game_state, check);
            out.retain(|mv| {
                mv.moving_piece.kind == PieceKind::King
                    || resolving & square_bit(mv.to) != 0
                    || (mv.is_en_passant && mv.en_passant_capture_square() == check.attacker_square)
            });
        }
        _ => {
            let king = game_state.board.piece_at(king_square);
            if let Some(piece) = king {
                generate_king_moves(game_state, king_square, piece, out);
            }
        }
    }

    check_info
}

fn generate_piece_moves(game_state: &GameState, check_info: &CheckInfo, out: &mut Vec<ChessMove>) {
    let color = game_state.side_to_move;
    for (from, piece) in game_state.board.pieces() {
        if piece.color != color {
            continue;
        }
        match piece.kind {
            PieceKind::King => generate_king_moves(game_state, from, piece, out),
            PieceKind::Queen => generate_queen_moves(game_state, from, piece, check_info, out),
            PieceKind::Rook => generate_rook_moves(game_state, from, piece, check_info, out),
            PieceKind::Bishop => generate_bishop_moves(game_state, from, piece, check_info, out),
            PieceKind::Knight => generate_knight_moves(game_state, from, piece, check_info, out),
            PieceKind::Pawn => generate_pawn_moves(game_state, from, piece, check_info, out),
        }
    }
}

#[inline]
fn square_bit(square: Square) -> u64 {
    1u64 << square.index()
}

/// Squares that resolve `check` for a non-king piece: the checker itself and,
/// for sliders, every square between it and the king. Knight and pawn checks
/// reach the checker in one step, so the walk covers them too.
fn check_resolution_mask(game_state: &GameState, check: &Check) -> u64 {
    let king_square = game_state.king_square(game_state.side_to_move);
    let mut mask = 0u64;
    let mut distance = 1i8;
    while let Some(square) = king_square.offset_by(check.direction, distance) {
        mask |= square_bit(square);
        if square == check.attacker_square {
            break;
        }
        distance += 1;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::{generate_legal_moves_in_place, LegalMoveGenerator};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{GameState, PieceKind};
    use crate::move_generation::legal_move_checks::is_king_safe_on;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::moves::chess_move::ChessMove;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn legal(fen: &str) -> Vec<ChessMove> {
        let game = parse_fen(fen).expect("FEN should parse");
        LegalMoveGenerator.generate_legal_moves(&game)
    }

    fn lan(moves: &[ChessMove]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|mv| format!("{}{}", mv.from, mv.to)).collect();
        out.sort();
        out
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let moves = legal(STARTING_POSITION_FEN);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn starting_moves_come_in_board_order() {
        let moves = legal(STARTING_POSITION_FEN);
        let first = moves.first().expect("moves should exist");
        // Row 6 (the light pawn rank) is scanned before the back rank.
        assert_eq!(first.to_string(), "a2a3");
        let last = moves.last().expect("moves should exist");
        assert_eq!(last.moving_piece.kind, PieceKind::Knight);
    }

    #[test]
    fn single_slider_check_allows_block_capture_or_king_move() {
        // Rook e8 checks king e1; of the bishop moves only Be3 blocks.
        let moves = legal("4r2k/8/8/8/8/8/8/2B1K3 w - - 0 1");
        let king = algebraic_to_square("e1").expect("square should parse");
        for mv in &moves {
            if mv.from != king {
                assert_eq!(mv.to.col, 4, "non-king move {mv} must land on the e-file");
            }
        }
        assert!(lan(&moves).contains(&"c1e3".to_owned()));
        assert!(!lan(&moves).contains(&"c1d2".to_owned()));
    }

    #[test]
    fn knight_check_allows_only_capture_of_knight() {
        // Knight d3 checks king e1; the rook on d7 can capture it.
        let moves = legal("7k/3R4/8/8/8/3n4/8/4K3 w - - 0 1");
        let non_king: Vec<String> = moves
            .iter()
            .filter(|mv| mv.moving_piece.kind != PieceKind::King)
            .map(|mv| mv.to_string())
            .collect();
        assert_eq!(non_king, vec!["d7d3"]);
    }

    #[test]
    fn double_check_returns_only_king_moves() {
        let moves = legal("4r2k/8/8/8/8/3n4/8/R3K3 w - - 0 1");
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.moving_piece.kind == PieceKind::King));
    }

    #[test]
    fn no_castling_while_in_check() {
        let moves = legal("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|mv| !mv.is_castling));
    }

    #[test]
    fn en_passant_may_capture_a_checking_pawn() {
        let mut game = parse_fen("8/8/8/2k5/3Pp3/8/8/7K b - - 0 1").expect("FEN should parse");
        game.en_passant_square = Some(algebraic_to_square("d3").expect("square should parse"));
        let mut out = Vec::new();
        let info = generate_legal_moves_in_place(&game, &mut out);
        assert!(info.in_check);
        assert!(out.iter().any(|mv| mv.is_en_passant && mv.to.to_string() == "d3"));
    }

    #[test]
    fn checkmate_position_has_no_moves() {
        let mut out = Vec::new();
        let game = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        let info = generate_legal_moves_in_place(&game, &mut out);
        assert!(out.is_empty());
        assert!(info.in_check);
    }

    #[test]
    fn stalemate_position_has_no_moves_and_no_check() {
        let mut out = Vec::new();
        let game: GameState = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let info = generate_legal_moves_in_place(&game, &mut out);
        assert!(out.is_empty());
        assert!(!info.in_check);
    }

    #[test]
    fn generated_moves_never_leave_king_attacked() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        ];
        for fen in fens {
            let mut game = parse_fen(fen).expect("FEN should parse");
            let color = game.side_to_move;
            for mv in LegalMoveGenerator.generate_legal_moves(&game) {
                game.make_move(&mv);
                let king = game.king_square(color);
                assert!(is_king_safe_on(&game.board, color, king), "{mv} left king in check in {fen}");
                game.undo_move();
            }
        }
    }
}

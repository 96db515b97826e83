//! Legal king move generation, including castling.
//!
//! Every king destination is tried as a hypothetical king square against the
//! pin/check detector, so king moves leave this module already legal.

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::{CastleSide, GameState, Piece, PieceKind, Square};
use crate::move_generation::legal_move_checks::is_king_safe_on;
use crate::moves::chess_move::ChessMove;
use crate::moves::king_moves::king_targets;

pub fn generate_king_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    out: &mut Vec<ChessMove>,
) {
    let board = &game_state.board;
    for &to in king_targets(from) {
        if board.is_color(to, piece.color) {
            continue;
        }
        if is_king_safe_on(board, piece.color, to) {
            out.push(ChessMove::new(from, to, piece, board));
        }
    }
}

/// Castling for the side to move. Only called when that side is not in check.
pub fn generate_castling_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let board = &game_state.board;
    let color = game_state.side_to_move;
    let king = Piece::new(color, PieceKind::King);

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !game_state.castling_rights.get(color, side) {
            continue;
        }

        let geometry = castling_geometry(color, side);
        if board.piece_at(geometry.king_from) != Some(king)
            || board.piece_at(geometry.rook_from) != Some(Piece::new(color, PieceKind::Rook))
        {
            continue;
        }
        if geometry.between.iter().any(|sq| !board.is_empty(*sq)) {
            continue;
        }
        if geometry
            .king_path
            .iter()
            .all(|sq| is_king_safe_on(board, color, *sq))
        {
            out.push(ChessMove::castling(geometry.king_from, geometry.king_to, king));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_castling_moves, generate_king_moves};
    use crate::game_state::chess_types::{Color, GameState, PieceKind};
    use crate::moves::chess_move::ChessMove;
    use crate::utils::fen_parser::parse_fen;

    fn king_moves(game: &GameState) -> Vec<String> {
        let from = game.king_square(game.side_to_move);
        let piece = game.board.piece_at(from).expect("king should be on its square");
        let mut out = Vec::new();
        generate_king_moves(game, from, piece, &mut out);
        let mut targets: Vec<String> = out.iter().map(|mv| mv.to.to_string()).collect();
        targets.sort();
        targets
    }

    fn castles(game: &GameState) -> Vec<ChessMove> {
        let mut out = Vec::new();
        generate_castling_moves(game, &mut out);
        out
    }

    #[test]
    fn king_avoids_attacked_squares() {
        let game = parse_fen("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(king_moves(&game), vec!["d1", "f1"]);
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        let game = parse_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(king_moves(&game), vec!["d2", "e2", "f2"]);
    }

    #[test]
    fn king_may_capture_undefended_piece_only() {
        let loose = parse_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(king_moves(&loose), vec!["d1", "e2", "f1"]);

        let defended = parse_fen("4k3/4r3/8/8/8/8/4r3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(king_moves(&defended), vec!["d1", "f1"]);
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let moves = castles(&game);
        let targets: Vec<String> = moves.iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(targets, vec!["g1", "c1"]);
        assert!(moves.iter().all(|mv| mv.is_castling));
        assert!(moves.iter().all(|mv| mv.moving_piece.kind == PieceKind::King));
    }

    #[test]
    fn castling_through_attacked_square_is_refused() {
        // Bishop on a6 covers f1; queenside transit d1/c1 is clear.
        let game = parse_fen("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let targets: Vec<String> = castles(&game).iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(targets, vec!["c1"]);
    }

    #[test]
    fn queenside_b_file_only_needs_to_be_empty() {
        // Rook on b8 attacks b1, which the king never crosses.
        let game = parse_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        assert_eq!(castles(&game).len(), 1);
        let blocked = parse_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").expect("FEN should parse");
        assert!(castles(&blocked).is_empty());
    }

    #[test]
    fn castling_requires_right_and_rook() {
        let no_right = parse_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").expect("FEN should parse");
        assert!(castles(&no_right).is_empty());
        let no_rook = parse_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").expect("FEN should parse");
        assert!(castles(&no_rook).is_empty());
        assert_eq!(no_rook.side_to_move, Color::Light);
    }
}

//! Legal bishop move generation.

use crate::game_state::chess_types::{GameState, Piece, Square};
use crate::move_generation::legal_move_checks::CheckInfo;
use crate::move_generation::legal_move_shared::push_slider_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::rays::BISHOP_DIRECTIONS;

pub fn generate_bishop_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    check_info: &CheckInfo,
    out: &mut Vec<ChessMove>,
) {
    push_slider_moves(
        &game_state.board,
        from,
        piece,
        BISHOP_DIRECTIONS,
        check_info.pin_direction(from),
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_types::{Color, Square};
    use crate::move_generation::legal_move_checks::inspect_king_safety;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn bishop_pinned_on_file_cannot_move() {
        let game = parse_fen("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let from = Square::new(6, 4);
        let info = inspect_king_safety(&game.board, Color::Light, Square::new(7, 4));
        let piece = game.board.piece_at(from).expect("bishop should be on e2");

        let mut out = Vec::new();
        generate_bishop_moves(&game, from, piece, &info, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn free_bishop_in_corner_sees_long_diagonal() {
        let game = parse_fen("6k1/8/8/8/8/8/8/B3K3 w - - 0 1").expect("FEN should parse");
        let from = Square::new(7, 0);
        let info = inspect_king_safety(&game.board, Color::Light, Square::new(7, 4));
        let piece = game.board.piece_at(from).expect("bishop should be on a1");

        let mut out = Vec::new();
        generate_bishop_moves(&game, from, piece, &info, &mut out);
        // b2 through h8.
        assert_eq!(out.len(), 7);
    }
}

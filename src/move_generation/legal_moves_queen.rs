//! Legal queen move generation: rook rays followed by bishop rays.

use crate::game_state::chess_types::{GameState, Piece, Square};
use crate::move_generation::legal_move_checks::CheckInfo;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::ChessMove;

pub fn generate_queen_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    check_info: &CheckInfo,
    out: &mut Vec<ChessMove>,
) {
    generate_rook_moves(game_state, from, piece, check_info, out);
    generate_bishop_moves(game_state, from, piece, check_info, out);
}

#[cfg(test)]
mod tests {
    use super::generate_queen_moves;
    use crate::game_state::chess_types::{Color, Square};
    use crate::move_generation::legal_move_checks::inspect_king_safety;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn queen_on_empty_center_has_27_moves() {
        let game = parse_fen("k7/8/8/8/3Q4/8/8/7K w - - 0 1").expect("FEN should parse");
        let from = Square::new(4, 3);
        let info = inspect_king_safety(&game.board, Color::Light, Square::new(7, 7));
        let piece = game.board.piece_at(from).expect("queen should be on d4");

        let mut out = Vec::new();
        generate_queen_moves(&game, from, piece, &info, &mut out);
        assert_eq!(out.len(), 27);
    }

    #[test]
    fn diagonally_pinned_queen_keeps_the_diagonal() {
        let game = parse_fen("7k/8/8/8/b7/8/2Q5/3K4 w - - 0 1").expect("FEN should parse");
        let from = Square::new(6, 2);
        let info = inspect_king_safety(&game.board, Color::Light, Square::new(7, 3));
        let piece = game.board.piece_at(from).expect("queen should be on c2");

        let mut out = Vec::new();
        generate_queen_moves(&game, from, piece, &info, &mut out);
        let targets: Vec<String> = out.iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(targets, vec!["b3", "a4"]);
    }
}

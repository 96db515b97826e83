//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the console driver and for
//! diagnostics in text environments.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string for terminal output. Squares touched
/// by the last move are bracketed.
pub fn render_game_state(game_state: &GameState) -> String {
    let highlighted = game_state.last_move().map(|mv| [mv.from, mv.to]);
    let mut out = String::new();

    out.push_str("   a  b  c  d  e  f  g  h\n");

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        out.push(rank);
        out.push(' ');

        for col in 0..8u8 {
            let square = Square::new(row, col);
            let glyph = game_state
                .board
                .piece_at(square)
                .map_or('·', piece_to_unicode);
            if highlighted.is_some_and(|squares| squares.contains(&square)) {
                out.push('[');
                out.push(glyph);
                out.push(']');
            } else {
                out.push(' ');
                out.push(glyph);
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("   a  b  c  d  e  f  g  h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::chess_types::GameState;

    #[test]
    fn renders_ranks_top_down_and_marks_last_move() {
        let mut game = GameState::new_game();
        let rendered = render_game_state(&game);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[1].starts_with("8  ♜"));
        assert!(lines[8].starts_with("1  ♖"));
        assert!(!rendered.contains('['));

        let mv = game.resolve_move("e2e4").expect("e2e4 should be legal");
        game.make_move(&mv);
        let rendered = render_game_state(&game);
        assert!(rendered.contains("[♙]"));
        assert!(rendered.contains("[·]"));
    }
}

//! Apply and undo for moves produced by the legal move generator.
//!
//! `apply_move` pushes one `UndoState` holding everything it overwrites, and
//! `undo_move` pops it, so a move and its undo are always paired. The Zobrist
//! key is updated incrementally on apply and restored from the record on undo.

use crate::game_state::chess_rules::{castling_geometry, rook_home_side, FIFTY_MOVE_LIMIT};
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::{
    castling_key, en_passant_file_key, piece_square_key, side_to_move_key,
};
use crate::moves::chess_move::ChessMove;

/// Castling side implied by the king's destination.
#[inline]
fn castle_side(mv: &ChessMove) -> CastleSide {
    if mv.to.col > mv.from.col {
        CastleSide::Kingside
    } else {
        CastleSide::Queenside
    }
}

#[inline]
fn captured_square(mv: &ChessMove) -> Square {
    if mv.is_en_passant {
        mv.en_passant_capture_square()
    } else {
        mv.to
    }
}

pub fn apply_move(game_state: &mut GameState, mv: &ChessMove) {
    let color = mv.moving_piece.color;

    game_state.undo_stack.push(UndoState {
        mv: *mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_draw_reason: game_state.draw_reason,
        prev_king_squares: game_state.king_squares,
        prev_zobrist_key: game_state.zobrist_key,
    });

    let mut key = game_state.zobrist_key;
    key ^= castling_key(game_state.castling_rights);
    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(ep_square.col);
    }

    // Pieces.
    let board = &mut game_state.board;
    board.set(mv.from, None);
    key ^= piece_square_key(mv.moving_piece, mv.from);

    if let Some(captured) = mv.captured_piece {
        let square = captured_square(mv);
        board.set(square, None);
        key ^= piece_square_key(captured, square);
    }

    let placed = mv.placed_piece();
    board.place(mv.to, placed);
    key ^= piece_square_key(placed, mv.to);

    if mv.is_castling {
        let geometry = castling_geometry(color, castle_side(mv));
        if let Some(rook) = board.take(geometry.rook_from) {
            board.place(geometry.rook_to, rook);
            key ^= piece_square_key(rook, geometry.rook_from);
            key ^= piece_square_key(rook, geometry.rook_to);
        }
    }

    // Rights: king moves forfeit both sides; anything leaving or landing on a
    // rook home square forfeits that side.
    if mv.moving_piece.kind == PieceKind::King {
        game_state.king_squares[color.index()] = mv.to;
        game_state.castling_rights.revoke_all(color);
    }
    for square in [mv.from, mv.to] {
        if let Some((rook_color, side)) = rook_home_side(square) {
            game_state.castling_rights.revoke(rook_color, side);
        }
    }

    game_state.en_passant_square = mv.en_passant_target();

    // Clocks.
    if mv.moving_piece.kind == PieceKind::Pawn || mv.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = color.opposite();

    key ^= side_to_move_key();
    key ^= castling_key(game_state.castling_rights);
    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(ep_square.col);
    }
    game_state.zobrist_key = key;

    let new_draw = if game_state.halfmove_clock >= FIFTY_MOVE_LIMIT {
        Some(DrawReason::FiftyMoveRule)
    } else if game_state.is_threefold_repetition() {
        Some(DrawReason::ThreefoldRepetition)
    } else {
        None
    };
    game_state.draw_reason = game_state.draw_reason.or(new_draw);
}

/// Reverse the last applied move. A no-op returning `None` on an empty log.
pub fn undo_move(game_state: &mut GameState) -> Option<ChessMove> {
    let undo = game_state.undo_stack.pop()?;
    let mv = undo.mv;
    let color = mv.moving_piece.color;

    let board = &mut game_state.board;
    board.set(mv.to, None);
    if let Some(captured) = mv.captured_piece {
        board.place(captured_square(&mv), captured);
    }
    board.place(mv.from, mv.moving_piece);

    if mv.is_castling {
        let geometry = castling_geometry(color, castle_side(&mv));
        if let Some(rook) = board.take(geometry.rook_to) {
            board.place(geometry.rook_from, rook);
        }
    }

    game_state.side_to_move = color;
    game_state.king_squares = undo.prev_king_squares;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.draw_reason = undo.prev_draw_reason;
    game_state.zobrist_key = undo.prev_zobrist_key;

    // Re-derived from the move that is now last; the stored target only
    // matters for the position the game started from.
    game_state.en_passant_square = match game_state.undo_stack.last() {
        Some(previous) => {
            let derived = previous.mv.en_passant_target();
            debug_assert_eq!(derived, undo.prev_en_passant_square);
            derived
        }
        None => undo.prev_en_passant_square,
    };

    Some(mv)
}

#[cfg(test)]
mod tests {
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_checks::is_king_safe_on;
    use crate::utils::algebraic::algebraic_to_square;

    #[derive(Debug, PartialEq)]
    struct Snapshot {
        board: Board,
        side_to_move: Color,
        king_squares: [Square; 2],
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
        draw_reason: Option<DrawReason>,
        zobrist_key: u64,
        log_len: usize,
    }

    fn snapshot(game: &GameState) -> Snapshot {
        Snapshot {
            board: game.board,
            side_to_move: game.side_to_move,
            king_squares: game.king_squares,
            castling_rights: game.castling_rights,
            en_passant_square: game.en_passant_square,
            halfmove_clock: game.halfmove_clock,
            fullmove_number: game.fullmove_number,
            draw_reason: game.draw_reason,
            zobrist_key: game.zobrist_key,
            log_len: game.undo_stack.len(),
        }
    }

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("square should parse")
    }

    fn play(game: &mut GameState, text: &str) {
        let mv = game.resolve_move(text).expect("move should be legal");
        game.make_move(&mv);
    }

    fn walk_round_trips(game: &mut GameState, depth: u32) {
        if depth == 0 {
            return;
        }
        for mv in game.legal_moves() {
            let before = snapshot(game);
            game.make_move(&mv);
            let mover = mv.moving_piece.color;
            assert!(is_king_safe_on(&game.board, mover, game.king_square(mover)));
            for color in [Color::Light, Color::Dark] {
                assert_eq!(game.board.find_king(color), Some(game.king_square(color)));
            }
            walk_round_trips(game, depth - 1);
            let undone = game.undo_move().expect("undo should return the move");
            assert_eq!(undone, mv);
            assert_eq!(snapshot(game), before, "round trip of {mv} changed the state");
        }
    }

    #[test]
    fn apply_undo_round_trips_to_depth_two() {
        let fens = [
            crate::game_state::chess_rules::STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            walk_round_trips(&mut game, 2);
        }
    }

    #[test]
    fn castling_moves_king_and_rook_and_undo_restores_both() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut game, "e1g1");
        assert_eq!(game.board.piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
        assert_eq!(game.board.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(game.board.is_empty(sq("h1")));
        assert!(!game.castling_rights.light_kingside);
        assert!(!game.castling_rights.light_queenside);
        assert!(game.castling_rights.dark_kingside);

        play(&mut game, "e8c8");
        assert_eq!(game.board.piece_at(sq("d8")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(game.board.is_empty(sq("a8")));

        game.undo_move();
        game.undo_move();
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn rook_capture_on_home_square_revokes_that_right() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut game, "a1a8");
        assert!(!game.castling_rights.light_queenside);
        assert!(!game.castling_rights.dark_queenside);
        assert!(game.castling_rights.light_kingside);
        assert!(game.castling_rights.dark_kingside);
    }

    #[test]
    fn en_passant_window_lasts_one_move() {
        let mut game = GameState::new_game();
        play(&mut game, "e2e4");
        assert_eq!(game.en_passant_square, Some(sq("e3")));
        play(&mut game, "a7a6");
        assert_eq!(game.en_passant_square, None);
        play(&mut game, "e4e5");
        play(&mut game, "d7d5");
        assert_eq!(game.en_passant_square, Some(sq("d6")));

        let capture = game.resolve_move("e5d6").expect("en passant should be legal");
        assert!(capture.is_en_passant);
        game.make_move(&capture);
        assert!(game.board.is_empty(sq("d5")));
        assert_eq!(game.board.piece_at(sq("d6")).map(|p| p.kind), Some(PieceKind::Pawn));

        game.undo_move();
        assert_eq!(game.board.piece_at(sq("d5")).map(|p| p.color), Some(Color::Dark));
        assert_eq!(game.en_passant_square, Some(sq("d6")));

        // Letting the window pass forfeits the capture.
        play(&mut game, "h2h3");
        play(&mut game, "h7h6");
        assert!(game.resolve_move("e5d6").is_err());
    }

    #[test]
    fn promotion_places_chosen_piece_and_undo_restores_pawn() {
        let mut game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        play(&mut game, "a7a8n");
        assert_eq!(
            game.board.piece_at(sq("a8")),
            Some(Piece::new(Color::Light, PieceKind::Knight))
        );
        game.undo_move();
        assert_eq!(
            game.board.piece_at(sq("a7")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
    }

    #[test]
    fn halfmove_clock_resets_and_fifty_moves_draw() {
        let mut game = GameState::new_game();
        play(&mut game, "g1f3");
        assert_eq!(game.halfmove_clock, 1);
        play(&mut game, "e7e5");
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 2);

        let mut capture =
            GameState::from_fen("4k3/8/8/3p4/8/4N3/8/4K3 w - - 0 1").expect("FEN should parse");
        capture.halfmove_clock = 7;
        play(&mut capture, "e3d5");
        assert_eq!(capture.halfmove_clock, 0);
        capture.undo_move();
        assert_eq!(capture.halfmove_clock, 7);

        let mut near_limit =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        near_limit.halfmove_clock = 49;
        play(&mut near_limit, "a1a2");
        assert_eq!(near_limit.halfmove_clock, 50);
        assert_eq!(near_limit.draw_reason, Some(DrawReason::FiftyMoveRule));
        near_limit.undo_move();
        assert_eq!(near_limit.halfmove_clock, 49);
        assert_eq!(near_limit.draw_reason, None);
    }
}

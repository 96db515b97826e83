//! FEN-to-GameState parser.
//!
//! Every field is validated. The en passant and half-move fields are checked
//! for shape but do not feed the position: the parsed state starts with no en
//! passant target and a zero half-move clock. The full-move field sets the
//! turn counter. A four-field FEN (no counters) is accepted with the counters
//! defaulting to 0 and 1.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 && parts.len() != 4 {
        return Err(ChessErrors::InvalidFenString(format!(
            "expected 6 fields, found {}",
            parts.len()
        )));
    }

    let board = parse_board(parts[0])?;
    let side_to_move = parse_side_to_move(parts[1])?;
    let castling_rights = parse_castling_rights(parts[2])?;
    parse_en_passant_square(parts[3])?;

    let fullmove_number = if parts.len() == 6 {
        parts[4]
            .parse::<u16>()
            .map_err(|_| ChessErrors::InvalidFenString(format!("halfmove clock '{}'", parts[4])))?;
        parts[5].parse::<u16>().map_err(|_| {
            ChessErrors::InvalidFenString(format!("fullmove number '{}'", parts[5]))
        })?
    } else {
        1
    };

    GameState::from_position(board, side_to_move, castling_rights, fullmove_number)
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenString(format!(
            "board layout must contain 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut board = Board::empty();

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenString(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col += empty_count as usize;
                if col > 8 {
                    break;
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ChessErrors::InvalidFenToken(ch))?;

            if col >= 8 {
                col += 1;
                break;
            }

            board.place(Square::new(row as u8, col as u8), piece);
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFenString(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessErrors::InvalidFenString(format!(
            "side-to-move field '{side_part}'"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;

    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => &mut rights.light_kingside,
            'Q' => &mut rights.light_queenside,
            'k' => &mut rights.dark_kingside,
            'q' => &mut rights.dark_queenside,
            _ => {
                return Err(ChessErrors::InvalidFenString(format!(
                    "castling rights character '{ch}'"
                )))
            }
        };
        if *flag {
            return Err(ChessErrors::InvalidFenString(format!(
                "castling rights character '{ch}' repeated"
            )));
        }
        *flag = true;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part).map_err(|_| {
        ChessErrors::InvalidFenString(format!("en passant field '{en_passant_part}'"))
    })?;
    if square.rank() != 3 && square.rank() != 6 {
        return Err(ChessErrors::InvalidFenString(format!(
            "en passant square {square} is not on the third or sixth rank"
        )));
    }
    Ok(Some(square))
}

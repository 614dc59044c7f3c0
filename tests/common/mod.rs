//! Positions from FEN, via shakmaty, for comparing against a reference move generator.

#![allow(dead_code)]

use std::collections::BTreeSet;

use shakmaty::{CastlingMode, CastlingSide, Chess, EnPassantMode, Position, Square, fen::Fen};

use heuristic_chess::ai::legal_moves;
use heuristic_chess::board::Board;
use heuristic_chess::location::Location;
use heuristic_chess::piece::{Color, Piece, PieceType};

pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub fn chess(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .expect("valid FEN")
        .into_position(CastlingMode::Standard)
        .expect("valid position")
}

pub fn location(square: Square) -> Location {
    square.to_string().parse().expect("shakmaty squares are valid")
}

fn color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

/// Our board and side to move for a shakmaty position.
///
/// Kings and rooks are unmoved only where a castling right needs them,
/// and the pawn behind the en passant square carries the en passant flag.
pub fn board_from_position(pos: &Chess) -> (Board, Color) {
    let castles = pos.castles();
    let ep_square = pos.ep_square(EnPassantMode::Always);
    let mut board = Board::empty();

    for square in Square::ALL {
        let Some(piece) = pos.board().piece_at(square) else {
            continue;
        };
        let piece_type = PieceType::from_char(piece.role.char()).expect("known role");
        let mut ours = Piece::new(piece_type, color(piece.color));
        ours.has_moved = match piece_type {
            PieceType::King => !CastlingSide::ALL
                .iter()
                .any(|&side| castles.has(piece.color, side)),
            PieceType::Rook => !CastlingSide::ALL
                .iter()
                .any(|&side| castles.rook(piece.color, side) == Some(square)),
            PieceType::Pawn => location(square).rank() != ours.color.pawn_rank(),
            _ => true,
        };
        // The passed pawn stands one rank behind the en passant square, from the mover's view
        ours.can_be_taken_by_en_passant = piece_type == PieceType::Pawn
            && piece.color != pos.turn()
            && ep_square.is_some_and(|ep| {
                let (ep, at) = (location(ep), location(square));
                ep.file() == at.file() && ep.rank().abs_diff(at.rank()) == 1
            });
        board.set_piece(ours, location(square));
    }

    (board, color(pos.turn()))
}

pub fn board_from_fen(fen: &str) -> (Board, Color) {
    board_from_position(&chess(fen))
}

/// Legal moves in coordinate notation, castles as `O-O` and `O-O-O`.
pub fn reference_moves(pos: &Chess) -> BTreeSet<String> {
    pos.legal_moves().iter().map(reference_name).collect()
}

pub fn reference_name(mv: &shakmaty::Move) -> String {
    match mv {
        shakmaty::Move::Castle { king, rook } if location(*rook).file() > location(*king).file() => {
            "O-O".to_string()
        }
        shakmaty::Move::Castle { .. } => "O-O-O".to_string(),
        _ => format!("{}{}", mv.from().expect("board moves have a source"), mv.to()),
    }
}

pub fn our_moves(board: &Board, color: Color) -> BTreeSet<String> {
    legal_moves(board, color).iter().map(ToString::to_string).collect()
}

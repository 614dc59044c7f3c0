use crate::board::Board;
use crate::location::{Location, Stride};
use crate::piece::PieceType;

const ORTHOGONAL: [Stride; 4] = [
    Stride::new(0, 1),
    Stride::new(0, -1),
    Stride::new(-1, 0),
    Stride::new(1, 0),
];

const DIAGONAL: [Stride; 4] = [
    Stride::new(1, 1),
    Stride::new(-1, 1),
    Stride::new(1, -1),
    Stride::new(-1, -1),
];

const KNIGHT_OFFSETS: [Stride; 8] = [
    Stride::new(1, 2),
    Stride::new(2, 1),
    Stride::new(2, -1),
    Stride::new(-2, 1),
    Stride::new(-1, -2),
    Stride::new(-2, -1),
    Stride::new(1, -2),
    Stride::new(-1, 2),
];

/// Unit offsets around a square, clockwise from north.
pub const KING_OFFSETS: [Stride; 8] = [
    Stride::new(0, 1),
    Stride::new(1, 1),
    Stride::new(1, 0),
    Stride::new(1, -1),
    Stride::new(0, -1),
    Stride::new(-1, -1),
    Stride::new(-1, 0),
    Stride::new(-1, 1),
];

/// How a piece type travels across the board.
///
/// Turn order is not considered here; that belongs to the player. Castling is
/// a compound board operation and is not a king movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Movement {
    /// Whether the piece on `from` may occupy `to`, ignoring check.
    pub fn can_move(self, from: Location, to: Location, board: &Board) -> bool {
        if from == to {
            return false;
        }
        let Some(piece) = board.piece(from) else {
            return false;
        };
        if let Some(target) = board.piece(to)
            && (target.color == piece.color || target.piece_type == PieceType::King)
        {
            return false;
        }

        match self {
            Movement::Rook => can_slide(from, to, board, &ORTHOGONAL),
            Movement::Bishop => can_slide(from, to, board, &DIAGONAL),
            Movement::Queen => {
                can_slide(from, to, board, &ORTHOGONAL) || can_slide(from, to, board, &DIAGONAL)
            }
            Movement::Knight => reaches_by_offset(from, to, &KNIGHT_OFFSETS),
            Movement::King => reaches_by_offset(from, to, &KING_OFFSETS),
            Movement::Pawn => can_pawn_move(from, to, board),
        }
    }

    /// Like [`Movement::can_move`], but also rejects moves that would leave
    /// the mover's own king in check.
    pub fn can_move_safely(self, from: Location, to: Location, board: &Board) -> bool {
        if !self.can_move(from, to, board) {
            return false;
        }
        let Some(piece) = board.piece(from) else {
            return false;
        };

        let mut after = board.clone();
        after.move_piece(from, to);
        !after.is_color_in_check(piece.color)
    }
}

/// Walk each stride outwards from `from`; only empty squares may be passed.
///
/// Occupancy of `to` itself has already been checked by the caller.
fn can_slide(from: Location, to: Location, board: &Board, strides: &[Stride]) -> bool {
    strides.iter().any(|&stride| {
        let mut location = from;
        while let Some(next) = location.offset(stride) {
            if next == to {
                return true;
            }
            if board.piece(next).is_some() {
                return false;
            }
            location = next;
        }
        false
    })
}

fn reaches_by_offset(from: Location, to: Location, offsets: &[Stride]) -> bool {
    offsets.iter().any(|&offset| from.offset(offset) == Some(to))
}

fn can_pawn_move(from: Location, to: Location, board: &Board) -> bool {
    let Some(pawn) = board.piece(from) else {
        return false;
    };
    let forward = pawn.color.forward();
    let stride = from.stride_to(to);

    // Straight ahead: never a capture
    if stride.dx == 0 {
        if board.piece(to).is_some() {
            return false;
        }
        if stride.dy == forward {
            return true;
        }
        return stride.dy == 2 * forward
            && from.rank() == pawn.color.pawn_rank()
            && from
                .offset(Stride::new(0, forward))
                .is_some_and(|between| board.piece(between).is_none());
    }

    if stride.dx.abs() != 1 || stride.dy != forward {
        return false;
    }

    if board.piece(to).is_some() {
        // Friendly pieces and kings were rejected by the caller
        return true;
    }

    // En passant: the pawn being passed sits beside us, in the target's file
    Location::from_coords(to.file(), from.rank())
        .and_then(|beside| board.piece(beside))
        .is_some_and(|passed| {
            passed.piece_type == PieceType::Pawn
                && passed.color != pawn.color
                && passed.can_be_taken_by_en_passant
        })
}

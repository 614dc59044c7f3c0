//! Book of well-known openings the computer plays before thinking for itself.

use crate::board::Board;
use crate::location::Location;
use crate::piece::Color;

/// A named line of plies from the standard starting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    pub name: &'static str,
    pub plies: &'static [(Location, Location)],
}

pub const OPENINGS: [Opening; 5] = [
    Opening {
        name: "Ruy Lopez",
        plies: &[
            (Location::E2, Location::E4),
            (Location::E7, Location::E5),
            (Location::G1, Location::F3),
            (Location::B8, Location::C6),
            (Location::F1, Location::B5),
        ],
    },
    Opening {
        name: "Italian Game",
        plies: &[
            (Location::E2, Location::E4),
            (Location::E7, Location::E5),
            (Location::G1, Location::F3),
            (Location::B8, Location::C6),
            (Location::F1, Location::C4),
        ],
    },
    Opening {
        name: "Sicilian Defense",
        plies: &[(Location::E2, Location::E4), (Location::C7, Location::C5)],
    },
    Opening {
        name: "Queen's Gambit",
        plies: &[
            (Location::D2, Location::D4),
            (Location::D7, Location::D5),
            (Location::C2, Location::C4),
        ],
    },
    Opening {
        name: "King's Gambit",
        plies: &[
            (Location::E2, Location::E4),
            (Location::E7, Location::E5),
            (Location::F2, Location::F4),
        ],
    },
];

/// A book ply together with the position it is played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningMove {
    pub opening: &'static str,
    pub board: Board,
    pub from: Location,
    pub to: Location,
}

impl Opening {
    /// Replays the line on a fresh board, keeping only `color`'s plies.
    pub fn moves(&self, color: Color) -> Vec<OpeningMove> {
        let first = match color {
            Color::White => 0,
            Color::Black => 1,
        };
        let mut board = Board::new_game();
        let mut moves = Vec::new();
        for (index, &(from, to)) in self.plies.iter().enumerate() {
            if index % 2 == first {
                moves.push(OpeningMove {
                    opening: self.name,
                    board: board.clone(),
                    from,
                    to,
                });
            }
            board.move_piece(from, to);
        }
        moves
    }
}

pub fn all_opening_moves(color: Color) -> Vec<OpeningMove> {
    OPENINGS.iter().flat_map(|opening| opening.moves(color)).collect()
}

#[derive(Debug, Clone)]
pub struct OpeningBook {
    white: Vec<OpeningMove>,
    black: Vec<OpeningMove>,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl OpeningBook {
    pub fn standard() -> Self {
        Self {
            white: all_opening_moves(Color::White),
            black: all_opening_moves(Color::Black),
        }
    }

    /// A book that never has a move.
    pub fn empty() -> Self {
        Self {
            white: Vec::new(),
            black: Vec::new(),
        }
    }

    /// Every entry for `color` recorded at the current layout.
    pub fn candidates(&self, board: &Board, color: Color) -> Vec<&OpeningMove> {
        let moves = match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        };
        moves
            .iter()
            .filter(|entry| entry.board.same_layout(board))
            .collect()
    }

    /// Pick one candidate uniformly at random.
    pub fn choose(
        &self,
        board: &Board,
        color: Color,
        rng: &mut fastrand::Rng,
    ) -> Option<&OpeningMove> {
        let candidates = self.candidates(board, color);
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.usize(..candidates.len())])
    }
}

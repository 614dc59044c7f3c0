//! Boards drawn as text, for fixtures and opening tables.
//!
//! The art lists 64 non-whitespace characters, rank 8 first and file a first
//! within each rank. `KQRBNP` are white pieces, `kqrbnp` black pieces, and
//! `-` or `.` an empty square. Any other character marks an empty square that
//! can be looked up with [`AsciiBoard::location_of`].

use thiserror::Error;

use crate::board::Board;
use crate::location::{Location, NUM_SQUARES};
use crate::piece::{Color, Piece, PieceType};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AsciiBoardError {
    #[error("board art has {0} squares, expected 64")]
    WrongSquareCount(usize),
}

#[derive(Debug, Clone)]
pub struct AsciiBoard {
    /// Indexed by [`Location::index`].
    cells: [char; NUM_SQUARES],
}

impl AsciiBoard {
    pub fn new(art: &str) -> Result<Self, AsciiBoardError> {
        let chars: Vec<char> = art.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != NUM_SQUARES {
            return Err(AsciiBoardError::WrongSquareCount(chars.len()));
        }

        let mut cells = ['-'; NUM_SQUARES];
        for (i, c) in chars.into_iter().enumerate() {
            let (row, file) = (i / 8, i % 8);
            let rank = 7 - row;
            cells[rank * 8 + file] = c;
        }
        Ok(Self { cells })
    }

    /// The pieces drawn, tagged in a1..h8 order starting at 1.
    pub fn board(&self) -> Board {
        let mut board = Board::empty();
        let mut tag = 0;
        for location in Location::ALL {
            if let Some((piece_type, color)) = piece_for(self.cells[location.index()]) {
                tag += 1;
                board.set_piece(Piece::with_tag(piece_type, color, tag), location);
            }
        }
        board
    }

    /// First square (from a1) drawn with `c`.
    pub fn location_of(&self, c: char) -> Option<Location> {
        self.locations_of(c).into_iter().next()
    }

    pub fn locations_of(&self, c: char) -> Vec<Location> {
        Location::ALL
            .into_iter()
            .filter(|location| self.cells[location.index()] == c)
            .collect()
    }
}

fn piece_for(c: char) -> Option<(PieceType, Color)> {
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    PieceType::from_char(c).map(|piece_type| (piece_type, color))
}

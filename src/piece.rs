use std::fmt;

use crate::movement::Movement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank pawns of this color start on.
    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank the major pieces of this color start on.
    #[inline]
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Types a pawn may promote to, in the order they are offered.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Bishop,
    ];

    /// Material value. The king has no trade value.
    pub const fn value(self) -> f64 {
        match self {
            PieceType::Pawn => 1.0,
            PieceType::Knight | PieceType::Bishop => 3.0,
            PieceType::Rook => 5.0,
            PieceType::Queen => 9.0,
            PieceType::King => 0.0,
        }
    }

    pub const fn movement(self) -> Movement {
        match self {
            PieceType::Pawn => Movement::Pawn,
            PieceType::Knight => Movement::Knight,
            PieceType::Bishop => Movement::Bishop,
            PieceType::Rook => Movement::Rook,
            PieceType::Queen => Movement::Queen,
            PieceType::King => Movement::King,
        }
    }

    pub const fn char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Parse a piece letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A piece standing on the board.
///
/// The `tag` stays with the piece for its whole life (including promotion) so
/// that a view layer can match sprites across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub tag: u32,
    pub has_moved: bool,
    pub can_be_taken_by_en_passant: bool,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self::with_tag(piece_type, color, 0)
    }

    pub const fn with_tag(piece_type: PieceType, color: Color, tag: u32) -> Self {
        Self {
            piece_type,
            color,
            tag,
            has_moved: false,
            can_be_taken_by_en_passant: false,
        }
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.piece_type.value()
    }

    #[inline]
    pub const fn movement(&self) -> Movement {
        self.piece_type.movement()
    }

    #[inline]
    pub fn is(&self, piece_type: PieceType, color: Color) -> bool {
        self.piece_type == piece_type && self.color == color
    }

    /// Same type and tag, other side.
    pub const fn with_opposite_color(&self) -> Self {
        Self::with_tag(self.piece_type, self.color.opposite(), self.tag)
    }

    /// Promotion result: new type, same identity.
    pub const fn with_type(&self, piece_type: PieceType) -> Self {
        Self {
            piece_type,
            ..*self
        }
    }

    pub fn is_same_type_and_color(&self, other: &Piece) -> bool {
        self.is(other.piece_type, other.color)
    }

    pub fn char(&self) -> char {
        match self.color {
            Color::White => self.piece_type.char().to_ascii_uppercase(),
            Color::Black => self.piece_type.char(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of squares on the board
pub const NUM_SQUARES: usize = 64;

/// Board square (0-63: a1=0, h1=7, a8=56, h8=63)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(u8);

/// Signed (dx, dy) displacement between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride {
    pub dx: i8,
    pub dy: i8,
}

impl Stride {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }
}

/// Error when parsing algebraic square notation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseLocationError(pub String);

impl Location {
    /// Every square, a1 first, rank-major.
    pub const ALL: [Location; NUM_SQUARES] = {
        let mut all = [Location(0); NUM_SQUARES];
        let mut index = 0;
        while index < NUM_SQUARES {
            all[index] = Location(index as u8);
            index += 1;
        }
        all
    };

    pub const fn new(index: u8) -> Option<Self> {
        if index < NUM_SQUARES as u8 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Square at the given file (x) and rank (y), both 0-7.
    pub const fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Self((rank * 8 + file) as u8))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> i8 {
        (self.0 % 8) as i8
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        (self.0 / 8) as i8
    }

    /// Apply a stride, returning `None` if it would leave the board.
    #[inline]
    pub const fn offset(self, stride: Stride) -> Option<Self> {
        Self::from_coords(self.file() + stride.dx, self.rank() + stride.dy)
    }

    pub const fn stride_to(self, other: Location) -> Stride {
        Stride::new(other.file() - self.file(), other.rank() - self.rank())
    }

    /// The same square seen from the other side of the board.
    pub const fn mirrored(self) -> Self {
        Self((7 - self.rank() as u8) * 8 + self.file() as u8)
    }

    fn file_char(self) -> char {
        (b'a' + self.file() as u8) as char
    }

    fn rank_char(self) -> char {
        (b'1' + self.rank() as u8) as char
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLocationError(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let file = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return Err(err()),
        };
        let rank = match rank {
            c @ '1'..='8' => c as u8 - b'1',
            _ => return Err(err()),
        };
        Location::from_coords(file as i8, rank as i8).ok_or_else(err)
    }
}

macro_rules! named_locations {
    ($($name:ident = $index:expr),* $(,)?) => {
        impl Location {
            $(pub const $name: Location = Location($index);)*
        }
    };
}

named_locations! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_all_is_ordered_by_index() {
        for (index, location) in Location::ALL.iter().enumerate() {
            assert_eq!(location.index(), index);
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Location::new(63), Some(Location::H8));
        assert_eq!(Location::new(64), None);
    }

    #[test_case("a1", 0)]
    #[test_case("h1", 7)]
    #[test_case("e4", 28)]
    #[test_case("a8", 56)]
    #[test_case("H8", 63)]
    fn test_parse_algebraic(name: &str, index: usize) {
        let location: Location = name.parse().expect("valid square");
        assert_eq!(location.index(), index);
    }

    #[test_case("")]
    #[test_case("e")]
    #[test_case("i1")]
    #[test_case("a9")]
    #[test_case("e45")]
    fn test_parse_rejects_invalid(name: &str) {
        assert_eq!(
            name.parse::<Location>(),
            Err(ParseLocationError(name.to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        assert_eq!(Location::G7.to_string(), "g7");
        assert_eq!("g7".parse::<Location>(), Ok(Location::G7));
    }

    #[test]
    fn test_offset_does_not_wrap() {
        assert_eq!(Location::H4.offset(Stride::new(1, 0)), None);
        assert_eq!(Location::A4.offset(Stride::new(-1, 0)), None);
        assert_eq!(Location::E8.offset(Stride::new(0, 1)), None);
        assert_eq!(Location::E1.offset(Stride::new(0, -1)), None);
        assert_eq!(Location::E4.offset(Stride::new(1, 1)), Some(Location::F5));
    }

    #[test]
    fn test_mirrored_flips_rank() {
        assert_eq!(Location::E1.mirrored(), Location::E8);
        assert_eq!(Location::B3.mirrored(), Location::B6);
    }

    #[test]
    fn test_stride_to() {
        assert_eq!(Location::B1.stride_to(Location::C3), Stride::new(1, 2));
    }
}

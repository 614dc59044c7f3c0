use std::fmt;

use crate::location::{Location, NUM_SQUARES};
use crate::piece::{Color, Piece, PieceType};

/// Kind of observable change produced by a board mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Move,
    Remove,
    Transform,
}

/// One observable change, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOperation {
    pub kind: OperationKind,
    pub piece: Piece,
    pub location: Location,
}

impl BoardOperation {
    pub const fn new(kind: OperationKind, piece: Piece, location: Location) -> Self {
        Self {
            kind,
            piece,
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];
}

/// Start and end squares of the king and rook for one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleMove {
    pub king_start: Location,
    pub king_end: Location,
    pub rook_start: Location,
    pub rook_end: Location,
}

impl CastleMove {
    pub const fn new(color: Color, side: CastleSide) -> Self {
        let rank = color.back_rank();
        let (rook_file, king_end_file, rook_end_file) = match side {
            CastleSide::KingSide => (7, 6, 5),
            CastleSide::QueenSide => (0, 2, 3),
        };
        Self {
            king_start: square(4, rank),
            king_end: square(king_end_file, rank),
            rook_start: square(rook_file, rank),
            rook_end: square(rook_end_file, rank),
        }
    }
}

const fn square(file: i8, rank: i8) -> Location {
    match Location::from_coords(file, rank) {
        Some(location) => location,
        None => panic!("castle squares are on the board"),
    }
}

const BACK_ROW: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The 64-square position.
///
/// `Board` is a plain value: cloning it copies every square and every piece
/// flag, so speculative moves are always made on a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
        }
    }

    /// Standard starting position. Pieces are tagged 1..=32.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        let mut tag = 0;
        for color in Color::ALL {
            for (file, piece_type) in BACK_ROW.iter().enumerate() {
                for (rank, piece_type) in [
                    (color.back_rank(), *piece_type),
                    (color.pawn_rank(), PieceType::Pawn),
                ] {
                    tag += 1;
                    let location = square(file as i8, rank);
                    board.set_piece(Piece::with_tag(piece_type, color, tag), location);
                }
            }
        }
        board
    }

    // Pieces

    #[inline]
    pub fn piece(&self, location: Location) -> Option<Piece> {
        self.squares[location.index()]
    }

    #[inline]
    pub fn set_piece(&mut self, piece: Piece, location: Location) {
        self.squares[location.index()] = Some(piece);
    }

    #[inline]
    pub fn remove_piece(&mut self, location: Location) -> Option<Piece> {
        self.squares[location.index()].take()
    }

    /// Occupied squares, a1 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Location, Piece)> + '_ {
        Location::ALL
            .iter()
            .filter_map(|&location| self.piece(location).map(|piece| (location, piece)))
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Location, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    pub fn piece_locations(&self, color: Color) -> Vec<Location> {
        self.pieces(color).map(|(location, _)| location).collect()
    }

    pub fn king_location(&self, color: Color) -> Option<Location> {
        self.pieces(color)
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(location, _)| location)
    }

    pub fn does_color_occupy(&self, color: Color, location: Location) -> bool {
        self.piece(location).is_some_and(|piece| piece.color == color)
    }

    /// Whether any piece of `color` could move to `location`, ignoring check.
    pub fn can_color_move_any_piece_to(&self, color: Color, location: Location) -> bool {
        self.pieces(color)
            .any(|(from, piece)| piece.movement().can_move(from, location, self))
    }

    /// Legal destinations for the piece on `from`.
    pub fn possible_move_locations(&self, from: Location) -> Vec<Location> {
        let Some(piece) = self.piece(from) else {
            return Vec::new();
        };
        Location::ALL
            .into_iter()
            .filter(|&to| piece.movement().can_move_safely(from, to, self))
            .collect()
    }

    /// Whether both boards have the same piece types and colors on every
    /// square, ignoring tags and move flags.
    pub fn same_layout(&self, other: &Board) -> bool {
        self.squares
            .iter()
            .zip(other.squares.iter())
            .all(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => a.is_same_type_and_color(b),
                (None, None) => true,
                _ => false,
            })
    }

    // Moving

    /// Move the piece on `from` to `to`, which must be legal for it.
    ///
    /// Returns the operations in order: a capture removal, the move itself,
    /// then an en passant removal.
    pub fn move_piece(&mut self, from: Location, to: Location) -> Vec<BoardOperation> {
        if from == to {
            return Vec::new();
        }
        let Some(mut piece) = self.piece(from) else {
            log::warn!("no piece to move on {from}");
            return Vec::new();
        };

        let mut operations = Vec::with_capacity(2);

        if let Some(captured) = self.remove_piece(to) {
            operations.push(BoardOperation::new(OperationKind::Remove, captured, to));
        }

        // A pawn stepping diagonally onto an empty square takes en passant
        let en_passant = if piece.piece_type == PieceType::Pawn
            && from.file() != to.file()
            && operations.is_empty()
        {
            Location::from_coords(to.file(), from.rank())
                .filter(|&beside| {
                    self.piece(beside).is_some_and(|passed| {
                        passed.color != piece.color && passed.can_be_taken_by_en_passant
                    })
                })
                .and_then(|beside| Some((beside, self.remove_piece(beside)?)))
        } else {
            None
        };

        for passed in self.squares.iter_mut().flatten() {
            passed.can_be_taken_by_en_passant = false;
        }

        piece.has_moved = true;
        if piece.piece_type == PieceType::Pawn
            && from.rank() == piece.color.pawn_rank()
            && (to.rank() - from.rank()).abs() == 2
        {
            piece.can_be_taken_by_en_passant = true;
        }

        self.squares[from.index()] = None;
        self.set_piece(piece, to);
        operations.push(BoardOperation::new(OperationKind::Move, piece, to));

        if let Some((beside, passed)) = en_passant {
            operations.push(BoardOperation::new(OperationKind::Remove, passed, beside));
        }

        for operation in &operations {
            log::trace!("{:?} {} on {}", operation.kind, operation.piece, operation.location);
        }
        operations
    }

    /// Change the type of the piece on `location`, keeping its identity.
    pub fn transform_piece(
        &mut self,
        location: Location,
        piece_type: PieceType,
    ) -> Option<BoardOperation> {
        let piece = self.piece(location)?.with_type(piece_type);
        self.set_piece(piece, location);
        Some(BoardOperation::new(OperationKind::Transform, piece, location))
    }

    // Check

    /// Locations of the pieces giving check to `color`'s king.
    pub fn checkers(&self, color: Color) -> Vec<Location> {
        let Some((stand_in, king)) = self.with_king_as_pawn(color) else {
            return Vec::new();
        };
        stand_in
            .pieces(color.opposite())
            .filter(|(from, piece)| piece.movement().can_move(*from, king, &stand_in))
            .map(|(from, _)| from)
            .collect()
    }

    pub fn is_color_in_check(&self, color: Color) -> bool {
        let Some((stand_in, king)) = self.with_king_as_pawn(color) else {
            return false;
        };
        stand_in
            .pieces(color.opposite())
            .any(|(from, piece)| piece.movement().can_move(from, king, &stand_in))
    }

    /// Copy of the board with `color`'s king swapped for a pawn of the same
    /// color, so the movement rules treat its square as capturable.
    fn with_king_as_pawn(&self, color: Color) -> Option<(Board, Location)> {
        let king = self.king_location(color)?;
        let mut stand_in = self.clone();
        stand_in.set_piece(Piece::new(PieceType::Pawn, color), king);
        Some((stand_in, king))
    }

    pub fn is_color_in_checkmate(&self, color: Color) -> bool {
        self.is_color_in_check(color) && !self.is_color_able_to_move(color)
    }

    /// Whether `color` has any move that does not leave its king in check.
    pub fn is_color_able_to_move(&self, color: Color) -> bool {
        self.pieces(color).any(|(from, piece)| {
            Location::ALL
                .into_iter()
                .any(|to| piece.movement().can_move_safely(from, to, self))
        })
    }

    pub fn is_color_in_stalemate(&self, color: Color) -> bool {
        !self.is_color_able_to_move(color) && !self.is_color_in_checkmate(color)
    }

    // Castling

    pub fn can_color_castle(&self, color: Color, side: CastleSide) -> bool {
        let castle = CastleMove::new(color, side);

        let unmoved = |location: Location, piece_type: PieceType| {
            self.piece(location)
                .is_some_and(|piece| piece.is(piece_type, color) && !piece.has_moved)
        };
        if !unmoved(castle.king_start, PieceType::King)
            || !unmoved(castle.rook_start, PieceType::Rook)
        {
            return false;
        }

        let rank = castle.king_start.rank();
        let (low, high) = ordered(castle.king_start.file(), castle.rook_start.file());
        let blocked = (low + 1..high)
            .filter_map(|file| Location::from_coords(file, rank))
            .any(|between| self.piece(between).is_some());
        if blocked || self.is_color_in_check(color) {
            return false;
        }

        // The king may not pass through or land on an attacked square
        let (low, high) = ordered(castle.king_start.file(), castle.king_end.file());
        (low..=high)
            .filter_map(|file| Location::from_coords(file, rank))
            .filter(|&step| step != castle.king_start)
            .all(|step| {
                let mut after = self.clone();
                after.move_piece(castle.king_start, step);
                !after.is_color_in_check(color)
            })
    }

    /// Move king then rook. Callers check [`Board::can_color_castle`] first.
    pub fn perform_castle(&mut self, color: Color, side: CastleSide) -> Vec<BoardOperation> {
        let castle = CastleMove::new(color, side);
        let mut operations = self.move_piece(castle.king_start, castle.king_end);
        operations.extend(self.move_piece(castle.rook_start, castle.rook_end));
        operations
    }

    // Promotion

    /// Pawns of `color` standing on the opponent's back rank.
    pub fn locations_of_promotable_pawns(&self, color: Color) -> Vec<Location> {
        let last_rank = color.opposite().back_rank();
        self.pieces(color)
            .filter(|(location, piece)| {
                piece.piece_type == PieceType::Pawn && location.rank() == last_rank
            })
            .map(|(location, _)| location)
            .collect()
    }

    /// The position seen from the other side: ranks flipped, colors swapped.
    pub fn color_inverted(&self) -> Board {
        let mut inverted = Board::empty();
        for (location, piece) in self.occupied() {
            let mut flipped = piece;
            flipped.color = piece.color.opposite();
            inverted.set_piece(flipped, location.mirrored());
        }
        inverted
    }
}

fn ordered(a: i8, b: i8) -> (i8, i8) {
    if a < b { (a, b) } else { (b, a) }
}

/// Rank 8 first, one character per square, `-` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let location = square(file, rank);
                let c = self.piece(location).map_or('-', |piece| piece.char());
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::AsciiBoard;
    use crate::movement::Movement;
    use test_case::test_case;

    fn board_from(art: &str) -> Board {
        AsciiBoard::new(art).expect("valid board art").board()
    }

    fn material(board: &Board) -> f64 {
        board.occupied().map(|(_, piece)| piece.value()).sum()
    }

    #[test]
    fn test_empty_board_contains_no_pieces() {
        let board = Board::empty();
        for location in Location::ALL {
            assert_eq!(board.piece(location), None, "expected {location} empty");
        }
    }

    #[test]
    fn test_new_game_contains_correct_pieces() {
        use PieceType::*;
        let expected = [
            (0, Rook, Color::White),
            (1, Knight, Color::White),
            (2, Bishop, Color::White),
            (3, Queen, Color::White),
            (4, King, Color::White),
            (5, Bishop, Color::White),
            (6, Knight, Color::White),
            (7, Rook, Color::White),
            (56, Rook, Color::Black),
            (57, Knight, Color::Black),
            (58, Bishop, Color::Black),
            (59, Queen, Color::Black),
            (60, King, Color::Black),
            (61, Bishop, Color::Black),
            (62, Knight, Color::Black),
            (63, Rook, Color::Black),
        ];
        let board = Board::new_game();

        for (index, piece_type, color) in expected {
            let location = Location::new(index).unwrap();
            let piece = board.piece(location).expect("piece on back rank");
            assert!(piece.is(piece_type, color), "unexpected {piece} on {location}");
        }
        for index in 8..16 {
            let piece = board.piece(Location::new(index).unwrap()).unwrap();
            assert!(piece.is(Pawn, Color::White));
        }
        for index in 48..56 {
            let piece = board.piece(Location::new(index).unwrap()).unwrap();
            assert!(piece.is(Pawn, Color::Black));
        }
        for index in 16..48 {
            assert_eq!(board.piece(Location::new(index).unwrap()), None);
        }
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn test_new_game_tags_are_unique() {
        let board = Board::new_game();
        let mut tags: Vec<u32> = board.occupied().map(|(_, piece)| piece.tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 32);
        assert!(!tags.contains(&0));
    }

    #[test]
    fn test_set_and_get_piece() {
        let mut board = Board::empty();
        let piece = Piece::new(PieceType::King, Color::Black);

        board.set_piece(piece, Location::F1);

        assert!(board.piece(Location::F1).unwrap().is_same_type_and_color(&piece));
    }

    #[test]
    fn test_king_location() {
        let mut board = Board::empty();
        board.set_piece(Piece::new(PieceType::King, Color::White), Location::F1);
        board.set_piece(Piece::new(PieceType::King, Color::Black), Location::C2);

        assert_eq!(board.king_location(Color::White), Some(Location::F1));
        assert_eq!(board.king_location(Color::Black), Some(Location::C2));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new_game();
        let mut copy = board.clone();

        copy.move_piece(Location::E2, Location::E4);

        assert!(board.piece(Location::E2).is_some());
        assert!(!board.piece(Location::E2).unwrap().has_moved);
        assert_eq!(board.piece(Location::E4), None);
    }

    #[test]
    fn test_move_to_same_square_is_noop() {
        let mut board = Board::new_game();
        assert!(board.move_piece(Location::E2, Location::E2).is_empty());
        assert_eq!(board, Board::new_game());
    }

    #[test]
    fn test_move_there_and_back_restores_occupancy() {
        let mut board = Board::new_game();
        let before = board.clone();

        board.move_piece(Location::G1, Location::F3);
        board.move_piece(Location::F3, Location::G1);

        assert!(board.same_layout(&before));
        assert_eq!(material(&board), material(&before));
    }

    #[test]
    fn test_capture_reports_removal_then_move() {
        let mut board = board_from(
            "- - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - p - - - -
             - - - - P - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -",
        );
        let captured = board.piece(Location::D5).unwrap();

        let operations = board.move_piece(Location::E4, Location::D5);

        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].kind, OperationKind::Remove);
        assert_eq!(operations[0].piece, captured);
        assert_eq!(operations[1].kind, OperationKind::Move);
        assert_eq!(operations[1].location, Location::D5);
        assert!(operations[1].piece.has_moved);
    }

    #[test]
    fn test_two_square_advance_flags_only_that_pawn() {
        let mut board = Board::new_game();

        board.move_piece(Location::E2, Location::E4);

        for (location, piece) in board.occupied() {
            assert_eq!(
                piece.can_be_taken_by_en_passant,
                location == Location::E4,
                "unexpected en passant flag on {location}"
            );
        }

        board.move_piece(Location::G8, Location::F6);
        assert!(board.occupied().all(|(_, piece)| !piece.can_be_taken_by_en_passant));
    }

    #[test]
    fn test_single_advance_does_not_flag() {
        let mut board = Board::new_game();
        board.move_piece(Location::E2, Location::E3);
        board.move_piece(Location::E3, Location::E5);
        assert!(!board.piece(Location::E5).unwrap().can_be_taken_by_en_passant);
    }

    #[test]
    fn test_en_passant_capture_removes_passed_pawn() {
        let mut board = Board::new_game();
        board.move_piece(Location::E2, Location::E4);
        board.move_piece(Location::A7, Location::A6);
        board.move_piece(Location::E4, Location::E5);
        board.move_piece(Location::D7, Location::D5);

        assert!(Movement::Pawn.can_move(Location::E5, Location::D6, &board));
        let passed = board.piece(Location::D5).unwrap();
        let operations = board.move_piece(Location::E5, Location::D6);

        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].kind, OperationKind::Move);
        assert_eq!(operations[1], BoardOperation::new(OperationKind::Remove, passed, Location::D5));
        assert_eq!(board.piece(Location::D5), None);
        assert!(board.piece(Location::D6).unwrap().is(PieceType::Pawn, Color::White));
    }

    #[test]
    fn test_en_passant_expires_after_one_move() {
        let mut board = Board::new_game();
        board.move_piece(Location::E2, Location::E4);
        board.move_piece(Location::A7, Location::A6);
        board.move_piece(Location::E4, Location::E5);
        board.move_piece(Location::D7, Location::D5);
        board.move_piece(Location::B1, Location::C3);
        board.move_piece(Location::A6, Location::A5);

        assert!(!Movement::Pawn.can_move(Location::E5, Location::D6, &board));
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let board = board_from(
            "- - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - q - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -",
        );
        assert!(!board.is_color_in_check(Color::White));
        assert!(!board.is_color_in_checkmate(Color::White));
    }

    #[test_case(
        "- - - - r - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - -", true; "rook on open file")]
    #[test_case(
        "- - - - r - - -
         - - - - - - - -
         - - - - - - - -
         - - - - P - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - -", false; "rook blocked")]
    #[test_case(
        "- - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - p - - - -
         - - - - K - - -", true; "pawn diagonal")]
    #[test_case(
        "- - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - p - - -
         - - - - K - - -", false; "pawn straight ahead")]
    #[test_case(
        "- - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - n - - - -
         - - - - - - - -
         - - - - K - - -", true; "knight")]
    fn test_white_in_check(art: &str, in_check: bool) {
        assert_eq!(board_from(art).is_color_in_check(Color::White), in_check);
    }

    #[test]
    fn test_checkers_lists_attackers() {
        let board = board_from(
            "- - - - r - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - n - - - -
             - - - - - - - -
             - - - - K - - -",
        );
        assert_eq!(board.checkers(Color::White), vec![Location::D3, Location::E8]);
    }

    #[test]
    fn test_back_rank_checkmate() {
        let board = board_from(
            "- - - - - - k -
             - - - - - p p p
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             R - - - - - K -",
        );
        let mut mated = board.clone();
        mated.move_piece(Location::A1, Location::A8);

        assert!(!board.is_color_in_checkmate(Color::Black));
        assert!(mated.is_color_in_check(Color::Black));
        assert!(mated.is_color_in_checkmate(Color::Black));
        assert!(!mated.is_color_in_stalemate(Color::Black));
    }

    #[test]
    fn test_check_that_can_be_blocked_is_not_mate() {
        let board = board_from(
            "R - - - - - k -
             - - - - - p p p
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - r - - - K -",
        );
        assert!(board.is_color_in_check(Color::Black));
        assert!(!board.is_color_in_checkmate(Color::Black));
    }

    #[test]
    fn test_stalemate() {
        let board = board_from(
            "k - - - - - - -
             - - - - - - - -
             - Q - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - K",
        );
        assert!(!board.is_color_in_check(Color::Black));
        assert!(!board.is_color_able_to_move(Color::Black));
        assert!(board.is_color_in_stalemate(Color::Black));
        assert!(!board.is_color_in_stalemate(Color::White));
    }

    #[test]
    fn test_castle_king_side_when_path_clear() {
        let mut board = Board::new_game();
        assert!(!board.can_color_castle(Color::White, CastleSide::KingSide));

        board.remove_piece(Location::F1);
        board.remove_piece(Location::G1);
        assert!(board.can_color_castle(Color::White, CastleSide::KingSide));
        assert!(!board.can_color_castle(Color::White, CastleSide::QueenSide));

        board.set_piece(Piece::new(PieceType::Bishop, Color::White), Location::F1);
        assert!(!board.can_color_castle(Color::White, CastleSide::KingSide));
    }

    #[test]
    fn test_castle_queen_side_requires_b_file_empty() {
        let mut board = Board::new_game();
        board.remove_piece(Location::C8);
        board.remove_piece(Location::D8);
        assert!(!board.can_color_castle(Color::Black, CastleSide::QueenSide));

        board.remove_piece(Location::B8);
        assert!(board.can_color_castle(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn test_perform_castle_moves_king_and_rook() {
        let mut board = Board::new_game();
        board.remove_piece(Location::F1);
        board.remove_piece(Location::G1);

        let operations = board.perform_castle(Color::White, CastleSide::KingSide);

        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].location, Location::G1);
        assert_eq!(operations[1].location, Location::F1);
        let king = board.piece(Location::G1).unwrap();
        let rook = board.piece(Location::F1).unwrap();
        assert!(king.is(PieceType::King, Color::White) && king.has_moved);
        assert!(rook.is(PieceType::Rook, Color::White) && rook.has_moved);
        assert_eq!(board.piece(Location::E1), None);
        assert_eq!(board.piece(Location::H1), None);
    }

    #[test]
    fn test_cannot_castle_after_king_moved() {
        let mut board = Board::new_game();
        board.remove_piece(Location::F1);
        board.remove_piece(Location::G1);
        board.move_piece(Location::E1, Location::F1);
        board.move_piece(Location::F1, Location::E1);

        assert!(!board.can_color_castle(Color::White, CastleSide::KingSide));
    }

    #[test_case(
        "r - - - k - - r
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - R", true; "unobstructed")]
    #[test_case(
        "r - - - k - - r
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - r R", false; "rook between")]
    #[test_case(
        "- - - - k - - -
         - - - - r - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - R", false; "king in check")]
    #[test_case(
        "- - - - k r - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - R", false; "passes through attacked square")]
    #[test_case(
        "- - - - k - r -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - R", false; "lands on attacked square")]
    #[test_case(
        "- - - - k - - r
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - - - - -
         - - - - K - - R", true; "rook attacked is fine")]
    fn test_white_king_side_castle(art: &str, allowed: bool) {
        let board = board_from(art);
        assert_eq!(board.can_color_castle(Color::White, CastleSide::KingSide), allowed);
    }

    #[test]
    fn test_promotable_pawns() {
        let board = board_from(
            "- P - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - - -
             - - - - - - p -",
        );
        assert_eq!(board.locations_of_promotable_pawns(Color::White), vec![Location::B8]);
        assert_eq!(board.locations_of_promotable_pawns(Color::Black), vec![Location::G1]);
    }

    #[test]
    fn test_transform_keeps_tag() {
        let mut board = Board::empty();
        board.set_piece(Piece::with_tag(PieceType::Pawn, Color::White, 7), Location::B8);

        let operation = board.transform_piece(Location::B8, PieceType::Knight).unwrap();

        assert_eq!(operation.kind, OperationKind::Transform);
        assert_eq!(operation.piece.tag, 7);
        assert!(board.piece(Location::B8).unwrap().is(PieceType::Knight, Color::White));
    }

    #[test]
    fn test_possible_move_locations_from_start() {
        let board = Board::new_game();
        assert_eq!(
            board.possible_move_locations(Location::G1),
            vec![Location::F3, Location::H3]
        );
        assert!(board.possible_move_locations(Location::E1).is_empty());
        assert!(board.possible_move_locations(Location::E4).is_empty());
    }

    #[test]
    fn test_color_inverted_mirrors_and_swaps() {
        let board = Board::new_game();
        let inverted = board.color_inverted();
        assert!(inverted.same_layout(&board));

        let mut moved = Board::new_game();
        moved.move_piece(Location::E2, Location::E4);
        let inverted = moved.color_inverted();
        assert!(inverted.piece(Location::E5).unwrap().is(PieceType::Pawn, Color::Black));
        assert_eq!(inverted.piece(Location::E7), None);
    }

    #[test]
    fn test_display_renders_rank_eight_first() {
        let rendered = Board::new_game().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "rnbqkbnr");
        assert_eq!(lines[3], "--------");
        assert_eq!(lines[7], "RNBQKBNR");
    }
}

use crate::board::{Board, CastleMove, CastleSide};
use crate::location::Location;
use crate::piece::{Color, PieceType};

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece may move here
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side to move, currently in check
    Check,
    /// Opponent piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by the terminal renderer
/// (or any other front end) to highlight squares: the selected piece, where it can go, and
/// who is giving check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Location, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    #[inline]
    pub fn squares(&self) -> &[(Location, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, location: Location) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(loc, _)| *loc == location)
            .map(|(_, feedback)| *feedback)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Add feedback for a square. The first entry for a square wins.
    pub fn insert(&mut self, location: Location, feedback: SquareFeedback) {
        if self.get(location).is_none() {
            self.squares.push((location, feedback));
        }
    }
}

/// Game state information needed to compute feedback
pub trait FeedbackSource {
    fn board(&self) -> &Board;

    /// The color whose pieces can be selected.
    fn side_to_move(&self) -> Color;
}

/// Compute visual feedback for the current position.
///
/// - A selected piece of the side to move: its legal destinations, castles included
/// - Side to move in check: its king and every checking piece
pub fn compute_feedback(source: &impl FeedbackSource, selected: Option<Location>) -> BoardFeedback {
    let board = source.board();
    let color = source.side_to_move();
    let mut feedback = BoardFeedback::new();

    if let Some(from) = selected
        && board.does_color_occupy(color, from)
    {
        show_destinations_for(board, color, from, &mut feedback);
    }

    if let Some(king) = board.king_location(color)
        && board.is_color_in_check(color)
    {
        feedback.insert(king, SquareFeedback::Check);
        for checker in board.checkers(color) {
            feedback.insert(checker, SquareFeedback::Checker);
        }
    }

    feedback
}

/// Show legal destinations of the piece on `from`
fn show_destinations_for(board: &Board, color: Color, from: Location, feedback: &mut BoardFeedback) {
    feedback.insert(from, SquareFeedback::Origin);
    for to in board.possible_move_locations(from) {
        feedback.insert(to, classify_move(board, from, to));
    }

    for side in CastleSide::ALL {
        let castle = CastleMove::new(color, side);
        if castle.king_start == from && board.can_color_castle(color, side) {
            feedback.insert(castle.king_end, SquareFeedback::Destination);
        }
    }
}

/// Classify a move as either a capture or regular destination
fn classify_move(board: &Board, from: Location, to: Location) -> SquareFeedback {
    let en_passant = board
        .piece(from)
        .is_some_and(|piece| piece.piece_type == PieceType::Pawn && from.file() != to.file());
    if board.piece(to).is_some() || en_passant {
        SquareFeedback::Capture
    } else {
        SquareFeedback::Destination
    }
}

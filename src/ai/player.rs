use std::fmt;

use crate::ai::configuration::AiConfiguration;
use crate::ai::rater::Rater;
use crate::board::{Board, BoardOperation, CastleSide};
use crate::location::Location;
use crate::opening::OpeningBook;
use crate::piece::{Color, PieceType};

/// A move as the mover sees it. Castling is its own kind of move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Single { from: Location, to: Location },
    Castle(CastleSide),
}

impl Move {
    /// Play the move for `color` without any legality check.
    pub fn apply(self, board: &mut Board, color: Color) -> Vec<BoardOperation> {
        match self {
            Move::Single { from, to } => board.move_piece(from, to),
            Move::Castle(side) => board.perform_castle(color, side),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Single { from, to } => write!(f, "{from}{to}"),
            Move::Castle(CastleSide::KingSide) => f.write_str("O-O"),
            Move::Castle(CastleSide::QueenSide) => f.write_str("O-O-O"),
        }
    }
}

/// The move the computer settled on and what it thought of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub mv: Move,
    pub promotion: Option<PieceType>,
    pub rating: f64,
}

/// Every legal move for `color`: piece moves source-major, then castles.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.pieces(color) {
        let movement = piece.movement();
        for to in Location::ALL {
            if movement.can_move_safely(from, to, board) {
                moves.push(Move::Single { from, to });
            }
        }
    }
    for side in CastleSide::ALL {
        if board.can_color_castle(color, side) {
            moves.push(Move::Castle(side));
        }
    }
    moves
}

/// Keeps the earlier choice unless the new one is strictly better.
fn better(best: Option<Choice>, candidate: Choice) -> Option<Choice> {
    match best {
        Some(best) if candidate.rating <= best.rating => Some(best),
        _ => Some(candidate),
    }
}

/// One-ply heuristic player with an opening book.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    configuration: AiConfiguration,
    rng: fastrand::Rng,
    book: OpeningBook,
}

impl AiPlayer {
    pub fn new(configuration: AiConfiguration) -> Self {
        Self::with_rng(configuration, fastrand::Rng::new())
    }

    pub fn with_seed(configuration: AiConfiguration, seed: u64) -> Self {
        Self::with_rng(configuration, fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(configuration: AiConfiguration, rng: fastrand::Rng) -> Self {
        Self {
            configuration,
            rng,
            book: OpeningBook::standard(),
        }
    }

    /// Replace the opening book, e.g. with [`OpeningBook::empty`].
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    pub fn configuration(&self) -> &AiConfiguration {
        &self.configuration
    }

    /// An independent copy whose random source is split off this one.
    pub fn fork(&mut self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            rng: self.rng.fork(),
            book: self.book.clone(),
        }
    }

    /// Weighted sum of every rater.
    pub fn rating_for_board(&self, board: &Board, color: Color) -> f64 {
        Rater::ALL
            .iter()
            .map(|rater| rater.weighted_rating(board, color, &self.configuration))
            .sum()
    }

    /// Rating of the position reached from `before`, with the mate bonus and
    /// the penalty for leaving the king's old square open.
    fn rate_outcome(&self, before: &Board, after: &Board, color: Color) -> f64 {
        if after.is_color_in_checkmate(color.opposite()) {
            return f64::MAX;
        }
        let mut rating = self.rating_for_board(after, color);

        let suicide = self.configuration.suicide_multiplier.value();
        if suicide != 0.0
            && let Some(king) = before.king_location(color)
            && after.can_color_move_any_piece_to(color.opposite(), king)
        {
            rating -= rating.abs() * suicide;
        }
        rating
    }

    fn evaluate(&self, board: &Board, color: Color, mv: Move) -> Option<Choice> {
        let mut after = board.clone();
        mv.apply(&mut after, color);

        let Some(&pawn) = after.locations_of_promotable_pawns(color).first() else {
            let rating = self.rate_outcome(board, &after, color);
            return Some(Choice {
                mv,
                promotion: None,
                rating,
            });
        };

        PieceType::PROMOTIONS
            .into_iter()
            .map(|piece_type| {
                let mut promoted = after.clone();
                promoted.transform_piece(pawn, piece_type);
                Choice {
                    mv,
                    promotion: Some(piece_type),
                    rating: self.rate_outcome(board, &promoted, color),
                }
            })
            .fold(None, better)
    }

    /// Pick a move for `color`, or `None` when it has no legal move.
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Choice> {
        if let Some(entry) = self.book.choose(board, color, &mut self.rng) {
            let mv = Move::Single {
                from: entry.from,
                to: entry.to,
            };
            log::debug!("{color} plays {mv} from the {}", entry.opening);
            let mut after = board.clone();
            mv.apply(&mut after, color);
            return Some(Choice {
                mv,
                promotion: None,
                rating: self.rating_for_board(&after, color),
            });
        }

        let moves = legal_moves(board, color);
        let choice = moves
            .iter()
            .filter_map(|&mv| {
                let choice = self.evaluate(board, color, mv)?;
                log::trace!("{color} {mv} rated {:.3}", choice.rating);
                Some(choice)
            })
            .fold(None, better);

        match &choice {
            Some(choice) => log::debug!(
                "{color} chose {} ({:.3}) out of {} moves",
                choice.mv,
                choice.rating,
                moves.len()
            ),
            None => log::debug!("{color} has no legal move"),
        }
        choice
    }
}

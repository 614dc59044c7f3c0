//! Heuristics scoring a position from one side's point of view.
//!
//! Raters do not favour a color: rating the color-inverted board for the
//! other side gives the same number.

use crate::ai::configuration::AiConfiguration;
use crate::board::Board;
use crate::location::{Location, Stride};
use crate::movement::KING_OFFSETS;
use crate::piece::{Color, Piece, PieceType};

const AXIS_MIDDLE: f64 = 3.5;

const CENTER_FOUR: [Location; 4] = [Location::D4, Location::E4, Location::D5, Location::E5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rater {
    CountPieces,
    BoardDominance,
    CenterOwnership,
    CenterDominance,
    ThreatenedPieces,
    PawnProgression,
    KingSurroundingPossession,
    CheckmateOpportunity,
    CenterFourOccupation,
}

impl Rater {
    pub const ALL: [Rater; 9] = [
        Rater::CountPieces,
        Rater::BoardDominance,
        Rater::CenterOwnership,
        Rater::CenterDominance,
        Rater::ThreatenedPieces,
        Rater::PawnProgression,
        Rater::KingSurroundingPossession,
        Rater::CheckmateOpportunity,
        Rater::CenterFourOccupation,
    ];

    pub fn weight(self, configuration: &AiConfiguration) -> f64 {
        let value = match self {
            Rater::CountPieces => configuration.count_pieces,
            Rater::BoardDominance => configuration.board_dominance,
            Rater::CenterOwnership => configuration.center_ownership,
            Rater::CenterDominance => configuration.center_dominance,
            Rater::ThreatenedPieces => configuration.threatened_pieces,
            Rater::PawnProgression => configuration.pawn_progression,
            Rater::KingSurroundingPossession => configuration.king_surrounding_possession,
            Rater::CheckmateOpportunity => configuration.checkmate_opportunity,
            Rater::CenterFourOccupation => configuration.center_four_occupation,
        };
        value.value()
    }

    /// Unweighted score of `board` for `color`.
    pub fn rate(self, board: &Board, color: Color) -> f64 {
        match self {
            Rater::CountPieces => count_pieces(board, color),
            Rater::BoardDominance => board_dominance(board, color),
            Rater::CenterOwnership => center_ownership(board, color),
            Rater::CenterDominance => center_dominance(board, color),
            Rater::ThreatenedPieces => threatened_pieces(board, color),
            Rater::PawnProgression => pawn_progression(board, color),
            Rater::KingSurroundingPossession => king_surrounding_possession(board, color),
            Rater::CheckmateOpportunity => checkmate_opportunity(board, color),
            Rater::CenterFourOccupation => center_four_occupation(board, color),
        }
    }

    /// Weighted score. Raters with zero weight are not evaluated.
    pub fn weighted_rating(self, board: &Board, color: Color, configuration: &AiConfiguration) -> f64 {
        let weight = self.weight(configuration);
        if weight == 0.0 {
            return 0.0;
        }
        self.rate(board, color) * weight
    }
}

#[inline]
fn signed(piece: &Piece, color: Color, value: f64) -> f64 {
    if piece.color == color { value } else { -value }
}

fn count_pieces(board: &Board, color: Color) -> f64 {
    board
        .occupied()
        .map(|(_, piece)| signed(&piece, color, piece.value()))
        .sum()
}

fn board_dominance(board: &Board, color: Color) -> f64 {
    board
        .occupied()
        .map(|(from, piece)| {
            let reachable = Location::ALL
                .into_iter()
                .filter(|&to| piece.movement().can_move(from, to, board))
                .count();
            signed(&piece, color, reachable as f64)
        })
        .sum()
}

/// 3.5 minus the distance from the middle of the board.
fn centrality(location: Location) -> f64 {
    let dx = AXIS_MIDDLE - f64::from(location.file());
    let dy = AXIS_MIDDLE - f64::from(location.rank());
    AXIS_MIDDLE - dx.hypot(dy)
}

fn center_ownership(board: &Board, color: Color) -> f64 {
    board
        .occupied()
        .map(|(location, piece)| signed(&piece, color, centrality(location)))
        .sum()
}

fn center_dominance(board: &Board, color: Color) -> f64 {
    board
        .occupied()
        .map(|(from, piece)| {
            let value: f64 = Location::ALL
                .into_iter()
                .filter(|&to| to == from || piece.movement().can_move(from, to, board))
                .map(centrality)
                .sum();
            signed(&piece, color, value)
        })
        .sum()
}

fn center_four_occupation(board: &Board, color: Color) -> f64 {
    CENTER_FOUR
        .into_iter()
        .filter_map(|location| board.piece(location))
        .map(|piece| signed(&piece, color, 1.0))
        .sum()
}

fn pawn_progression(board: &Board, color: Color) -> f64 {
    board
        .occupied()
        .filter(|(_, piece)| piece.piece_type == PieceType::Pawn)
        .map(|(location, piece)| {
            let advanced = (location.rank() - piece.color.pawn_rank()) * piece.color.forward();
            signed(&piece, color, f64::from(advanced.max(0)))
        })
        .sum()
}

fn surrounding(location: Location) -> impl Iterator<Item = Location> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |stride: Stride| location.offset(stride))
}

fn king_surrounding_possession(board: &Board, color: Color) -> f64 {
    let own_king = board.king_location(color);
    let opponent_king = board.king_location(color.opposite());

    // Kings can step onto the squares around them, so they do not count
    let mut no_kings = board.clone();
    for king in [own_king, opponent_king].into_iter().flatten() {
        no_kings.remove_piece(king);
    }

    let possession = |location: Location| {
        if no_kings.does_color_occupy(color, location) {
            1.0
        } else if no_kings.does_color_occupy(color.opposite(), location) {
            -1.0
        } else if no_kings.can_color_move_any_piece_to(color, location) {
            1.0
        } else if no_kings.can_color_move_any_piece_to(color.opposite(), location) {
            -1.0
        } else {
            0.0
        }
    };

    let mut rating = 0.0;
    if let Some(king) = own_king {
        // Discourages walking the king into the open
        rating += (8 - surrounding(king).count()) as f64 * 3.0;
        rating += surrounding(king).map(&possession).sum::<f64>();
    }
    if let Some(king) = opponent_king {
        rating += surrounding(king).map(&possession).sum::<f64>();
    }
    rating
}

fn checkmate_opportunity(board: &Board, color: Color) -> f64 {
    let mut rating = 0.0;
    for (from, piece) in board.occupied() {
        for to in Location::ALL {
            if !piece.movement().can_move_safely(from, to, board) {
                continue;
            }
            let mut after = board.clone();
            after.move_piece(from, to);
            if after.is_color_in_checkmate(piece.color.opposite()) {
                rating += signed(&piece, color, 1.0);
            }
        }
    }
    rating
}

fn threatened_pieces(board: &Board, color: Color) -> f64 {
    board
        .pieces(color)
        .map(|(location, piece)| threat_value(board, location, piece))
        .sum()
}

fn threat_value(board: &Board, location: Location, piece: Piece) -> f64 {
    let attackers = attackers_of(board, location, piece.color.opposite());
    if !attackers.is_empty() {
        if !is_defended(board, location, piece) {
            return -3.0 * piece.value();
        }
        let cheapest = attackers
            .iter()
            .map(Piece::value)
            .fold(f64::INFINITY, f64::min);
        if cheapest < piece.value() {
            return -piece.value();
        }
    }

    // Best capture this piece threatens
    board
        .pieces(piece.color.opposite())
        .filter(|(target, _)| piece.movement().can_move_safely(location, *target, board))
        .map(|(target_location, target)| {
            if target.value() < piece.value() && is_defended(board, target_location, target) {
                0.0
            } else {
                target.value()
            }
        })
        .fold(0.0, f64::max)
}

/// Pieces of `by` that can legally capture on `location`.
fn attackers_of(board: &Board, location: Location, by: Color) -> Vec<Piece> {
    board
        .pieces(by)
        .filter(|(from, attacker)| attacker.movement().can_move_safely(*from, location, board))
        .map(|(_, attacker)| attacker)
        .collect()
}

/// Whether a friend could recapture if `piece` on `location` were taken.
fn is_defended(board: &Board, location: Location, piece: Piece) -> bool {
    let mut altered = board.clone();
    altered.set_piece(piece.with_opposite_color(), location);
    !attackers_of(&altered, location, piece.color).is_empty()
}

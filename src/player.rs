use thiserror::Error;

use crate::ai::AiPlayer;
use crate::board::Board;
use crate::location::Location;
use crate::piece::Color;

/// Why a move was refused. Raised before the board is touched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PieceMoveError {
    #[error("source and target are the same square")]
    MovingToSameLocation,
    #[error("there is no piece on the source square")]
    NoPieceToMove,
    #[error("the piece belongs to the other player")]
    PieceColorMismatch,
    #[error("the piece cannot move to that square")]
    PieceUnableToMoveToLocation,
    #[error("the king is in check and this move does not resolve it")]
    PlayerMustMoveOutOfCheck,
    #[error("the move would leave the king in check")]
    CannotMoveIntoCheck,
    #[error("it is not this player's turn")]
    NotThisPlayersTurn,
    #[error("the game is over")]
    GameNotInProgress,
    #[error("the player to move is not human")]
    NotHumanPlayer,
    #[error("the player to move is not a computer")]
    NotComputerPlayer,
    #[error("a promotion must be chosen first")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("pawns cannot promote to that piece")]
    InvalidPromotionType,
    #[error("the move does not promote a pawn")]
    UnexpectedPromotion,
    #[error("castling is not allowed")]
    CannotCastle,
    #[error("the decision was made for an earlier position")]
    StaleAiDecision,
}

#[derive(Debug, Clone)]
pub enum PlayerKind {
    Human,
    Computer(Box<AiPlayer>),
}

impl PlayerKind {
    pub fn computer(ai: AiPlayer) -> Self {
        PlayerKind::Computer(Box::new(ai))
    }
}

/// One side of a game.
#[derive(Debug, Clone)]
pub struct Player {
    pub color: Color,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(color: Color, kind: PlayerKind) -> Self {
        Self { color, kind }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn ai_mut(&mut self) -> Option<&mut AiPlayer> {
        match &mut self.kind {
            PlayerKind::Computer(ai) => Some(ai),
            PlayerKind::Human => None,
        }
    }

    pub fn occupies_square_at(&self, board: &Board, location: Location) -> bool {
        board.does_color_occupy(self.color, location)
    }

    /// Validate a move for this player without making it.
    pub fn can_move_piece(
        &self,
        board: &Board,
        from: Location,
        to: Location,
    ) -> Result<(), PieceMoveError> {
        if from == to {
            return Err(PieceMoveError::MovingToSameLocation);
        }
        let piece = board.piece(from).ok_or(PieceMoveError::NoPieceToMove)?;
        if piece.color != self.color {
            return Err(PieceMoveError::PieceColorMismatch);
        }
        let movement = piece.movement();
        if !movement.can_move(from, to, board) {
            return Err(PieceMoveError::PieceUnableToMoveToLocation);
        }
        if !movement.can_move_safely(from, to, board) {
            return Err(if board.is_color_in_check(self.color) {
                PieceMoveError::PlayerMustMoveOutOfCheck
            } else {
                PieceMoveError::CannotMoveIntoCheck
            });
        }
        Ok(())
    }
}

use std::collections::VecDeque;

use crate::GameListener;
use crate::ai::{AiPlayer, Choice, Move};
use crate::board::{Board, BoardOperation, CastleSide, OperationKind};
use crate::feedback::FeedbackSource;
use crate::location::Location;
use crate::piece::{Color, Piece, PieceType};
use crate::player::{PieceMoveError, Player, PlayerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    InProgress,
    /// The color that has no legal move.
    Stalemate(Color),
    /// The color that delivered mate.
    Won(Color),
}

/// Notifications for whoever draws the game, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WillBeginUpdates,
    PieceMoved { piece: Piece, location: Location },
    PieceRemoved { piece: Piece, location: Location },
    PieceTransformed { piece: Piece, location: Location },
    EndUpdates,
    CurrentPlayerChanged(Color),
    GameWon(Color),
    GameEndedInStalemate(Color),
}

impl From<BoardOperation> for GameEvent {
    fn from(operation: BoardOperation) -> Self {
        let BoardOperation {
            kind,
            piece,
            location,
        } = operation;
        match kind {
            OperationKind::Move => GameEvent::PieceMoved { piece, location },
            OperationKind::Remove => GameEvent::PieceRemoved { piece, location },
            OperationKind::Transform => GameEvent::PieceTransformed { piece, location },
        }
    }
}

/// Outcome of a human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Completed,
    /// A pawn reached the last rank; call [`Game::promote`] to finish the move.
    AwaitingPromotion {
        location: Location,
        candidates: [PieceType; 4],
    },
}

/// Everything the computer needs to think away from the game.
#[derive(Debug, Clone)]
pub struct AiRequest {
    pub board: Board,
    pub color: Color,
    pub ply: u32,
    ai: AiPlayer,
}

impl AiRequest {
    pub fn run(mut self) -> Option<AiDecision> {
        let choice = self.ai.choose_move(&self.board, self.color)?;
        Some(AiDecision {
            choice,
            ply: self.ply,
        })
    }
}

/// A computer move, valid only at the ply it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub choice: Choice,
    pub ply: u32,
}

#[derive(Debug, Clone)]
struct PendingPromotion {
    location: Location,
    operations: Vec<BoardOperation>,
}

/// Two players taking turns on one board.
#[derive(Debug)]
pub struct Game {
    board: Board,
    white: Player,
    black: Player,
    current: Color,
    state: GameState,
    ply: u32,
    pending: Option<PendingPromotion>,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// Standard starting position, white to move.
    pub fn new(white: PlayerKind, black: PlayerKind) -> Self {
        Self::with_board(Board::new_game(), white, black, Color::White)
    }

    /// Start from an arbitrary position. A side to move that is already
    /// mated or stalemated ends the game immediately.
    pub fn with_board(board: Board, white: PlayerKind, black: PlayerKind, to_move: Color) -> Self {
        let state = if board.is_color_in_checkmate(to_move) {
            GameState::Won(to_move.opposite())
        } else if board.is_color_in_stalemate(to_move) {
            GameState::Stalemate(to_move)
        } else {
            GameState::InProgress
        };
        Self {
            board,
            white: Player::new(Color::White, white),
            black: Player::new(Color::Black, black),
            current: to_move,
            state,
            ply: 0,
            pending: None,
            events: VecDeque::new(),
        }
    }

    // Queries

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn current_color(&self) -> Color {
        self.current
    }

    /// Plies completed since the game was created.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn pending_promotion(&self) -> Option<Location> {
        self.pending.as_ref().map(|pending| pending.location)
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn is_current_player_human(&self) -> bool {
        self.player(self.current).is_human()
    }

    // Events

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Deliver every queued event to `listener`, oldest first.
    pub fn dispatch_events(&mut self, listener: &mut impl GameListener) {
        while let Some(event) = self.events.pop_front() {
            listener.on_event(&event);
        }
    }

    // Commands

    fn ensure_turn(&self, color: Color) -> Result<(), PieceMoveError> {
        if self.state != GameState::InProgress {
            return Err(PieceMoveError::GameNotInProgress);
        }
        if self.pending.is_some() {
            return Err(PieceMoveError::PromotionPending);
        }
        if color != self.current {
            return Err(PieceMoveError::NotThisPlayersTurn);
        }
        Ok(())
    }

    fn ensure_human(&self, color: Color) -> Result<(), PieceMoveError> {
        self.ensure_turn(color)?;
        if !self.player(color).is_human() {
            return Err(PieceMoveError::NotHumanPlayer);
        }
        Ok(())
    }

    /// Move a human player's piece.
    pub fn move_piece(
        &mut self,
        color: Color,
        from: Location,
        to: Location,
    ) -> Result<MoveStatus, PieceMoveError> {
        self.try_move_piece(color, from, to)
            .inspect_err(|err| log::warn!("{color} {from}{to} rejected: {err}"))
    }

    fn try_move_piece(
        &mut self,
        color: Color,
        from: Location,
        to: Location,
    ) -> Result<MoveStatus, PieceMoveError> {
        self.ensure_human(color)?;
        self.player(color).can_move_piece(&self.board, from, to)?;

        let operations = self.board.move_piece(from, to);
        if let Some(&location) = self.board.locations_of_promotable_pawns(color).first() {
            log::debug!("{color} pawn on {location} awaits promotion");
            self.pending = Some(PendingPromotion {
                location,
                operations,
            });
            return Ok(MoveStatus::AwaitingPromotion {
                location,
                candidates: PieceType::PROMOTIONS,
            });
        }
        self.complete_move(operations);
        Ok(MoveStatus::Completed)
    }

    /// Finish a move suspended on a promotion.
    pub fn promote(&mut self, piece_type: PieceType) -> Result<(), PieceMoveError> {
        if self.pending.is_some() && !PieceType::PROMOTIONS.contains(&piece_type) {
            return Err(PieceMoveError::InvalidPromotionType);
        }
        let mut pending = self
            .pending
            .take()
            .ok_or(PieceMoveError::NoPromotionPending)?;
        pending
            .operations
            .extend(self.board.transform_piece(pending.location, piece_type));
        self.complete_move(pending.operations);
        Ok(())
    }

    pub fn perform_castle(&mut self, color: Color, side: CastleSide) -> Result<(), PieceMoveError> {
        self.ensure_human(color)?;
        if !self.board.can_color_castle(color, side) {
            log::warn!("{color} cannot castle {side:?}");
            return Err(PieceMoveError::CannotCastle);
        }
        let operations = self.board.perform_castle(color, side);
        self.complete_move(operations);
        Ok(())
    }

    /// Let the computer to move think and play, on this thread.
    pub fn request_ai_move(&mut self) -> Result<Choice, PieceMoveError> {
        let request = self.ai_request()?;
        let decision = request
            .run()
            .expect("a game in progress always has a legal move");
        self.apply_ai_decision(decision)?;
        Ok(decision.choice)
    }

    /// Snapshot for thinking elsewhere. The computer player's random source
    /// is forked so repeated requests do not repeat choices.
    pub fn ai_request(&mut self) -> Result<AiRequest, PieceMoveError> {
        let color = self.current;
        self.ensure_turn(color)?;
        let board = self.board.clone();
        let ply = self.ply;
        let ai = self
            .player_mut(color)
            .ai_mut()
            .ok_or(PieceMoveError::NotComputerPlayer)?
            .fork();
        Ok(AiRequest {
            board,
            color,
            ply,
            ai,
        })
    }

    pub fn apply_ai_decision(&mut self, decision: AiDecision) -> Result<(), PieceMoveError> {
        let color = self.current;
        self.ensure_turn(color)?;
        if self.player(color).is_human() {
            return Err(PieceMoveError::NotComputerPlayer);
        }
        if decision.ply != self.ply {
            log::warn!("dropping decision for ply {}, now at {}", decision.ply, self.ply);
            return Err(PieceMoveError::StaleAiDecision);
        }

        let Choice { mv, promotion, .. } = decision.choice;
        let mut operations = match mv {
            Move::Single { from, to } => {
                self.player(color).can_move_piece(&self.board, from, to)?;
                self.board.move_piece(from, to)
            }
            Move::Castle(side) => {
                if !self.board.can_color_castle(color, side) {
                    return Err(PieceMoveError::CannotCastle);
                }
                self.board.perform_castle(color, side)
            }
        };
        if let Some(&location) = self.board.locations_of_promotable_pawns(color).first() {
            let piece_type = promotion.unwrap_or(PieceType::Queen);
            operations.extend(self.board.transform_piece(location, piece_type));
        }
        log::info!("{color} plays {mv}");
        self.complete_move(operations);
        Ok(())
    }

    fn complete_move(&mut self, operations: Vec<BoardOperation>) {
        self.events.push_back(GameEvent::WillBeginUpdates);
        self.events
            .extend(operations.into_iter().map(GameEvent::from));
        self.events.push_back(GameEvent::EndUpdates);
        self.ply += 1;

        let mover = self.current;
        let opponent = mover.opposite();
        if self.board.is_color_in_checkmate(opponent) {
            log::info!("{mover} wins by checkmate after {} plies", self.ply);
            self.state = GameState::Won(mover);
            self.events.push_back(GameEvent::GameWon(mover));
        } else if self.board.is_color_in_stalemate(opponent) {
            log::info!("{opponent} is stalemated after {} plies", self.ply);
            self.state = GameState::Stalemate(opponent);
            self.events.push_back(GameEvent::GameEndedInStalemate(opponent));
        } else {
            self.current = opponent;
            self.events.push_back(GameEvent::CurrentPlayerChanged(opponent));
        }
    }
}

impl FeedbackSource for Game {
    fn board(&self) -> &Board {
        &self.board
    }

    fn side_to_move(&self) -> Color {
        self.current
    }
}

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Board, CastleSide};
use crate::game::{Game, MoveStatus};
use crate::location::Location;
use crate::piece::PieceType;
use crate::player::PieceMoveError;

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move notation: '{0}'")]
pub struct ParseError(pub String);

/// One move in coordinate notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMove {
    Piece {
        from: Location,
        to: Location,
        promotion: Option<PieceType>,
    },
    Castle(CastleSide),
}

impl ScriptMove {
    /// Play this move for whoever is to move in `game`.
    ///
    /// A promotion without a suffix becomes a queen.
    pub fn play(self, game: &mut Game) -> Result<(), PieceMoveError> {
        self.check_promotion(game.board())?;
        let color = game.current_color();
        match self {
            ScriptMove::Piece {
                from,
                to,
                promotion,
            } => {
                if let MoveStatus::AwaitingPromotion { .. } = game.move_piece(color, from, to)? {
                    game.promote(promotion.unwrap_or(PieceType::Queen))?;
                }
                Ok(())
            }
            ScriptMove::Castle(side) => game.perform_castle(color, side),
        }
    }

    /// Refuse a promotion suffix unless the move takes a pawn to its last rank.
    pub fn check_promotion(&self, board: &Board) -> Result<(), PieceMoveError> {
        let ScriptMove::Piece {
            from,
            to,
            promotion: Some(_),
        } = *self
        else {
            return Ok(());
        };
        let promotes = board.piece(from).is_some_and(|piece| {
            piece.piece_type == PieceType::Pawn && to.rank() == piece.color.opposite().back_rank()
        });
        if promotes {
            Ok(())
        } else {
            Err(PieceMoveError::UnexpectedPromotion)
        }
    }
}

impl FromStr for ScriptMove {
    type Err = ParseError;

    /// Format:
    /// - `e2e4`: source and target square
    /// - `e7e8q`: promotion suffix (`q`, `r`, `b`, `n`)
    /// - `O-O` and `O-O-O`: castling (`0` is accepted for `O`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError(s.to_string());
        match s.to_ascii_uppercase().replace('0', "O").as_str() {
            "O-O" => return Ok(ScriptMove::Castle(CastleSide::KingSide)),
            "O-O-O" => return Ok(ScriptMove::Castle(CastleSide::QueenSide)),
            _ => {}
        }

        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(err());
        }
        let from = s[0..2].parse().map_err(|_| err())?;
        let to = s[2..4].parse().map_err(|_| err())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceType::from_char(c)
                    .filter(|piece_type| PieceType::PROMOTIONS.contains(piece_type))
                    .ok_or_else(err)?,
            ),
        };
        Ok(ScriptMove::Piece {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for ScriptMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptMove::Piece {
                from,
                to,
                promotion,
            } => {
                write!(f, "{from}{to}")?;
                if let Some(piece_type) = promotion {
                    write!(f, "{}", piece_type.char())?;
                }
                Ok(())
            }
            ScriptMove::Castle(CastleSide::KingSide) => f.write_str("O-O"),
            ScriptMove::Castle(CastleSide::QueenSide) => f.write_str("O-O-O"),
        }
    }
}

/// Parse whitespace-separated moves, e.g. `"e2e4 e7e5 g1f3"`.
pub fn parse_script(script: &str) -> Result<Vec<ScriptMove>, ParseError> {
    script.split_whitespace().map(str::parse::<ScriptMove>).collect()
}

/// A queue of scripted moves fed to a game one at a time.
#[derive(Debug, Clone, Default)]
pub struct MoveScript {
    pending: VecDeque<ScriptMove>,
}

impl MoveScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue more moves. Nothing is queued if any token is invalid.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let moves = parse_script(script)?;
        self.pending.extend(moves);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Play the next queued move. Returns `None` once the queue is empty.
    pub fn tick(&mut self, game: &mut Game) -> Option<Result<ScriptMove, PieceMoveError>> {
        let mv = self.pending.pop_front()?;
        Some(mv.play(game).map(|()| mv))
    }

    /// Play every queued move, stopping at the first one the game refuses.
    pub fn drain(&mut self, game: &mut Game) -> Result<(), PieceMoveError> {
        while let Some(result) = self.tick(game) {
            result?;
        }
        Ok(())
    }
}

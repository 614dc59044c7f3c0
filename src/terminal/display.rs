use std::io::{self, Stdout, Write};

use crate::board::Board;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game::GameEvent;
use crate::location::Location;
use crate::{BoardDisplay, GameListener};

/// Terminal board display.
///
/// Renders the board as an 8×8 grid of piece letters (white upper case),
/// with ANSI background colors for the [`BoardFeedback`] of each square.
/// Game events are printed as one line each.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write = Stdout> {
    out: W,
}

impl TerminalDisplay {
    /// Create a display writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Direct access for prompts and status lines.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut self.out, board, feedback)
    }
}

impl<W: Write> GameListener for TerminalDisplay<W> {
    fn on_event(&mut self, event: &GameEvent) {
        let Some(line) = describe_event(event) else {
            return;
        };
        if let Err(e) = writeln!(self.out, "{line}") {
            log::warn!("failed to print game event: {e}");
        }
    }
}

/// One line of text for an event, `None` for the batching markers.
fn describe_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::WillBeginUpdates | GameEvent::EndUpdates => None,
        GameEvent::PieceMoved { piece, location } => Some(format!("  {piece} to {location}")),
        GameEvent::PieceRemoved { piece, location } => {
            Some(format!("  {piece} taken on {location}"))
        }
        GameEvent::PieceTransformed { piece, location } => {
            Some(format!("  {location} promoted to {piece}"))
        }
        GameEvent::CurrentPlayerChanged(color) => Some(format!("{color} to move")),
        GameEvent::GameWon(color) => Some(format!("Checkmate, {color} wins")),
        GameEvent::GameEndedInStalemate(color) => {
            Some(format!("Stalemate, {color} cannot move"))
        }
    }
}

/// Render a board and its feedback to any writer. Rank 8 is printed first.
pub fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for rank in (0..8).rev() {
        write!(w, " {} ", rank + 1)?;
        for file in 0..8 {
            let Some(location) = Location::from_coords(file, rank) else {
                continue;
            };
            let symbol = board.piece(location).map_or('·', |piece| piece.char());
            write!(w, "{}", format_square(symbol, feedback.get(location)))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Wrap a square's symbol in the ANSI background for its feedback.
fn format_square(symbol: char, feedback: Option<SquareFeedback>) -> String {
    let background = match feedback {
        Some(SquareFeedback::Destination) => "44",
        Some(SquareFeedback::Capture) => "41",
        Some(SquareFeedback::Origin) => "42",
        Some(SquareFeedback::Check) => "45",
        Some(SquareFeedback::Checker) => "43",
        None => return format!(" {symbol} "),
    };
    format!("\x1b[{background}m {symbol} \x1b[0m")
}

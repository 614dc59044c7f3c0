//! Chess rules engine with a heuristic computer opponent.
//!
//! [`board::Board`] owns the position and reports every change as a list of
//! [`board::BoardOperation`]s. [`game::Game`] enforces turns, detects the end
//! of the game and republishes changes as [`game::GameEvent`]s. The computer
//! player in [`ai`] rates every legal reply one ply deep, after trying the
//! [`opening`] book.

pub mod ai;
pub mod ascii;
pub mod board;
pub mod feedback;
pub mod game;
pub mod location;
pub mod movement;
pub mod opening;
pub mod piece;
pub mod player;
pub mod script;
pub mod terminal;
pub mod worker;

/// Trait for receiving game events.
///
/// Implemented by whatever presents the game (the terminal front end, a
/// recording in tests). Events arrive in the order they happened, one
/// `WillBeginUpdates`/`EndUpdates` pair around the changes of each move.
pub trait GameListener {
    fn on_event(&mut self, event: &game::GameEvent);
}

/// Records events, mostly for tests.
impl GameListener for Vec<game::GameEvent> {
    fn on_event(&mut self, event: &game::GameEvent) {
        self.push(*event);
    }
}

/// Trait for displaying the board and its feedback to the player.
///
/// Mirrors [`GameListener`] on the output side: listeners hear about
/// changes, displays draw the resulting position.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the board with the given highlights.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants
    /// to their own output (terminal colors, etc.).
    fn show(
        &mut self,
        board: &board::Board,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}

//! Line-based terminal front end: human vs computer, or computer self-play.

mod display;

pub use display::{DisplayError, TerminalDisplay, render_board};

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::BoardDisplay;
use crate::ai::{AiConfiguration, AiPlayer, Difficulty};
use crate::feedback::compute_feedback;
use crate::game::{Game, GameState, MoveStatus};
use crate::location::Location;
use crate::piece::PieceType;
use crate::player::{PieceMoveError, PlayerKind};
use crate::script::ScriptMove;
use crate::worker::{AiWorker, WorkerError};

/// Who sits on one side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human,
    Computer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    pub white: Seat,
    pub black: Seat,
    pub difficulty: Difficulty,
    /// Fixed seed for the computer players. White uses it as is, black uses `seed + 1`.
    pub seed: Option<u64>,
    /// Stop after this many plies, mostly for self-play.
    pub max_plies: Option<u32>,
    /// Clear the screen before each board.
    pub clear: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            white: Seat::Human,
            black: Seat::Computer,
            difficulty: Difficulty::default(),
            seed: None,
            max_plies: None,
            clear: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Worker(#[from] WorkerError),
    #[error("computer move rejected: {0}")]
    Move(#[from] PieceMoveError),
}

/// One line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(ScriptMove),
    Select(Location),
    Refresh,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["q"] | ["quit"] => Ok(Command::Quit),
        ["r"] => Ok(Command::Reset),
        ["p"] => Ok(Command::Refresh),
        ["h"] | ["help"] => Ok(Command::Help),
        ["s", square] => square
            .parse()
            .map(Command::Select)
            .map_err(|e| format!("Invalid square: {e}")),
        ["s"] => Err("Usage: s <square>".to_string()),
        [token] => token
            .parse()
            .map(Command::Play)
            .map_err(|e| e.to_string()),
        _ => Err("Unknown command".to_string()),
    }
}

const HELP: &str = "Commands: <move> (e2e4, e7e8q, O-O) | s <square> (show moves) | r (reset) | p (refresh) | q (quit)";

/// Clears the screen and moves cursor to top-left.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Runs the game on stdin and stdout until it ends or the player quits.
pub fn run_interactive_terminal(config: TerminalConfig) -> Result<GameState, TerminalError> {
    let stdin = io::stdin();
    run_session(&config, stdin.lock(), io::stdout())
}

fn new_game(config: &TerminalConfig) -> Game {
    let seat = |seat: Seat, offset: u64| match seat {
        Seat::Human => PlayerKind::Human,
        Seat::Computer => {
            let configuration = AiConfiguration::new(config.difficulty);
            let ai = match config.seed {
                Some(seed) => AiPlayer::with_seed(configuration, seed.wrapping_add(offset)),
                None => AiPlayer::new(configuration),
            };
            PlayerKind::computer(ai)
        }
    };
    Game::new(seat(config.white, 0), seat(config.black, 1))
}

/// Play one session reading commands from `input`.
///
/// Returns the state the game was left in: terminal when it finished,
/// `InProgress` on quit, end of input, or the ply limit.
pub fn run_session(
    config: &TerminalConfig,
    input: impl BufRead,
    output: impl Write,
) -> Result<GameState, TerminalError> {
    let mut display = TerminalDisplay::with_writer(output);
    let mut lines = input.lines();
    let mut game = new_game(config);
    let worker = if config.white == Seat::Computer || config.black == Seat::Computer {
        Some(AiWorker::spawn()?)
    } else {
        None
    };
    let mut selected: Option<Location> = None;

    log::info!(
        "starting game: white {:?}, black {:?}, {} difficulty",
        config.white,
        config.black,
        config.difficulty
    );

    draw_interface(&mut display, &game, selected, config.clear)?;
    loop {
        game.dispatch_events(&mut display);

        match game.state() {
            GameState::InProgress => {}
            state => {
                draw_interface(&mut display, &game, None, config.clear)?;
                writeln!(display.writer(), "Game over after {} plies", game.ply())?;
                return Ok(state);
            }
        }
        if config.max_plies.is_some_and(|limit| game.ply() >= limit) {
            writeln!(display.writer(), "Stopping at ply {}", game.ply())?;
            return Ok(game.state());
        }

        if !game.is_current_player_human() {
            let worker = worker.as_ref().ok_or(WorkerError::Disconnected)?;
            if let PlayerKind::Computer(ai) = &game.player(game.current_color()).kind {
                log::debug!(
                    "{} thinking at {} difficulty",
                    game.current_color(),
                    ai.configuration().difficulty
                );
            }
            worker.request(game.ai_request()?)?;
            let decision = worker.recv()?;
            writeln!(
                display.writer(),
                "{} plays {}",
                game.current_color(),
                decision.choice.mv
            )?;
            game.apply_ai_decision(decision)?;
            if config.white == Seat::Computer && config.black == Seat::Computer {
                draw_interface(&mut display, &game, None, false)?;
            }
            continue;
        }

        let out = display.writer();
        write!(out, "{} > ", game.current_color())?;
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(game.state());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => return Ok(game.state()),
            Ok(Command::Reset) => {
                game = new_game(config);
                selected = None;
                draw_interface(&mut display, &game, selected, config.clear)?;
                writeln!(display.writer(), "Reset to initial state")?;
            }
            Ok(Command::Refresh) => {
                selected = None;
                draw_interface(&mut display, &game, selected, config.clear)?;
            }
            Ok(Command::Help) => writeln!(display.writer(), "{HELP}")?,
            Ok(Command::Select(location)) => {
                selected = Some(location);
                draw_interface(&mut display, &game, selected, config.clear)?;
            }
            Ok(Command::Play(mv)) => {
                selected = None;
                match play_human_move(&mut game, mv, &mut lines, &mut display)? {
                    Ok(()) => draw_interface(&mut display, &game, selected, config.clear)?,
                    Err(e) => writeln!(display.writer(), "✗ {e}")?,
                }
            }
            Err(message) => writeln!(display.writer(), "{message}")?,
        }
    }
}

/// Play a typed move, asking for the promotion piece when the move did not name one.
///
/// The outer result carries I/O failures, the inner one a refused move.
fn play_human_move<W: Write>(
    game: &mut Game,
    mv: ScriptMove,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    display: &mut TerminalDisplay<W>,
) -> Result<Result<(), PieceMoveError>, TerminalError> {
    if let Err(e) = mv.check_promotion(game.board()) {
        return Ok(Err(e));
    }
    let color = game.current_color();
    let (from, to, promotion) = match mv {
        ScriptMove::Castle(side) => return Ok(game.perform_castle(color, side)),
        ScriptMove::Piece {
            from,
            to,
            promotion,
        } => (from, to, promotion),
    };

    let candidates = match game.move_piece(color, from, to) {
        Ok(MoveStatus::Completed) => return Ok(Ok(())),
        Ok(MoveStatus::AwaitingPromotion { candidates, .. }) => candidates,
        Err(e) => return Ok(Err(e)),
    };
    if let Some(piece_type) = promotion {
        return Ok(game.promote(piece_type));
    }

    loop {
        let out = display.writer();
        let letters: String = candidates.iter().map(|piece_type| piece_type.char()).collect();
        write!(out, "Promote to ({letters}): ")?;
        out.flush()?;

        // End of input mid-promotion falls back to a queen
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(game.promote(PieceType::Queen)),
        };
        let choice = line
            .trim()
            .chars()
            .next()
            .and_then(PieceType::from_char)
            .filter(|piece_type| candidates.contains(piece_type));
        match choice {
            Some(piece_type) => return Ok(game.promote(piece_type)),
            None => writeln!(out, "Pick one of {letters}")?,
        }
    }
}

/// Draws the complete interface: title, help text and the board.
fn draw_interface<W: Write>(
    display: &mut TerminalDisplay<W>,
    game: &Game,
    selected: Option<Location>,
    clear: bool,
) -> Result<(), TerminalError> {
    let out = display.writer();
    if clear {
        write!(out, "{CLEAR_SCREEN}")?;
    }
    writeln!(out, "♟️  Heuristic Chess")?;
    writeln!(out, "{HELP}")?;
    writeln!(out)?;

    let feedback = compute_feedback(game, selected);
    display.show(game.board(), &feedback)?;
    Ok(())
}

//! Play chess against the computer in a terminal.
//!
//! - `heuristic-chess` - play white against the computer
//! - `heuristic-chess --human black --difficulty hard`
//! - `heuristic-chess --self-play --seed 7 --max-plies 80`

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use heuristic_chess::ai::Difficulty;
use heuristic_chess::game::GameState;
use heuristic_chess::terminal::{self, Seat, TerminalConfig};

/// Heuristic chess: rules engine with a one-ply computer opponent
#[derive(Parser)]
#[command(name = "heuristic-chess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How strongly the computer plays
    #[arg(long, value_enum, default_value_t = Level::Medium)]
    difficulty: Level,

    /// Which side the human plays
    #[arg(long, value_enum, default_value_t = Side::White)]
    human: Side,

    /// Let the computer play both sides
    #[arg(long, conflicts_with = "human")]
    self_play: bool,

    /// Seed for the computer's opening choices
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    /// Keep previous boards on screen
    #[arg(long)]
    no_clear: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
    /// Two humans at one keyboard
    Both,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (white, black) = match (cli.self_play, cli.human) {
        (true, _) => (Seat::Computer, Seat::Computer),
        (false, Side::White) => (Seat::Human, Seat::Computer),
        (false, Side::Black) => (Seat::Computer, Seat::Human),
        (false, Side::Both) => (Seat::Human, Seat::Human),
    };
    let config = TerminalConfig {
        white,
        black,
        difficulty: cli.difficulty.into(),
        seed: cli.seed,
        max_plies: cli.max_plies,
        clear: !cli.no_clear,
    };

    match terminal::run_interactive_terminal(config) {
        Ok(GameState::InProgress) => println!("Game left unfinished"),
        Ok(GameState::Won(color)) => println!("{color} wins"),
        Ok(GameState::Stalemate(color)) => println!("Draw, {color} is stalemated"),
        Err(e) => {
            log::error!("terminal session failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

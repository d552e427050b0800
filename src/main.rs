//! Headless runner (default binary).
//!
//! Plays one game over stdin/stdout with the JSON-lines protocol. Logs go to
//! stderr, filtered by `CASCADE_ARCADE_LOG` (default `warn`).

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cascade_arcade::adapter::{run_game, RunnerConfig};
use cascade_arcade::store::{FileKv, MemoryKv, ScoreBook};
use cascade_arcade::types::{GameId, Mode};

#[derive(Parser)]
#[command(name = "cascade-arcade")]
#[command(about = "Deterministic cascade puzzles over a JSON-lines protocol", long_about = None)]
struct Cli {
    /// Game to play: stacker, sandpile, fold, tiles, ribbon, collider
    #[arg(value_parser = parse_game)]
    game: GameId,

    /// Play a fresh practice seed instead of today's daily puzzle
    #[arg(long)]
    practice: bool,

    /// Replay a specific seed
    #[arg(long)]
    seed: Option<String>,

    /// Directory for best-score files (overrides CASCADE_ARCADE_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep best scores in memory only
    #[arg(long)]
    memory: bool,
}

fn parse_game(s: &str) -> Result<GameId, String> {
    GameId::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = GameId::ALL.iter().map(|g| g.as_str()).collect();
        format!("unknown game '{s}' (expected one of: {})", names.join(", "))
    })
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("CASCADE_ARCADE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = RunnerConfig::from_env();
    if cli.practice {
        config.mode = Mode::Practice;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    config.seed = cli.seed;
    config.persist = !cli.memory;

    let stdin = io::stdin();
    let stdout = io::stdout();
    if config.persist {
        let book = ScoreBook::new(FileKv::new(&config.data_dir));
        run_game(cli.game, &config, book, stdin.lock(), stdout.lock())
    } else {
        let book = ScoreBook::new(MemoryKv::new());
        run_game(cli.game, &config, book, stdin.lock(), stdout.lock())
    }
}

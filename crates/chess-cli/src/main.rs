//! Terminal chess against the computer.
//!
//! Moves are typed in coordinate notation (`e2e4`); the computer answers
//! after a short pause. Logs go to stderr so the board on stdout stays
//! readable.

mod command;
mod config;
mod session;

use anyhow::Context;
use chess_engine::{Game, Searcher};
use clap::Parser;
use config::CliConfig;
use session::Session;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Play the self-capture chess variant against the computer.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Play chess against the computer in the terminal")]
struct Args {
    /// Path to a TOML config file (defaults to ./chess.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side you play: white or black
    #[arg(long)]
    human: Option<String>,

    /// Search depth in plies (1-6)
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for the computer's choice between equal moves
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Pause before the computer's reply in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Args {
    /// Folds the flags given on the command line into `config`.
    fn apply(self, config: &mut CliConfig) {
        if let Some(human) = self.human {
            config.game.human = human;
        }
        if let Some(depth) = self.depth {
            config.engine.depth = depth;
        }
        if self.seed.is_some() {
            config.engine.seed = self.seed;
        }
        if self.fen.is_some() {
            config.game.fen = self.fen;
        }
        if let Some(delay) = self.delay_ms {
            config.game.reply_delay_ms = delay;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config =
        CliConfig::load(args.config.as_deref()).context("could not load configuration")?;
    args.apply(&mut config);

    let human = config.human()?;
    let game = match &config.game.fen {
        Some(fen) => Game::from_fen(fen, human).context("invalid --fen")?,
        None => Game::new(human),
    };
    let search = config.search_config();
    let searcher = match config.engine.seed {
        Some(seed) => Searcher::seeded(human.opposite(), search, seed),
        None => Searcher::from_entropy(human.opposite(), search),
    };

    tracing::info!(
        %human,
        depth = searcher.depth(),
        seed = ?config.engine.seed,
        "starting game"
    );

    let mut session = Session::new(
        game,
        searcher,
        Duration::from_millis(config.game.reply_delay_ms),
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session.run(stdin.lock(), &mut stdout)?;

    tracing::info!(status = ?session.game().status(), "session ended");
    Ok(())
}

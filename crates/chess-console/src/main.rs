//! Chess in the terminal.
//!
//! Reads moves from standard input and draws the board after each one.
//! Settings come from `chess-console.toml`; command-line flags override it.

mod config;
mod render;
mod session;

use anyhow::Context;
use chess_rules::Match;
use clap::Parser;
use config::ConsoleConfig;
use session::Session;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "chess-console")]
#[command(about = "Play chess against a friend in the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Draw pieces as Unicode chess symbols
    #[arg(long)]
    unicode: bool,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Applies flags on top of the file settings.
    fn merge(&self, mut config: ConsoleConfig) -> ConsoleConfig {
        if self.no_color {
            config.color = false;
        }
        if self.unicode {
            config.unicode_pieces = true;
        }
        if let Some(fen) = &self.fen {
            config.starting_fen = Some(fen.clone());
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    let config = cli.merge(
        ConsoleConfig::load(cli.config.as_deref()).context("Failed to load configuration")?,
    );
    tracing::debug!("Configuration: {:?}", config);

    let game = match &config.starting_fen {
        Some(fen) => {
            Match::from_fen(fen).with_context(|| format!("Invalid starting FEN: {fen}"))?
        }
        None => Match::new(),
    };

    let stdin = std::io::stdin();
    let mut session = Session::new(game, &config, stdin.lock(), std::io::stdout());
    session.run()?;

    let game = session.into_match();
    tracing::info!("Session ended after {} moves", game.history().len());
    Ok(())
}

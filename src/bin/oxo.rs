//! oxo - Play tic-tac-toe against an exhaustive search engine
//!
//! This CLI provides:
//! - Interactive games against the engine with a choice of move strategy
//! - A statistics report over the complete state graph, with CSV export

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe against an exhaustive search engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactive games against the engine
    Play(oxo::cli::commands::play::PlayArgs),

    /// Build the state graph and report its statistics
    Analyze(oxo::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
        Commands::Analyze(args) => oxo::cli::commands::analyze::execute(args),
    }
}

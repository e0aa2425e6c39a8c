//! gridpath CLI - Q-learning pathfinding on a grid
//!
//! - `train`: learn a policy on a generated or loaded grid and show its path
//! - `grid`: generate or validate a grid layout

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridpath")]
#[command(version, about = "Grid pathfinding with tabular Q-learning", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and print the learned path
    Train(Box<gridpath::cli::commands::train::TrainArgs>),

    /// Generate or validate a grid layout
    Grid(gridpath::cli::commands::grid::GridArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => gridpath::cli::commands::train::execute(*args),
        Commands::Grid(args) => gridpath::cli::commands::grid::execute(args),
    }
}

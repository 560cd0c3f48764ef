//! Hunger Games CLI - Command-line interface
//!
//! Commands:
//! - run: Play a full game from a Panem input file
//! - tree: Show the district tree built from an input file

mod run_cmd;
mod tree_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hungergames")]
#[command(about = "District-tree Hunger Games simulator")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log duels and eliminations
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full game
    Run(run_cmd::RunArgs),
    /// Print the district tree
    Tree(tree_cmd::TreeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Run(args) => run_cmd::run(args, cli.seed),
        Commands::Tree(args) => tree_cmd::run(args),
    }
}

//! Team Queue CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the queue server
//! - simulate: Replay whole events offline and report fairness

mod roster;
mod server;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teamqueue")]
#[command(about = "Fair 3-vs-3 match queue for round-based events")]
struct Cli {
    /// Random seed for reproducible scheduling
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the queue server
    Serve(server::ServerArgs),
    /// Simulate events and report scheduling fairness
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is kept for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Simulate(args) => simulate::run(args, cli.seed),
    }
}

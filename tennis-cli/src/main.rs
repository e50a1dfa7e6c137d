//! Tennis CLI - Command-line interface
//!
//! Commands:
//! - track: Replay a point script and log every point
//! - simulate: Play seeded random matches
//! - config: Save match settings to a JSON file

mod record;
mod settings;
mod simulate;
mod track;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tennis")]
#[command(about = "Point-by-point tennis match tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a point script through the scoring engine
    Track(track::TrackArgs),
    /// Play random matches with fixed serve-point probabilities
    Simulate(simulate::SimulateArgs),
    /// Write match settings to a JSON file
    Config(settings::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr, so stdout stays clean for --json output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => track::run(args),
        Commands::Simulate(args) => simulate::run(args),
        Commands::Config(args) => settings::run(args),
    }
}

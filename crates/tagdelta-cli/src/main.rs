//! tagdelta CLI
//!
//! Command-line interface for replaying and diffing association snapshots

use clap::{Parser, Subcommand};
use tagdelta_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "tagdelta")]
#[command(about = "tagdelta - Incremental association-delta tracking", long_about = None)]
struct Cli {
    /// Human-readable debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// JSON structured logging on stderr
    #[arg(long, global = true, conflicts_with = "verbose")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Feed snapshot files, in order, through one tracker
    Replay(commands::replay::ReplayArgs),
    /// Show the delta between two snapshot files
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.json_logs {
        init(Profile::Production);
    } else if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

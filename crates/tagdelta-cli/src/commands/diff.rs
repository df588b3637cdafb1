//! Snapshot diff command

use clap::Args;
use std::path::PathBuf;
use tagdelta_core::diff::{compute_delta, render_delta_summary};

use super::{load_snapshot, OutputFormat};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Earlier snapshot file
    pub previous: PathBuf,

    /// Later snapshot file
    pub current: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let previous = load_snapshot(&args.previous)?;
    let current = load_snapshot(&args.current)?;

    let delta = compute_delta(&previous, &current);

    match args.format {
        OutputFormat::Text => print!("{}", render_delta_summary(&delta)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&delta)?),
    }
    Ok(())
}

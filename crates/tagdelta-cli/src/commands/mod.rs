pub mod diff;
pub mod replay;

use clap::ValueEnum;
use std::path::Path;
use tagdelta_core::model::Snapshot;

/// Output rendering shared by all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into())
}

pub(crate) fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let text = read_file(path)?;
    Snapshot::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e).into())
}

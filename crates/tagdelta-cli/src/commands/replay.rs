//! Snapshot replay command
//!
//! Feeds each snapshot file, in the order given, into a single tracker and
//! prints the notifications of every step.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tagdelta_core::config::TrackerConfig;
use tagdelta_core::listener::{DeltaEvent, EventLog};
use tagdelta_core::model::{ResolvedAssociation, TagName};
use tagdelta_core::resolver::{FnResolver, TagDescriptor, TagRegistry, TagResolver};
use tagdelta_core::tracker::{DeltaTracker, StepReport};
use tagdelta_core::{log_op_end, log_op_start};

use super::{load_snapshot, read_file, OutputFormat};

const OP_REPLAY: &str = "cli_replay";

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Snapshot files, oldest first
    #[arg(required = true)]
    pub snapshots: Vec<PathBuf>,

    /// JSON tag registry; without it every tag resolves to its own name
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// TOML configuration file with a [tracker] table
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct StepOutput<'a> {
    source: String,
    #[serde(flatten)]
    report: StepReport,
    events: &'a [DeltaEvent<TagDescriptor>],
}

pub fn execute(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => TrackerConfig::from_toml_str(&read_file(path)?)?,
        None => TrackerConfig::default(),
    };

    match &args.registry {
        Some(path) => {
            let descriptors: Vec<TagDescriptor> = serde_json::from_str(&read_file(path)?)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            replay(TagRegistry::from_descriptors(descriptors), config, &args)
        }
        None => {
            let by_name =
                FnResolver::new(|name: &TagName| Some(TagDescriptor::new(name.clone(), name.as_str())));
            replay(by_name, config, &args)
        }
    }
}

fn replay<R>(
    resolver: R,
    config: TrackerConfig,
    args: &ReplayArgs,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: TagResolver<Descriptor = TagDescriptor>,
{
    let start = Instant::now();
    log_op_start!(OP_REPLAY, snapshot_count = args.snapshots.len() as u64);

    let mut tracker = DeltaTracker::with_config(resolver, EventLog::new(), config);

    for path in &args.snapshots {
        let snapshot = load_snapshot(path)?;
        let report = tracker.step(snapshot)?;
        let events = tracker.listener_mut().drain();

        match args.format {
            OutputFormat::Text => {
                println!(
                    "# step {} ({}): {} removed, {} added",
                    report.generation,
                    path.display(),
                    report.removed,
                    report.added
                );
                for event in &events {
                    let sign = if event.is_added() { '+' } else { '-' };
                    println!("{} {}", sign, describe(event.association()));
                }
            }
            OutputFormat::Json => {
                let output = StepOutput {
                    source: path.display().to_string(),
                    report,
                    events: &events,
                };
                println!("{}", serde_json::to_string(&output)?);
            }
        }
    }

    log_op_end!(
        OP_REPLAY,
        duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        generation = tracker.generation()
    );
    Ok(())
}

fn describe(association: &ResolvedAssociation<TagDescriptor>) -> String {
    match (&association.tag_name, &association.tag) {
        (None, _) => format!("{} (untagged)", association.item),
        (Some(name), Some(descriptor)) => {
            format!("{} {} ({})", association.item, name, descriptor.display_name)
        }
        (Some(name), None) => format!("{} {} (unresolved)", association.item, name),
    }
}

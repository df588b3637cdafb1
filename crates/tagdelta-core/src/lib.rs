//! tagdelta Core - incremental association-delta tracking
//!
//! This crate tracks a mapping from items (for example file paths) to tags
//! (for example the VCS that owns them) across successive snapshots and
//! reports exactly which associations appeared and disappeared:
//! - Snapshot model with one-tag-per-item validation
//! - Pure delta computation between two snapshots
//! - Injected tag resolution, performed lazily for changed associations only
//! - A stateful tracker that notifies a listener, removals before additions
//! - Structured error and logging facilities

pub mod config;
pub mod diff;
pub mod errors;
pub mod listener;
pub mod logging_facility;
pub mod model;
pub mod resolver;
pub mod tracker;

pub use tagdelta_core_types as core_types;

// Re-export commonly used types
pub use config::{Bootstrap, TrackerConfig};
pub use diff::{compute_delta, Delta};
pub use errors::{DeltaError, ExError, ExErrorKind, Result};
pub use listener::{DeltaEvent, DeltaListener, EventLog, MirrorIndex};
pub use model::{Association, Item, ResolvedAssociation, Snapshot, TagName};
pub use resolver::{TagRegistry, TagResolver};
pub use tracker::{DeltaTracker, SharedDeltaTracker, StepReport};

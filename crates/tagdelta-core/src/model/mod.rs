pub mod association;
pub mod snapshot;

pub use association::{Association, Item, ResolvedAssociation, TagName};
pub use snapshot::{Snapshot, SnapshotBuilder};

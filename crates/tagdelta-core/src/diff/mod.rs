//! Association delta engine.
//!
//! Compares two snapshots and produces the associations that disappeared and
//! the associations that appeared.
//!
//! ## Entry point
//!
//! ```
//! use tagdelta_core::diff::compute_delta;
//! use tagdelta_core::model::{Association, Snapshot};
//!
//! let previous = Snapshot::try_from_associations(vec![Association::tagged("a", "git")])?;
//! let current = Snapshot::try_from_associations(vec![Association::tagged("a", "hg")])?;
//!
//! let delta = compute_delta(&previous, &current);
//! assert_eq!(delta.removed.len(), 1);
//! assert_eq!(delta.added.len(), 1);
//! # Ok::<(), tagdelta_core::DeltaError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Pure**: neither input is modified and no collaborator is consulted.
//! - **Structural**: a retagged item yields one removal and one addition,
//!   never a distinct "changed" entry.
//! - **Determinism**: both result sets iterate in a fixed order.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_delta;
pub use human_summary::render_delta_summary;
pub use model::Delta;

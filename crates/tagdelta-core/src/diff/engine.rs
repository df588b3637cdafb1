//! Delta computation engine.
//!
//! The core entry point is [`compute_delta`], which accepts two snapshots and
//! produces a [`Delta`].

use std::collections::BTreeSet;

use crate::diff::model::Delta;
use crate::model::{Association, Snapshot};

/// Associations of `a` that `b` does not contain.
fn difference(a: &Snapshot, b: &Snapshot) -> BTreeSet<Association> {
    a.iter()
        .filter(|(item, tag)| b.tag_of(item) != Some(*tag))
        .map(|(item, tag)| Association::new(item.clone(), tag.cloned()))
        .collect()
}

/// Compute the delta between two snapshots.
///
/// - `removed` = associations in `previous` but not in `current`
/// - `added` = associations in `current` but not in `previous`
///
/// Equality is structural over the `(item, tag)` pair. Equal snapshots take a
/// fast path and yield an empty delta.
pub fn compute_delta(previous: &Snapshot, current: &Snapshot) -> Delta {
    if previous == current {
        return Delta::default();
    }

    if previous.is_empty() {
        return Delta::initial(current);
    }

    Delta {
        removed: difference(previous, current),
        added: difference(current, previous),
    }
}

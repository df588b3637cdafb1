//! Delta output types.
//!
//! Collections use `BTreeSet` for deterministic iteration and serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Association, Item, Snapshot};

/// The difference between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Associations in the previous snapshot but not in the current one
    pub removed: BTreeSet<Association>,
    /// Associations in the current snapshot but not in the previous one
    pub added: BTreeSet<Association>,
}

impl Delta {
    /// Delta that announces every association of `current` as added
    pub fn initial(current: &Snapshot) -> Self {
        Self {
            removed: BTreeSet::new(),
            added: current.associations().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    /// Total number of notifications this delta produces
    pub fn change_count(&self) -> usize {
        self.removed.len() + self.added.len()
    }

    /// Items that appear on both sides, i.e. whose tag changed
    ///
    /// Informational only; consumers still receive a removal and an addition.
    pub fn retagged_items(&self) -> BTreeSet<&Item> {
        let removed_items: BTreeSet<&Item> = self.removed.iter().map(|a| &a.item).collect();
        self.added
            .iter()
            .map(|a| &a.item)
            .filter(|item| removed_items.contains(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_has_no_removals() {
        let snapshot = Snapshot::try_from_associations(vec![
            Association::tagged("a", "git"),
            Association::untagged("b"),
        ])
        .unwrap();

        let delta = Delta::initial(&snapshot);
        assert!(delta.removed.is_empty());
        assert_eq!(delta.added.len(), 2);
        assert_eq!(delta.change_count(), 2);
    }

    #[test]
    fn test_retagged_items() {
        let delta = Delta {
            removed: [
                Association::tagged("a", "git"),
                Association::tagged("gone", "git"),
            ]
            .into_iter()
            .collect(),
            added: [
                Association::tagged("a", "hg"),
                Association::tagged("new", "hg"),
            ]
            .into_iter()
            .collect(),
        };

        let retagged: Vec<&str> = delta.retagged_items().into_iter().map(Item::as_str).collect();
        assert_eq!(retagged, vec!["a"]);
    }
}

//! Property tests over arbitrary snapshot sequences

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use std::collections::BTreeMap;

use tagdelta_core::diff::compute_delta;
use tagdelta_core::listener::{EventLog, MirrorIndex};
use tagdelta_core::model::{Association, Item, Snapshot, TagName};
use tagdelta_core::resolver::IdentityResolver;
use tagdelta_core::tracker::DeltaTracker;

// -- Strategy helpers --

fn arb_tag() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        4 => prop::sample::select(vec!["git", "hg", "svn"]).prop_map(|t| Some(t.to_string())),
    ]
}

/// Small item alphabet so consecutive snapshots overlap
fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::btree_map("[a-f]", arb_tag(), 0..6).prop_map(to_snapshot)
}

fn to_snapshot(entries: BTreeMap<String, Option<String>>) -> Snapshot {
    Snapshot::try_from_associations(
        entries
            .into_iter()
            .map(|(item, tag)| Association::new(item, tag.map(TagName::from))),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn first_step_adds_every_association(s in arb_snapshot()) {
        let mut tracker = DeltaTracker::new(IdentityResolver, EventLog::new());

        let report = tracker.step(s.clone()).unwrap();

        prop_assert_eq!(report.added, s.len());
        prop_assert_eq!(report.removed, 0);
        prop_assert!(tracker.listener().events().iter().all(|e| e.is_added()));
    }

    #[test]
    fn repeating_a_snapshot_is_quiet(first in arb_snapshot(), second in arb_snapshot()) {
        let mut tracker = DeltaTracker::new(IdentityResolver, EventLog::new());
        tracker.step(first).unwrap();
        tracker.step(second.clone()).unwrap();

        let report = tracker.step(second).unwrap();

        prop_assert!(report.is_quiet());
    }

    #[test]
    fn mirror_equals_last_snapshot(sequence in prop::collection::vec(arb_snapshot(), 1..8)) {
        let mut tracker = DeltaTracker::new(IdentityResolver, MirrorIndex::new());

        for s in &sequence {
            tracker.step(s.clone()).unwrap();
        }

        let last = sequence.last().unwrap();
        let mirror = tracker.listener();
        prop_assert_eq!(mirror.len(), last.len());
        for (item, tag) in last.iter() {
            let entry = mirror.get(item).unwrap();
            prop_assert_eq!(entry.tag_name.as_ref(), tag);
            prop_assert_eq!(entry.tag.as_ref(), tag);
        }
    }

    #[test]
    fn delta_applied_to_previous_yields_current(previous in arb_snapshot(), current in arb_snapshot()) {
        let delta = compute_delta(&previous, &current);

        let mut rebuilt: BTreeMap<Item, Option<TagName>> = previous
            .associations()
            .map(|a| (a.item, a.tag))
            .collect();
        for association in &delta.removed {
            prop_assert!(rebuilt.remove(&association.item).is_some());
        }
        for association in &delta.added {
            prop_assert!(rebuilt.insert(association.item.clone(), association.tag.clone()).is_none());
        }

        let rebuilt = Snapshot::try_from_associations(
            rebuilt.into_iter().map(|(item, tag)| Association::new(item, tag)),
        )
        .unwrap();
        prop_assert_eq!(rebuilt, current);
    }
}

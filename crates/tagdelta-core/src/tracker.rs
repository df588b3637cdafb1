//! Incremental delta tracker
//!
//! The [`DeltaTracker`] retains the last snapshot it was given. Each call to
//! [`DeltaTracker::step`] diffs the new snapshot against it, resolves only the
//! changed associations, and notifies the listener.
//!
//! ## Atomicity Contract
//!
//! - **Removals first**: within one step every `on_removed` call precedes
//!   every `on_added` call.
//! - **All-or-nothing state**: the retained snapshot and the generation only
//!   advance after every notification of the step succeeded. If the listener
//!   fails, the error is returned unchanged and the tracker is exactly as it
//!   was before the call, so the next step re-diffs against the last fully
//!   delivered snapshot.
//!
//! ## Example
//!
//! ```
//! use tagdelta_core::listener::{DeltaEvent, EventLog};
//! use tagdelta_core::model::{Association, Snapshot};
//! use tagdelta_core::resolver::IdentityResolver;
//! use tagdelta_core::tracker::DeltaTracker;
//!
//! let mut tracker = DeltaTracker::new(IdentityResolver, EventLog::new());
//!
//! tracker.step(Snapshot::try_from_associations(vec![Association::tagged("f1", "git")])?)?;
//! tracker.step(Snapshot::try_from_associations(vec![Association::tagged("f1", "hg")])?)?;
//!
//! let events = tracker.listener().events();
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[1], DeltaEvent::Removed(_)));
//! assert!(matches!(events[2], DeltaEvent::Added(_)));
//! # Ok::<(), tagdelta_core::DeltaError>(())
//! ```

use serde::Serialize;
use std::sync::Mutex;
use std::time::Instant;

use crate::config::{Bootstrap, TrackerConfig};
use crate::core_types::schema::{EVENT_NOTIFY_ADDED, EVENT_NOTIFY_REMOVED};
use crate::diff::{compute_delta, Delta};
use crate::errors::{DeltaError, Result};
use crate::listener::DeltaListener;
use crate::model::{Association, ResolvedAssociation, Snapshot};
use crate::resolver::TagResolver;
use crate::{log_notify, log_op_end, log_op_error, log_op_start};

const OP_STEP: &str = "tracker_step";

#[derive(Debug, Clone, PartialEq, Eq)]
enum TrackerState {
    Uninitialized,
    Initialized(Snapshot),
}

/// Outcome of one successful step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Generation reached by this step (1 for the first step)
    pub generation: u64,
    /// Number of `on_removed` notifications sent
    pub removed: usize,
    /// Number of `on_added` notifications sent
    pub added: usize,
}

impl StepReport {
    /// True when the step sent no notifications
    pub fn is_quiet(&self) -> bool {
        self.removed == 0 && self.added == 0
    }
}

/// Stateful orchestrator turning a sequence of snapshots into notifications
///
/// The resolver and the listener are injected at construction. `step` takes
/// `&mut self`, so one tracker is driven by one caller at a time; wrap it in
/// a [`SharedDeltaTracker`] to accept snapshots from several threads.
pub struct DeltaTracker<R, L> {
    resolver: R,
    listener: L,
    config: TrackerConfig,
    state: TrackerState,
    generation: u64,
}

impl<R, L> DeltaTracker<R, L>
where
    R: TagResolver,
    L: DeltaListener<R::Descriptor>,
{
    /// Create an uninitialized tracker with the default configuration
    pub fn new(resolver: R, listener: L) -> Self {
        Self::with_config(resolver, listener, TrackerConfig::default())
    }

    pub fn with_config(resolver: R, listener: L, config: TrackerConfig) -> Self {
        Self {
            resolver,
            listener,
            config,
            state: TrackerState::Uninitialized,
            generation: 0,
        }
    }

    /// Feed the next snapshot
    ///
    /// The first call announces the whole snapshot as added (or nothing, with
    /// [`Bootstrap::Baseline`]). Every later call announces the removals and
    /// then the additions relative to the retained snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the listener. The tracker state is
    /// left untouched in that case.
    pub fn step(&mut self, current: Snapshot) -> Result<StepReport> {
        let start = Instant::now();
        let generation = self.generation + 1;
        log_op_start!(
            OP_STEP,
            generation = generation,
            snapshot_len = current.len() as u64
        );

        let delta = self.pending_delta(&current);

        if let Err(err) = self.dispatch(&delta, generation) {
            log_op_error!(
                OP_STEP,
                err.clone(),
                duration_ms = elapsed_ms(start),
                generation = generation
            );
            return Err(err);
        }

        self.state = TrackerState::Initialized(current);
        self.generation = generation;

        let report = StepReport {
            generation,
            removed: delta.removed.len(),
            added: delta.added.len(),
        };
        log_op_end!(
            OP_STEP,
            duration_ms = elapsed_ms(start),
            generation = generation,
            removed = report.removed as u64,
            added = report.added as u64
        );
        Ok(report)
    }

    fn pending_delta(&self, current: &Snapshot) -> Delta {
        match &self.state {
            TrackerState::Uninitialized => match self.config.bootstrap {
                Bootstrap::AnnounceAll => Delta::initial(current),
                Bootstrap::Baseline => Delta::default(),
            },
            TrackerState::Initialized(previous) => compute_delta(previous, current),
        }
    }

    fn dispatch(&mut self, delta: &Delta, generation: u64) -> Result<()> {
        for association in &delta.removed {
            log_notify!(EVENT_NOTIFY_REMOVED, association, generation = generation);
            let resolved = resolve(&self.resolver, association);
            self.listener.on_removed(resolved)?;
        }
        for association in &delta.added {
            log_notify!(EVENT_NOTIFY_ADDED, association, generation = generation);
            let resolved = resolve(&self.resolver, association);
            self.listener.on_added(resolved)?;
        }
        Ok(())
    }
}

impl<R, L> DeltaTracker<R, L> {
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, TrackerState::Initialized(_))
    }

    /// The snapshot the next step will be diffed against
    pub fn retained(&self) -> Option<&Snapshot> {
        match &self.state {
            TrackerState::Uninitialized => None,
            TrackerState::Initialized(snapshot) => Some(snapshot),
        }
    }

    /// Number of successfully completed steps
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}

/// Untagged associations resolve to `None` without consulting the resolver.
fn resolve<R: TagResolver>(
    resolver: &R,
    association: &Association,
) -> ResolvedAssociation<R::Descriptor> {
    let tag = association
        .tag
        .as_ref()
        .and_then(|name| resolver.resolve(name));
    ResolvedAssociation::new(association.item.clone(), association.tag.clone(), tag)
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// A tracker behind a mutex, for producers on several threads
///
/// Each `step` holds the lock for the whole read/diff/dispatch/replace
/// sequence, so steps are serialized and never interleave.
pub struct SharedDeltaTracker<R, L> {
    inner: Mutex<DeltaTracker<R, L>>,
}

impl<R, L> SharedDeltaTracker<R, L>
where
    R: TagResolver,
    L: DeltaListener<R::Descriptor>,
{
    pub fn new(tracker: DeltaTracker<R, L>) -> Self {
        Self {
            inner: Mutex::new(tracker),
        }
    }

    /// Serialized [`DeltaTracker::step`]
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if another thread panicked while stepping, or
    /// the listener's error as described on [`DeltaTracker::step`].
    pub fn step(&self, current: Snapshot) -> Result<StepReport> {
        let mut tracker = self.inner.lock().map_err(|_| DeltaError::LockPoisoned)?;
        tracker.step(current)
    }

    /// Run `f` against the tracker while holding the lock
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if another thread panicked while stepping.
    pub fn with_tracker<T>(&self, f: impl FnOnce(&DeltaTracker<R, L>) -> T) -> Result<T> {
        let tracker = self.inner.lock().map_err(|_| DeltaError::LockPoisoned)?;
        Ok(f(&*tracker))
    }

    /// # Errors
    ///
    /// Returns `LockPoisoned` if another thread panicked while stepping.
    pub fn into_inner(self) -> Result<DeltaTracker<R, L>> {
        self.inner.into_inner().map_err(|_| DeltaError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::EventLog;
    use crate::resolver::IdentityResolver;

    fn one(item: &str, tag: &str) -> Snapshot {
        Snapshot::try_from_associations(vec![Association::tagged(item, tag)]).unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let mut tracker = DeltaTracker::new(IdentityResolver, EventLog::new());
        assert!(!tracker.is_initialized());
        assert_eq!(tracker.retained(), None);
        assert_eq!(tracker.generation(), 0);

        tracker.step(Snapshot::new()).unwrap();
        assert!(tracker.is_initialized());
        assert_eq!(tracker.retained(), Some(&Snapshot::new()));
        assert_eq!(tracker.generation(), 1);

        tracker.step(one("a", "git")).unwrap();
        assert_eq!(tracker.retained(), Some(&one("a", "git")));
        assert_eq!(tracker.generation(), 2);
    }

    #[test]
    fn test_report_counts() {
        let mut tracker = DeltaTracker::new(IdentityResolver, EventLog::new());
        let first = tracker.step(one("a", "git")).unwrap();
        assert_eq!(
            first,
            StepReport {
                generation: 1,
                removed: 0,
                added: 1
            }
        );

        let second = tracker.step(one("a", "hg")).unwrap();
        assert_eq!((second.removed, second.added), (1, 1));

        let third = tracker.step(one("a", "hg")).unwrap();
        assert!(third.is_quiet());
        assert_eq!(third.generation, 3);
    }

    #[test]
    fn test_untagged_association_skips_resolver() {
        let association = Association::untagged("loose.txt");
        let resolved = resolve(&IdentityResolver, &association);
        assert_eq!(resolved.tag, None);
        assert_eq!(resolved.tag_name, None);
        assert!(!resolved.is_unresolved());
    }
}

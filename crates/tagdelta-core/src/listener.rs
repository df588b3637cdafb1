//! Notification sinks
//!
//! A [`DeltaListener`] receives one call per changed association. The
//! tracker guarantees that, within one step, every `on_removed` call precedes
//! every `on_added` call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{DeltaError, Result};
use crate::model::{Item, ResolvedAssociation};

/// Observer of association changes
///
/// Returning an error aborts the current tracker step; the tracker keeps its
/// previous snapshot and hands the error back to the caller of `step`.
pub trait DeltaListener<D> {
    /// An association appeared
    ///
    /// # Errors
    ///
    /// Any error stops delivery of the remaining notifications of this step.
    fn on_added(&mut self, association: ResolvedAssociation<D>) -> Result<()>;

    /// An association disappeared
    ///
    /// # Errors
    ///
    /// Any error stops delivery of the remaining notifications of this step.
    fn on_removed(&mut self, association: ResolvedAssociation<D>) -> Result<()>;
}

impl<D, L: DeltaListener<D> + ?Sized> DeltaListener<D> for &mut L {
    fn on_added(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        (**self).on_added(association)
    }

    fn on_removed(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        (**self).on_removed(association)
    }
}

/// A single notification in message form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeltaEvent<D> {
    Added(ResolvedAssociation<D>),
    Removed(ResolvedAssociation<D>),
}

impl<D> DeltaEvent<D> {
    pub fn association(&self) -> &ResolvedAssociation<D> {
        match self {
            DeltaEvent::Added(association) | DeltaEvent::Removed(association) => association,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, DeltaEvent::Added(_))
    }
}

/// Listener that records every notification in dispatch order
#[derive(Debug, Clone)]
pub struct EventLog<D> {
    events: Vec<DeltaEvent<D>>,
}

impl<D> Default for EventLog<D> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<D> EventLog<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DeltaEvent<D>] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<DeltaEvent<D>> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<D> DeltaListener<D> for EventLog<D> {
    fn on_added(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        self.events.push(DeltaEvent::Added(association));
        Ok(())
    }

    fn on_removed(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        self.events.push(DeltaEvent::Removed(association));
        Ok(())
    }
}

/// Listener built from a pair of closures, one per direction
pub struct CallbackListener<A, R> {
    added: A,
    removed: R,
}

impl<A, R> CallbackListener<A, R> {
    pub fn new(added: A, removed: R) -> Self {
        Self { added, removed }
    }
}

impl<D, A, R> DeltaListener<D> for CallbackListener<A, R>
where
    A: FnMut(ResolvedAssociation<D>) -> Result<()>,
    R: FnMut(ResolvedAssociation<D>) -> Result<()>,
{
    fn on_added(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        (self.added)(association)
    }

    fn on_removed(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        (self.removed)(association)
    }
}

/// Downstream index rebuilt purely from notifications
///
/// Holds at most one association per item. Because removals arrive before
/// additions, a retag never collides; an addition for an item that is still
/// mirrored, or a removal for one that is not, means the notification stream
/// is inconsistent and is rejected.
#[derive(Debug, Clone)]
pub struct MirrorIndex<D> {
    entries: BTreeMap<Item, ResolvedAssociation<D>>,
}

impl<D> Default for MirrorIndex<D> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<D> MirrorIndex<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: &Item) -> Option<&ResolvedAssociation<D>> {
        self.entries.get(item)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D> DeltaListener<D> for MirrorIndex<D> {
    fn on_added(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        if self.entries.contains_key(&association.item) {
            return Err(DeltaError::MirrorConflict {
                item: association.item.to_string(),
            });
        }
        self.entries.insert(association.item.clone(), association);
        Ok(())
    }

    fn on_removed(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        match self.entries.remove(&association.item) {
            Some(_) => Ok(()),
            None => Err(DeltaError::MirrorMissing {
                item: association.item.to_string(),
            }),
        }
    }
}

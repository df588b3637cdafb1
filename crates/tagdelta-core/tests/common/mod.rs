use std::cell::{Cell, RefCell};

use tagdelta_core::errors::{DeltaError, Result};
use tagdelta_core::listener::{DeltaEvent, DeltaListener, EventLog};
use tagdelta_core::model::{Association, ResolvedAssociation, Snapshot, TagName};
use tagdelta_core::resolver::{TagRegistry, TagResolver};

/// Build a snapshot from `(item, tag)` pairs
#[allow(dead_code)]
pub fn snapshot(pairs: &[(&str, Option<&str>)]) -> Snapshot {
    Snapshot::try_from_associations(
        pairs
            .iter()
            .map(|(item, tag)| Association::new(*item, tag.map(TagName::from))),
    )
    .unwrap()
}

/// Registry knowing `vcsA`, `vcsB` and `vcsC`, resolving to upper-cased names
#[allow(dead_code)]
pub fn vcs_registry() -> TagRegistry<String> {
    let mut registry = TagRegistry::new();
    for name in ["vcsA", "vcsB", "vcsC"] {
        registry.register(name, name.to_uppercase());
    }
    registry
}

/// Resolver wrapper that records every name it was asked for
#[allow(dead_code)]
pub struct CountingResolver<R> {
    inner: R,
    calls: Cell<usize>,
    names: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl<R> CountingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
            names: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.borrow().clone()
    }
}

impl<R: TagResolver> TagResolver for CountingResolver<R> {
    type Descriptor = R::Descriptor;

    fn resolve(&self, tag: &TagName) -> Option<Self::Descriptor> {
        self.calls.set(self.calls.get() + 1);
        self.names.borrow_mut().push(tag.to_string());
        self.inner.resolve(tag)
    }
}

/// Listener that records like `EventLog` but fails on the n-th notification
#[allow(dead_code)]
pub struct FailingListener<D> {
    pub log: EventLog<D>,
    fail_at: Option<usize>,
    seen: usize,
}

#[allow(dead_code)]
impl<D> FailingListener<D> {
    pub fn failing_at(n: usize) -> Self {
        Self {
            log: EventLog::new(),
            fail_at: Some(n),
            seen: 0,
        }
    }

    pub fn disarm(&mut self) {
        self.fail_at = None;
    }

    fn check(&mut self, op: &str, association: &ResolvedAssociation<D>) -> Result<()> {
        self.seen += 1;
        if self.fail_at == Some(self.seen) {
            return Err(DeltaError::ListenerRejected {
                op: op.to_string(),
                item: association.item.to_string(),
                reason: "sink unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl<D> DeltaListener<D> for FailingListener<D> {
    fn on_added(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        self.check("on_added", &association)?;
        self.log.on_added(association)
    }

    fn on_removed(&mut self, association: ResolvedAssociation<D>) -> Result<()> {
        self.check("on_removed", &association)?;
        self.log.on_removed(association)
    }
}

/// Render events as `+item=tag` / `-item=tag` strings for compact assertions
#[allow(dead_code)]
pub fn render(events: &[DeltaEvent<String>]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let sign = if event.is_added() { '+' } else { '-' };
            let association = event.association();
            let tag = association.tag.as_deref().unwrap_or("<none>");
            format!("{}{}={}", sign, association.item, tag)
        })
        .collect()
}

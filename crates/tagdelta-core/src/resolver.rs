//! Tag resolver trait and implementations
//!
//! A resolver maps a [`TagName`] to a richer descriptor object. It is injected
//! into the tracker and consulted lazily, only for associations that changed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::model::TagName;

/// Resolver trait for turning tag names into descriptors
///
/// Implementations must be cheap to call repeatedly and must not touch
/// tracked state. An unknown name yields `None`; that is not an error and is
/// forwarded to listeners as-is.
pub trait TagResolver {
    /// Descriptor type handed to listeners
    type Descriptor;

    /// Resolve `tag` to its descriptor, if known
    fn resolve(&self, tag: &TagName) -> Option<Self::Descriptor>;
}

impl<R: TagResolver + ?Sized> TagResolver for &R {
    type Descriptor = R::Descriptor;

    fn resolve(&self, tag: &TagName) -> Option<Self::Descriptor> {
        (**self).resolve(tag)
    }
}

/// Plain, serializable descriptor for registries loaded from files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
    pub name: TagName,
    pub display_name: String,
}

impl TagDescriptor {
    pub fn new(name: impl Into<TagName>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// In-memory registry of known tags
///
/// The process-wide list of known tags lives here and is passed to the
/// tracker explicitly rather than read from global state.
///
/// # Example
/// ```
/// use tagdelta_core::model::TagName;
/// use tagdelta_core::resolver::{TagDescriptor, TagRegistry, TagResolver};
///
/// let mut registry = TagRegistry::new();
/// registry.register("git", TagDescriptor::new("git", "Git"));
///
/// assert_eq!(
///     registry.resolve(&TagName::from("git")).map(|d| d.display_name),
///     Some("Git".to_string())
/// );
/// assert_eq!(registry.resolve(&TagName::from("cvs")), None);
/// ```
#[derive(Debug, Clone)]
pub struct TagRegistry<D> {
    tags: HashMap<TagName, D>,
}

impl<D> Default for TagRegistry<D> {
    fn default() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }
}

impl<D> TagRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the descriptor for `name`
    ///
    /// Returns the previously registered descriptor, if any.
    pub fn register(&mut self, name: impl Into<TagName>, descriptor: D) -> Option<D> {
        self.tags.insert(name.into(), descriptor)
    }

    /// Forget `name`; later resolutions of it return `None`
    pub fn unregister(&mut self, name: &TagName) -> Option<D> {
        self.tags.remove(name)
    }

    pub fn contains(&self, name: &TagName) -> bool {
        self.tags.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl TagRegistry<TagDescriptor> {
    /// Build a registry keyed by each descriptor's own name
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = TagDescriptor>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor.name.clone(), descriptor);
        }
        registry
    }
}

impl<D: Clone> TagResolver for TagRegistry<D> {
    type Descriptor = D;

    fn resolve(&self, tag: &TagName) -> Option<D> {
        self.tags.get(tag).cloned()
    }
}

/// Resolver whose descriptor is the tag name itself
///
/// Useful when no registry exists; every name resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl TagResolver for IdentityResolver {
    type Descriptor = TagName;

    fn resolve(&self, tag: &TagName) -> Option<TagName> {
        Some(tag.clone())
    }
}

/// Resolver backed by a closure
///
/// # Example
/// ```
/// use tagdelta_core::model::TagName;
/// use tagdelta_core::resolver::{FnResolver, TagResolver};
///
/// let upper = FnResolver::new(|tag: &TagName| Some(tag.as_str().to_uppercase()));
/// assert_eq!(upper.resolve(&TagName::from("git")), Some("GIT".to_string()));
/// ```
pub struct FnResolver<F, D> {
    resolve: F,
    _descriptor: PhantomData<fn() -> D>,
}

impl<F, D> FnResolver<F, D>
where
    F: Fn(&TagName) -> Option<D>,
{
    pub fn new(resolve: F) -> Self {
        Self {
            resolve,
            _descriptor: PhantomData,
        }
    }
}

impl<F, D> TagResolver for FnResolver<F, D>
where
    F: Fn(&TagName) -> Option<D>,
{
    type Descriptor = D;

    fn resolve(&self, tag: &TagName) -> Option<D> {
        (self.resolve)(tag)
    }
}

impl<F, D> std::fmt::Debug for FnResolver<F, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces_and_unregister_forgets() {
        let mut registry = TagRegistry::new();
        assert_eq!(registry.register("git", 1), None);
        assert_eq!(registry.register("git", 2), Some(1));
        assert_eq!(registry.resolve(&TagName::from("git")), Some(2));

        assert_eq!(registry.unregister(&TagName::from("git")), Some(2));
        assert_eq!(registry.resolve(&TagName::from("git")), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_descriptors_keys_by_name() {
        let registry = TagRegistry::from_descriptors(vec![
            TagDescriptor::new("git", "Git"),
            TagDescriptor::new("hg", "Mercurial"),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&TagName::from("hg")));
    }

    #[test]
    fn test_identity_resolver_always_resolves() {
        let tag = TagName::from("anything");
        assert_eq!(IdentityResolver.resolve(&tag), Some(tag));
    }

    #[test]
    fn test_reference_forwards() {
        let mut registry = TagRegistry::new();
        registry.register("git", "Git");
        let by_ref = &registry;
        assert_eq!(by_ref.resolve(&TagName::from("git")), Some("Git"));
    }
}

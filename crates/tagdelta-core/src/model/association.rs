use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a tracked item (typically a file path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque name of a category or owner (typically a VCS name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TagName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TagName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An (item, tag name) pair as it exists in one snapshot
///
/// `tag` is `None` when the item is tracked without a tag. Equality,
/// hashing and ordering are structural over both components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Association {
    pub item: Item,
    pub tag: Option<TagName>,
}

impl Association {
    pub fn new(item: impl Into<Item>, tag: Option<TagName>) -> Self {
        Self {
            item: item.into(),
            tag,
        }
    }

    /// Association of `item` with the tag named `tag`
    pub fn tagged(item: impl Into<Item>, tag: impl Into<TagName>) -> Self {
        Self::new(item, Some(tag.into()))
    }

    /// Association of `item` with no tag
    pub fn untagged(item: impl Into<Item>) -> Self {
        Self::new(item, None)
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{} -> {}", self.item, tag),
            None => write!(f, "{} -> <none>", self.item),
        }
    }
}

/// An association after its tag name went through a resolver
///
/// `tag` is `None` both for untagged associations and for tag names the
/// resolver did not know; `tag_name` tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAssociation<D> {
    pub item: Item,
    pub tag_name: Option<TagName>,
    pub tag: Option<D>,
}

impl<D> ResolvedAssociation<D> {
    pub fn new(item: Item, tag_name: Option<TagName>, tag: Option<D>) -> Self {
        Self {
            item,
            tag_name,
            tag,
        }
    }

    /// True when a tag name was present but the resolver returned nothing
    pub fn is_unresolved(&self) -> bool {
        self.tag_name.is_some() && self.tag.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_association_equality_is_structural() {
        let a = Association::tagged("src/lib.rs", "git");
        let b = Association::tagged(String::from("src/lib.rs"), TagName::new("git"));
        let c = Association::tagged("src/lib.rs", "hg");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Association> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_untagged_differs_from_tagged() {
        assert_ne!(
            Association::untagged("README.md"),
            Association::tagged("README.md", "git")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Association::tagged("a", "git").to_string(), "a -> git");
        assert_eq!(Association::untagged("a").to_string(), "a -> <none>");
    }

    #[test]
    fn test_is_unresolved() {
        let unresolved: ResolvedAssociation<u8> =
            ResolvedAssociation::new(Item::from("a"), Some(TagName::from("x")), None);
        let untagged: ResolvedAssociation<u8> =
            ResolvedAssociation::new(Item::from("a"), None, None);

        assert!(unresolved.is_unresolved());
        assert!(!untagged.is_unresolved());
    }
}

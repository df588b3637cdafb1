//! Immutable snapshot of tracked associations.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::errors::{DeltaError, Result};
use crate::model::{Association, Item, TagName};

/// The complete set of associations at one observation point
///
/// Every item appears at most once. Validation happens at construction, so a
/// `Snapshot` value always satisfies the one-tag-per-item rule. Iteration is
/// ordered by item.
///
/// Serialized as a JSON array of `{"item": .., "tag": ..}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Association>", into = "Vec<Association>")]
pub struct Snapshot {
    entries: BTreeMap<Item, Option<TagName>>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Build a snapshot from associations
    ///
    /// Repeating an identical association is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingTags` if one item is paired with two different tags.
    pub fn try_from_associations<I>(associations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Association>,
    {
        let mut builder = SnapshotBuilder::default();
        for association in associations {
            builder.insert(association.item, association.tag)?;
        }
        Ok(builder.build())
    }

    /// Parse a snapshot from its JSON form
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed JSON and `ConflictingTags` if an
    /// item is listed with two different tags.
    pub fn from_json(text: &str) -> Result<Self> {
        let associations: Vec<Association> = serde_json::from_str(text)?;
        Self::try_from_associations(associations)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The tag of `item`: `None` if the item is absent, `Some(None)` if it is
    /// present without a tag.
    pub fn tag_of(&self, item: &Item) -> Option<Option<&TagName>> {
        self.entries.get(item).map(Option::as_ref)
    }

    pub fn contains(&self, association: &Association) -> bool {
        self.tag_of(&association.item) == Some(association.tag.as_ref())
    }

    /// Borrowing iterator over `(item, tag)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Item, Option<&TagName>)> {
        self.entries.iter().map(|(item, tag)| (item, tag.as_ref()))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.entries.keys()
    }

    /// Owned associations in item order
    pub fn associations(&self) -> impl Iterator<Item = Association> + '_ {
        self.entries
            .iter()
            .map(|(item, tag)| Association::new(item.clone(), tag.clone()))
    }
}

impl TryFrom<Vec<Association>> for Snapshot {
    type Error = DeltaError;

    fn try_from(associations: Vec<Association>) -> Result<Self> {
        Self::try_from_associations(associations)
    }
}

impl From<Snapshot> for Vec<Association> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot
            .entries
            .into_iter()
            .map(|(item, tag)| Association::new(item, tag))
            .collect()
    }
}

/// Incremental, validating snapshot construction
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    entries: BTreeMap<Item, Option<TagName>>,
}

impl SnapshotBuilder {
    /// Add one association
    ///
    /// # Errors
    ///
    /// Returns `ConflictingTags` if `item` was already inserted with a
    /// different tag.
    pub fn insert(
        &mut self,
        item: impl Into<Item>,
        tag: Option<TagName>,
    ) -> Result<&mut Self> {
        match self.entries.entry(item.into()) {
            Entry::Vacant(slot) => {
                slot.insert(tag);
            }
            Entry::Occupied(slot) => {
                if *slot.get() != tag {
                    return Err(DeltaError::ConflictingTags {
                        item: slot.key().to_string(),
                        first: display_tag(slot.get().as_ref()),
                        second: display_tag(tag.as_ref()),
                    });
                }
            }
        }
        Ok(self)
    }

    pub fn build(self) -> Snapshot {
        Snapshot {
            entries: self.entries,
        }
    }
}

fn display_tag(tag: Option<&TagName>) -> String {
    tag.map(TagName::to_string)
        .unwrap_or_else(|| "<none>".to_string())
}

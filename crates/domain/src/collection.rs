//! Collected-item records and the local membership set
//!
//! "Collection" here means a user's bookmark of a content item.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{ContentId, UserId};

/// One bookmark record as returned by `/user-collection/page`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    /// The bookmarked content item.
    pub content_id: ContentId,
    /// Owner of the bookmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Remaining backend fields (record id, timestamps, content summary).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Set of content ids believed to be collected by the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionMembership {
    ids: HashSet<ContentId>,
}

impl CollectionMembership {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from fetched records.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CollectionRecord>) -> Self {
        records.into_iter().map(|r| r.content_id).collect()
    }

    /// Returns true if the content item is collected.
    #[must_use]
    pub fn contains(&self, content_id: ContentId) -> bool {
        self.ids.contains(&content_id)
    }

    /// Marks a content item as collected. Returns false if it already was.
    pub fn insert(&mut self, content_id: ContentId) -> bool {
        self.ids.insert(content_id)
    }

    /// Unmarks a content item. Returns false if it was not collected.
    pub fn remove(&mut self, content_id: ContentId) -> bool {
        self.ids.remove(&content_id)
    }

    /// Returns the ids in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<ContentId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of collected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ContentId> for CollectionMembership {
    fn from_iter<T: IntoIterator<Item = ContentId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

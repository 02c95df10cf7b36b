//! The caller-supplied content model: items and groups-with-children.

use std::hash::Hash;

use thiserror::Error;

/// One top-level element of a [`NestedList`]: either a directly selectable
/// item, or a group of items behind a collapsible header.
///
/// `G` identifies groups; `I` is the selectable item type. Both are opaque
/// to the core and only need equality and a stable hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedListEntry<G, I> {
    /// A top-level, ungrouped selectable value.
    Item(I),
    /// A named group of selectable values.
    Group {
        /// The group's identifier, shown in its header row.
        id: G,
        /// The group's children, in display order.
        items: Vec<I>,
    },
}

impl<G, I> NestedListEntry<G, I> {
    /// Returns the group identifier if this entry is a group.
    pub fn group_id(&self) -> Option<&G> {
        match self {
            Self::Item(_) => None,
            Self::Group { id, .. } => Some(id),
        }
    }

    /// Returns the group's children if this entry is a group.
    pub fn children(&self) -> Option<&[I]> {
        match self {
            Self::Item(_) => None,
            Self::Group { items, .. } => Some(items),
        }
    }
}

/// Errors reported by [`NestedList::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NestedListError {
    /// The same group identifier appears on more than one entry.
    ///
    /// Group identifiers must be unique within one list; projection and
    /// lookup-by-identifier are ambiguous otherwise.
    #[error("duplicate group identifier on entries {first} and {second}")]
    DuplicateGroup {
        /// Index of the first entry carrying the identifier.
        first: usize,
        /// Index of the offending duplicate entry.
        second: usize,
    },
}

/// An ordered sequence of top-level items and groups-with-children.
///
/// This is the caller's source of truth for the popup's content. It is
/// replaced wholesale whenever content changes; the core only reads it to
/// re-derive the popup projection.
///
/// # Caller contract
///
/// Group identifiers must be unique within a single list. [`validate`]
/// checks the contract explicitly; projection asserts it in debug builds.
/// Items may repeat freely, both across groups and at top level; an item
/// is distinguished in the popup by its `(item, group)` pair.
///
/// [`validate`]: NestedList::validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedList<G, I> {
    entries: Vec<NestedListEntry<G, I>>,
}

impl<G, I> Default for NestedList<G, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, I> NestedList<G, I> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&NestedListEntry<G, I>> {
        self.entries.get(index)
    }

    /// Iterates the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NestedListEntry<G, I>> {
        self.entries.iter()
    }

    /// Appends an ungrouped item.
    pub fn push_item(&mut self, item: I) {
        self.entries.push(NestedListEntry::Item(item));
    }

    /// Appends a group with the given children.
    pub fn push_group(&mut self, id: G, items: Vec<I>) {
        self.entries.push(NestedListEntry::Group { id, items });
    }
}

impl<G: Eq + Hash, I> NestedList<G, I> {
    /// Checks the caller contract that group identifiers are unique within
    /// this list.
    ///
    /// The data sources do not call this on every replacement; it exists
    /// so callers assembling lists from dynamic data can fail loudly
    /// instead of feeding an ambiguous list to the projection engine.
    pub fn validate(&self) -> Result<(), NestedListError> {
        let mut seen: std::collections::HashMap<&G, usize> = std::collections::HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(id) = entry.group_id() {
                if let Some(&first) = seen.get(id) {
                    return Err(NestedListError::DuplicateGroup {
                        first,
                        second: index,
                    });
                }
                seen.insert(id, index);
            }
        }
        Ok(())
    }

    /// Returns the index of the entry for the group with the given
    /// identifier, if present.
    pub fn index_of_group(&self, id: &G) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.group_id() == Some(id))
    }
}

impl<G, I> From<Vec<NestedListEntry<G, I>>> for NestedList<G, I> {
    fn from(entries: Vec<NestedListEntry<G, I>>) -> Self {
        Self { entries }
    }
}

impl<G, I> FromIterator<NestedListEntry<G, I>> for NestedList<G, I> {
    fn from_iter<T: IntoIterator<Item = NestedListEntry<G, I>>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, G, I> IntoIterator for &'a NestedList<G, I> {
    type Item = &'a NestedListEntry<G, I>;
    type IntoIter = std::slice::Iter<'a, NestedListEntry<G, I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

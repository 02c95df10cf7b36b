//! Expansion state: the set of currently-open group identifiers.

use std::collections::HashSet;
use std::hash::Hash;

/// The set of group identifiers whose children are currently visible.
///
/// Owned by a data source, initialized empty, and mutated only by
/// expansion toggles. The state deliberately persists across content
/// replacements: an identifier stays "expanded" even while its group is
/// absent from the current [`NestedList`](super::NestedList), so a group
/// removed and later re-added with the same identifier reappears open.
#[derive(Debug, Clone)]
pub struct ExpansionState<G> {
    expanded: HashSet<G>,
}

impl<G> Default for ExpansionState<G> {
    fn default() -> Self {
        Self {
            expanded: HashSet::new(),
        }
    }
}

impl<G: Clone + Eq + Hash> ExpansionState<G> {
    /// Creates an empty state: every group starts collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the group with the given identifier is expanded.
    pub fn is_expanded(&self, id: &G) -> bool {
        self.expanded.contains(id)
    }

    /// Sets the expansion of the given group, returning `true` if the
    /// state actually changed.
    ///
    /// Setting a group to its current value is a no-op; callers use the
    /// return value to suppress re-projection and notifications.
    pub fn set_expanded(&mut self, id: &G, expanded: bool) -> bool {
        if expanded {
            self.expanded.insert(id.clone())
        } else {
            self.expanded.remove(id)
        }
    }

    /// Flips the expansion of the given group, returning the new value.
    pub fn toggle(&mut self, id: &G) -> bool {
        let target = !self.is_expanded(id);
        self.set_expanded(id, target);
        target
    }

    /// Number of currently expanded groups.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if no group is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

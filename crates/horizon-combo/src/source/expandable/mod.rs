//! Data sources for nested groups-and-items content.
//!
//! Three implementations share one interface:
//!
//! - [`DiffableExpandableDataSource`]: the snapshot-apply strategy. Every
//!   change is reduced to a minimal identity-keyed patch by the diff
//!   engine, so views animate exactly the rows that changed.
//! - [`CompatExpandableDataSource`]: the manual-patch strategy for hosts
//!   without identity-based diffing. Expansion toggles become
//!   hand-computed single-section patches; any other content change falls
//!   back to a full reload.
//! - [`AdaptiveExpandableDataSource`]: delegates to one of the two,
//!   chosen once at construction from a [`DiffStrategy`] capability flag.
//!
//! The three are behaviorally equivalent from the caller's perspective:
//! same visible row order and the same activation semantics and notifications.
//! They differ only in how much of a change the popup view can animate.

use std::hash::Hash;

use super::ComboBoxDataSource;
use crate::model::{NestedList, PopupRow, RowLocation, Snapshot};

mod adaptive;
mod compat;
mod diffable;

pub use adaptive::AdaptiveExpandableDataSource;
pub use compat::CompatExpandableDataSource;
pub use diffable::DiffableExpandableDataSource;

/// A closure that produces a cell for a group header row.
///
/// Receives the row's location, the group's identifier, and whether the
/// group is currently expanded (for chevron state).
pub type GroupHeaderCellProvider<G, C> = Box<dyn Fn(RowLocation, &G, bool) -> C>;

/// A closure that produces a cell for a selectable item row.
///
/// Receives the row's location, the item, and the containing group
/// (`None` for top-level items).
pub type ItemCellProvider<G, I, C> = Box<dyn Fn(RowLocation, &I, Option<&G>) -> C>;

/// Capability flag selecting the patch-computation strategy at
/// construction.
///
/// The hosting environment decides which strategy its view layer
/// supports; the core never probes the environment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStrategy {
    /// The view can apply identity-keyed multi-section patches
    /// ([`DiffableExpandableDataSource`]).
    Snapshot,
    /// The view only supports explicit single-section row edits and full
    /// reloads ([`CompatExpandableDataSource`]).
    Manual,
}

/// The uniform interface of the expandable data-source family.
pub trait ExpandableDataSource: ComboBoxDataSource {
    /// The type identifying groups.
    type GroupId: Clone + Eq + Hash;
    /// The selectable item type.
    type Item: Clone + Eq + Hash;

    /// The current content.
    fn contents(&self) -> &NestedList<Self::GroupId, Self::Item>;

    /// Replaces the content wholesale and brings the popup up to date.
    ///
    /// Replacing the content with an equal list is a complete no-op.
    /// Expansion state persists across replacements.
    fn set_contents(&mut self, contents: NestedList<Self::GroupId, Self::Item>);

    /// The currently selected item, if any.
    fn selected_item(&self) -> Option<&Self::Item>;

    /// Programmatically assigns the selection.
    ///
    /// This is silent: no `selection_changed` is emitted. Only user
    /// commits through `did_select_cell` notify.
    fn set_selected_item(&mut self, item: Option<Self::Item>);

    /// Returns whether the group with the given identifier is expanded.
    fn is_group_expanded(&self, id: &Self::GroupId) -> bool;

    /// Sets the expansion of the given group.
    ///
    /// Setting a group to its current state is a complete no-op: no
    /// patch, no notifications. Otherwise the popup is re-projected,
    /// diffed, and collaborators are notified.
    fn set_group_expanded(&mut self, id: &Self::GroupId, expanded: bool);

    /// Flips the expansion of the given group.
    fn toggle_group(&mut self, id: &Self::GroupId) {
        let target = !self.is_group_expanded(id);
        self.set_group_expanded(id, target);
    }

    /// The currently displayed projection.
    fn snapshot(&self) -> &Snapshot<Self::GroupId, Self::Item>;

    /// The row identity at the given location in the current projection,
    /// or `None` if out of range.
    fn row_at(&self, location: RowLocation) -> Option<&PopupRow<Self::GroupId, Self::Item>> {
        self.snapshot().row_at(location)
    }
}

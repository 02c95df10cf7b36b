//! Row and section identity for the popup projection.
//!
//! Diffing is keyed by *identity*: a group header is the same row before
//! and after it expands, and an item is the same row only within the same
//! group. The equality and hash implementations here encode exactly that,
//! which is what lets the diff engine reload a header in place instead of
//! removing and re-inserting it.

use std::hash::{Hash, Hasher};

/// Position of a row within the popup, as (section, row) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLocation {
    /// Index of the section containing the row.
    pub section: usize,
    /// Index of the row within its section.
    pub row: usize,
}

impl RowLocation {
    /// Creates a location from section and row indices.
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl std::fmt::Display for RowLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

/// Key identifying one popup section.
///
/// Each top-level [`NestedListEntry`](super::NestedListEntry) produces one
/// section: a singleton section for an ungrouped item, or a group section
/// holding the header and the group's visible children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKey<G, I> {
    /// Singleton section wrapping a top-level ungrouped item.
    Item(I),
    /// Section backed by the group with the given identifier.
    Group(G),
}

/// One displayable unit in the popup projection.
///
/// # Identity
///
/// `PartialEq`/`Hash` define *row identity*, which deliberately ignores
/// the header's `expanded` flag: the flag is render-state, not identity.
/// Two headers for the same group are the same row even if one is drawn
/// expanded and the other collapsed; the diff engine turns that difference
/// into an in-place reload via [`same_display`](PopupRow::same_display).
///
/// Items are identified by their `(item, group)` pair, so the same value
/// appearing in two groups (or both grouped and ungrouped) yields
/// distinct rows.
#[derive(Debug, Clone)]
pub enum PopupRow<G, I> {
    /// The tappable header row of a group.
    GroupHeader {
        /// The group's identifier.
        id: G,
        /// Whether the group's children are currently visible.
        expanded: bool,
    },
    /// A selectable item row.
    Item {
        /// The selectable value.
        item: I,
        /// The containing group, or `None` for a top-level item.
        group: Option<G>,
    },
}

impl<G, I> PopupRow<G, I> {
    /// Returns `true` if this row is a group header.
    pub fn is_group_header(&self) -> bool {
        matches!(self, Self::GroupHeader { .. })
    }
}

impl<G: PartialEq, I: PartialEq> PopupRow<G, I> {
    /// Full content comparison, including render-state the identity
    /// comparison ignores.
    ///
    /// Identity-equal rows for which this returns `false` need an in-place
    /// reload (a header whose `expanded` flag flipped).
    pub fn same_display(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::GroupHeader { id: a, expanded: ea },
                Self::GroupHeader { id: b, expanded: eb },
            ) => a == b && ea == eb,
            (
                Self::Item { item: a, group: ga },
                Self::Item { item: b, group: gb },
            ) => a == b && ga == gb,
            _ => false,
        }
    }
}

impl<G: PartialEq, I: PartialEq> PartialEq for PopupRow<G, I> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::GroupHeader { id: a, .. }, Self::GroupHeader { id: b, .. }) => a == b,
            (
                Self::Item { item: a, group: ga },
                Self::Item { item: b, group: gb },
            ) => a == b && ga == gb,
            _ => false,
        }
    }
}

impl<G: Eq, I: Eq> Eq for PopupRow<G, I> {}

impl<G: Hash, I: Hash> Hash for PopupRow<G, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::GroupHeader { id, .. } => {
                state.write_u8(0);
                id.hash(state);
            }
            Self::Item { item, group } => {
                state.write_u8(1);
                item.hash(state);
                group.hash(state);
            }
        }
    }
}

//! The projection engine: flattening a nested list into popup rows.

use std::hash::Hash;

use super::expansion::ExpansionState;
use super::nested_list::{NestedList, NestedListEntry};
use super::row::{PopupRow, RowLocation, SectionKey};

/// A contiguous run of popup rows backing one top-level
/// [`NestedListEntry`].
///
/// An ungrouped item produces a singleton section; a group produces its
/// header row followed by its children when expanded, or the header alone
/// when collapsed.
///
/// Equality follows [`PopupRow`] identity (render-state excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupSection<G, I> {
    pub(crate) key: SectionKey<G, I>,
    pub(crate) rows: Vec<PopupRow<G, I>>,
}

impl<G, I> PopupSection<G, I> {
    /// The key identifying this section across projections.
    pub fn key(&self) -> &SectionKey<G, I> {
        &self.key
    }

    /// The section's rows, in display order.
    pub fn rows(&self) -> &[PopupRow<G, I>] {
        &self.rows
    }

    /// Number of rows in this section.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the section has no rows.
    ///
    /// Projected sections always contain at least one row; this exists for
    /// hand-built snapshots (the linear sources keep a single section that
    /// may be empty).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The flat, ordered projection of a [`NestedList`] under an
/// [`ExpansionState`]: the row sequence the popup actually displays.
///
/// A snapshot is a pure value: [`project`](Snapshot::project) of the same
/// inputs always yields the same snapshot, and nothing in it changes
/// behind the caller's back. Data sources keep the last-applied snapshot
/// and diff new projections against it.
///
/// Equality follows row identity (see [`PopupRow`]); two snapshots that
/// differ only in a header's `expanded` flag compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<G, I> {
    sections: Vec<PopupSection<G, I>>,
}

impl<G, I> Default for Snapshot<G, I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<G, I> Snapshot<G, I> {
    /// Creates a snapshot with no sections.
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub(crate) fn from_sections(sections: Vec<PopupSection<G, I>>) -> Self {
        Self { sections }
    }

    /// The sections in display order.
    pub fn sections(&self) -> &[PopupSection<G, I>] {
        &self.sections
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// The section at `index`, if any.
    pub fn section(&self, index: usize) -> Option<&PopupSection<G, I>> {
        self.sections.get(index)
    }

    /// Number of rows in the section at `index`, or 0 if out of range.
    pub fn row_count_in(&self, index: usize) -> usize {
        self.sections.get(index).map_or(0, PopupSection::len)
    }

    /// Total number of rows across all sections.
    pub fn total_row_count(&self) -> usize {
        self.sections.iter().map(PopupSection::len).sum()
    }

    /// The row at the given location, or `None` if either index is out of
    /// range.
    ///
    /// Stale locations (e.g. an activation event that raced a content
    /// replacement) resolve to `None` rather than panicking.
    pub fn row_at(&self, location: RowLocation) -> Option<&PopupRow<G, I>> {
        self.sections.get(location.section)?.rows.get(location.row)
    }

    /// Iterates all rows in display order, ignoring section boundaries.
    pub fn rows(&self) -> impl Iterator<Item = &PopupRow<G, I>> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    /// Returns `true` if the snapshot contains no rows.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(PopupSection::is_empty)
    }
}

impl<G: Clone + Eq + Hash, I: Clone + Eq + Hash> Snapshot<G, I> {
    /// Projects a nested list into the flat row sequence the popup should
    /// display.
    ///
    /// For each entry, in list order:
    ///
    /// - an ungrouped item becomes a singleton section holding one item
    ///   row;
    /// - a group becomes a section holding its header row, followed by one
    ///   row per child, in original order, only if the group's
    ///   identifier is in `expansion`.
    ///
    /// Runs in O(total items) and is cheap enough to call on every content
    /// or expansion change.
    pub fn project(list: &NestedList<G, I>, expansion: &ExpansionState<G>) -> Self {
        debug_assert!(
            list.validate().is_ok(),
            "nested list contains duplicate group identifiers: {:?}",
            list.validate()
        );

        let sections = list
            .iter()
            .map(|entry| match entry {
                NestedListEntry::Item(item) => PopupSection {
                    key: SectionKey::Item(item.clone()),
                    rows: vec![PopupRow::Item {
                        item: item.clone(),
                        group: None,
                    }],
                },
                NestedListEntry::Group { id, items } => {
                    let expanded = expansion.is_expanded(id);
                    let mut rows =
                        Vec::with_capacity(1 + if expanded { items.len() } else { 0 });
                    rows.push(PopupRow::GroupHeader {
                        id: id.clone(),
                        expanded,
                    });
                    if expanded {
                        rows.extend(items.iter().map(|item| PopupRow::Item {
                            item: item.clone(),
                            group: Some(id.clone()),
                        }));
                    }
                    PopupSection {
                        key: SectionKey::Group(id.clone()),
                        rows,
                    }
                }
            })
            .collect();

        let snapshot = Self { sections };
        tracing::trace!(
            target: "horizon_combo::projection",
            sections = snapshot.section_count(),
            rows = snapshot.total_row_count(),
            "projected nested list"
        );
        snapshot
    }

    /// Returns the index of the section backed by the given group, if the
    /// group is present in this snapshot.
    pub fn section_of_group(&self, id: &G) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| matches!(section.key(), SectionKey::Group(g) if g == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> NestedList<&'static str, &'static str> {
        let mut list = NestedList::new();
        list.push_item("Alpha");
        list.push_group("Beta", vec!["Lambda", "Kappa"]);
        list.push_group("Gamma", vec!["Omega", "Delta", "Epsilon"]);
        list
    }

    #[test]
    fn test_project_all_collapsed() {
        let snapshot = Snapshot::project(&sample_list(), &ExpansionState::new());

        assert_eq!(snapshot.section_count(), 3);
        assert_eq!(snapshot.total_row_count(), 3);

        let rows: Vec<_> = snapshot.rows().collect();
        assert!(matches!(
            rows[0],
            PopupRow::Item {
                item: "Alpha",
                group: None
            }
        ));
        assert!(matches!(
            rows[1],
            PopupRow::GroupHeader {
                id: "Beta",
                expanded: false
            }
        ));
        assert!(matches!(
            rows[2],
            PopupRow::GroupHeader {
                id: "Gamma",
                expanded: false
            }
        ));
    }

    #[test]
    fn test_project_expanded_group() {
        let mut expansion = ExpansionState::new();
        expansion.set_expanded(&"Beta", true);
        let snapshot = Snapshot::project(&sample_list(), &expansion);

        assert_eq!(snapshot.section_count(), 3);
        assert_eq!(snapshot.total_row_count(), 5);
        assert_eq!(snapshot.row_count_in(1), 3);

        let beta = snapshot.section(1).unwrap();
        assert!(matches!(
            beta.rows()[0],
            PopupRow::GroupHeader {
                id: "Beta",
                expanded: true
            }
        ));
        assert!(matches!(
            beta.rows()[1],
            PopupRow::Item {
                item: "Lambda",
                group: Some("Beta")
            }
        ));
        assert!(matches!(
            beta.rows()[2],
            PopupRow::Item {
                item: "Kappa",
                group: Some("Beta")
            }
        ));
    }

    #[test]
    fn test_project_is_pure() {
        let list = sample_list();
        let mut expansion = ExpansionState::new();
        expansion.set_expanded(&"Gamma", true);

        let first = Snapshot::project(&list, &expansion);
        let second = Snapshot::project(&list, &expansion);

        assert_eq!(first, second);
        assert!(
            first
                .rows()
                .zip(second.rows())
                .all(|(a, b)| a.same_display(b))
        );
    }

    #[test]
    fn test_project_empty_list() {
        let list: NestedList<&str, &str> = NestedList::new();
        let snapshot = Snapshot::project(&list, &ExpansionState::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.section_count(), 0);
    }

    #[test]
    fn test_expansion_of_absent_group_is_inert() {
        let mut expansion = ExpansionState::new();
        expansion.set_expanded(&"Delta", true);
        let snapshot = Snapshot::project(&sample_list(), &expansion);
        assert_eq!(snapshot.total_row_count(), 3);
    }

    #[test]
    fn test_row_at_bounds() {
        let snapshot = Snapshot::project(&sample_list(), &ExpansionState::new());

        assert!(snapshot.row_at(RowLocation::new(0, 0)).is_some());
        assert!(snapshot.row_at(RowLocation::new(0, 1)).is_none());
        assert!(snapshot.row_at(RowLocation::new(3, 0)).is_none());
        // Collapsed group: children are not addressable.
        assert!(snapshot.row_at(RowLocation::new(1, 1)).is_none());
    }

    #[test]
    fn test_section_of_group() {
        let snapshot = Snapshot::project(&sample_list(), &ExpansionState::new());
        assert_eq!(snapshot.section_of_group(&"Beta"), Some(1));
        assert_eq!(snapshot.section_of_group(&"Gamma"), Some(2));
        assert_eq!(snapshot.section_of_group(&"Alpha"), None);
    }
}

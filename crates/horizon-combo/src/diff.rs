//! Minimal patch computation between popup snapshots.
//!
//! Re-projecting the whole popup on every change is cheap; re-rendering
//! every row is not. This module reduces a `(previous, next)` snapshot
//! pair to the smallest edit script the view has to animate: section and
//! row insertions/removals keyed by identity, plus in-place reloads for
//! rows whose identity survived but whose display content changed (a
//! header's expanded chevron, typically).
//!
//! # Index semantics
//!
//! The patch follows batch-update conventions: removals and reloads are
//! indexed in the *previous* snapshot's coordinates, insertions in the
//! *next* snapshot's. Views that maintain their own row storage can
//! replay a patch with [`PopupPatch::apply`].

use std::hash::Hash;

use crate::model::{PopupSection, RowLocation, Snapshot};

// ============================================================================
// Patch Types
// ============================================================================

/// A structured set of section- and row-level edits that transforms one
/// snapshot's visible row order into another's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupPatch {
    /// Sections removed, indexed in the previous snapshot, ascending.
    pub removed_sections: Vec<usize>,
    /// Sections inserted, indexed in the next snapshot, ascending.
    /// An inserted section brings its entire row set with it.
    pub inserted_sections: Vec<usize>,
    /// Rows removed from surviving sections, in previous coordinates.
    pub removed_rows: Vec<RowLocation>,
    /// Rows inserted into surviving sections, in next coordinates.
    pub inserted_rows: Vec<RowLocation>,
    /// Rows whose identity is unchanged but whose display content
    /// changed, in previous coordinates.
    pub reloaded_rows: Vec<RowLocation>,
}

impl PopupPatch {
    /// Returns `true` if the patch contains no edits at all.
    pub fn is_empty(&self) -> bool {
        self.removed_sections.is_empty()
            && self.inserted_sections.is_empty()
            && self.removed_rows.is_empty()
            && self.inserted_rows.is_empty()
            && self.reloaded_rows.is_empty()
    }

    /// Total number of edit operations in the patch.
    pub fn op_count(&self) -> usize {
        self.removed_sections.len()
            + self.inserted_sections.len()
            + self.removed_rows.len()
            + self.inserted_rows.len()
            + self.reloaded_rows.len()
    }

    /// Replays this patch's structural edits against `previous`, pulling
    /// inserted content from `next`.
    ///
    /// When the patch was computed by [`diff_snapshots(previous, next)`]
    /// the result's row order equals `next`'s exactly. Reloads are not
    /// structural: a reloaded row keeps its position and is refreshed by
    /// re-querying the data source, so it does not participate here.
    ///
    /// [`diff_snapshots(previous, next)`]: diff_snapshots
    pub fn apply<G: Clone, I: Clone>(
        &self,
        previous: &Snapshot<G, I>,
        next: &Snapshot<G, I>,
    ) -> Snapshot<G, I> {
        let mut sections: Vec<PopupSection<G, I>> = previous.sections().to_vec();

        // Row removals first, bottom-up so earlier indices stay valid.
        let mut removed_rows = self.removed_rows.clone();
        removed_rows.sort_by_key(|loc| (loc.section, loc.row));
        for location in removed_rows.iter().rev() {
            if let Some(section) = sections.get_mut(location.section) {
                if location.row < section.rows.len() {
                    section.rows.remove(location.row);
                }
            }
        }

        // Section removals, bottom-up.
        let mut removed_sections = self.removed_sections.clone();
        removed_sections.sort_unstable();
        for &index in removed_sections.iter().rev() {
            if index < sections.len() {
                sections.remove(index);
            }
        }

        // Section insertions, top-down, in next coordinates.
        let mut inserted_sections = self.inserted_sections.clone();
        inserted_sections.sort_unstable();
        for &index in &inserted_sections {
            if let Some(section) = next.section(index) {
                let index = index.min(sections.len());
                sections.insert(index, section.clone());
            }
        }

        // Row insertions, top-down, in next coordinates.
        let mut inserted_rows = self.inserted_rows.clone();
        inserted_rows.sort_by_key(|loc| (loc.section, loc.row));
        for location in &inserted_rows {
            if let (Some(section), Some(row)) =
                (sections.get_mut(location.section), next.row_at(*location))
            {
                let index = location.row.min(section.rows.len());
                section.rows.insert(index, row.clone());
            }
        }

        Snapshot::from_sections(sections)
    }
}

/// How the popup view should bring itself up to date after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupUpdate {
    /// Discard everything and redraw from the data source's current
    /// snapshot. Emitted by the manual-patch strategy for any change it
    /// does not compute a targeted patch for.
    Reload,
    /// Apply the contained edits; untouched rows keep their cells.
    Patch(PopupPatch),
}

impl PopupUpdate {
    /// Returns the contained patch, if this is a targeted update.
    pub fn patch(&self) -> Option<&PopupPatch> {
        match self {
            Self::Reload => None,
            Self::Patch(patch) => Some(patch),
        }
    }
}

// ============================================================================
// Diffing
// ============================================================================

/// Computes the minimal identity-keyed patch turning `previous` into
/// `next`.
///
/// Sections are aligned by [`SectionKey`](crate::model::SectionKey); rows
/// within surviving sections are aligned by [`PopupRow`] identity (which
/// ignores render-state). Identity-matched rows whose display content
/// changed become in-place reloads. Diffing a snapshot against an equal
/// one yields an empty patch.
///
/// [`PopupRow`]: crate::model::PopupRow
pub fn diff_snapshots<G, I>(previous: &Snapshot<G, I>, next: &Snapshot<G, I>) -> PopupPatch
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    let mut patch = PopupPatch::default();

    let matched = longest_common_pairs(
        previous.sections(),
        next.sections(),
        |a, b| a.key() == b.key(),
    );

    let mut matched_old: Vec<bool> = vec![false; previous.section_count()];
    let mut matched_new: Vec<bool> = vec![false; next.section_count()];
    for &(old_index, new_index) in &matched {
        matched_old[old_index] = true;
        matched_new[new_index] = true;
    }

    patch.removed_sections = (0..previous.section_count())
        .filter(|&index| !matched_old[index])
        .collect();
    patch.inserted_sections = (0..next.section_count())
        .filter(|&index| !matched_new[index])
        .collect();

    for &(old_index, new_index) in &matched {
        let old_rows = previous.sections()[old_index].rows();
        let new_rows = next.sections()[new_index].rows();

        let row_pairs = longest_common_pairs(old_rows, new_rows, |a, b| a == b);

        let mut row_matched_old = vec![false; old_rows.len()];
        let mut row_matched_new = vec![false; new_rows.len()];
        for &(old_row, new_row) in &row_pairs {
            row_matched_old[old_row] = true;
            row_matched_new[new_row] = true;

            if !old_rows[old_row].same_display(&new_rows[new_row]) {
                patch
                    .reloaded_rows
                    .push(RowLocation::new(old_index, old_row));
            }
        }

        patch.removed_rows.extend(
            (0..old_rows.len())
                .filter(|&row| !row_matched_old[row])
                .map(|row| RowLocation::new(old_index, row)),
        );
        patch.inserted_rows.extend(
            (0..new_rows.len())
                .filter(|&row| !row_matched_new[row])
                .map(|row| RowLocation::new(new_index, row)),
        );
    }

    tracing::trace!(
        target: "horizon_combo::diff",
        ops = patch.op_count(),
        "computed popup patch"
    );
    patch
}

/// Longest common subsequence over two slices, as matched index pairs in
/// ascending order.
///
/// Classic O(n·m) dynamic program; popup lists are small enough that
/// anything cleverer would be noise.
fn longest_common_pairs<T, F>(a: &[T], b: &[T], eq: F) -> Vec<(usize, usize)>
where
    F: Fn(&T, &T) -> bool,
{
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // lengths[i][j] = LCS length of a[i..] and b[j..], flattened.
    let width = m + 1;
    let mut lengths = vec![0usize; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i * width + j] = if eq(&a[i], &b[j]) {
                lengths[(i + 1) * width + j + 1] + 1
            } else {
                lengths[(i + 1) * width + j].max(lengths[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(lengths[0]);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if eq(&a[i], &b[j]) {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[(i + 1) * width + j] >= lengths[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpansionState, NestedList, Snapshot};

    fn sample_list() -> NestedList<&'static str, &'static str> {
        let mut list = NestedList::new();
        list.push_item("Alpha");
        list.push_group("Beta", vec!["Lambda", "Kappa"]);
        list.push_group("Gamma", vec!["Omega", "Delta", "Epsilon"]);
        list
    }

    fn project(
        list: &NestedList<&'static str, &'static str>,
        expanded: &[&'static str],
    ) -> Snapshot<&'static str, &'static str> {
        let mut expansion = ExpansionState::new();
        for id in expanded {
            expansion.set_expanded(id, true);
        }
        Snapshot::project(list, &expansion)
    }

    #[test]
    fn test_diff_equal_snapshots_is_empty() {
        let list = sample_list();
        let snapshot = project(&list, &["Beta"]);
        let patch = diff_snapshots(&snapshot, &snapshot.clone());
        assert!(patch.is_empty());
        assert_eq!(patch.op_count(), 0);
    }

    #[test]
    fn test_diff_expansion_inserts_children_and_reloads_header() {
        let list = sample_list();
        let collapsed = project(&list, &[]);
        let expanded = project(&list, &["Beta"]);

        let patch = diff_snapshots(&collapsed, &expanded);

        assert_eq!(patch.removed_sections, Vec::<usize>::new());
        assert_eq!(patch.inserted_sections, Vec::<usize>::new());
        assert_eq!(patch.removed_rows, Vec::<RowLocation>::new());
        assert_eq!(
            patch.inserted_rows,
            vec![RowLocation::new(1, 1), RowLocation::new(1, 2)]
        );
        assert_eq!(patch.reloaded_rows, vec![RowLocation::new(1, 0)]);
    }

    #[test]
    fn test_diff_collapse_removes_children() {
        let list = sample_list();
        let expanded = project(&list, &["Gamma"]);
        let collapsed = project(&list, &[]);

        let patch = diff_snapshots(&expanded, &collapsed);

        assert_eq!(
            patch.removed_rows,
            vec![
                RowLocation::new(2, 1),
                RowLocation::new(2, 2),
                RowLocation::new(2, 3)
            ]
        );
        assert_eq!(patch.inserted_rows, Vec::<RowLocation>::new());
        assert_eq!(patch.reloaded_rows, vec![RowLocation::new(2, 0)]);
    }

    #[test]
    fn test_diff_empty_group_toggle_is_reload_only() {
        let mut list: NestedList<&str, &str> = NestedList::new();
        list.push_group("Beta", vec![]);

        let collapsed = project(&list, &[]);
        let expanded = project(&list, &["Beta"]);

        let patch = diff_snapshots(&collapsed, &expanded);
        assert_eq!(patch.reloaded_rows, vec![RowLocation::new(0, 0)]);
        assert_eq!(patch.op_count(), 1);
    }

    #[test]
    fn test_diff_content_replacement() {
        let old_list = sample_list();

        // Drop the Beta group, add a trailing item.
        let mut new_list: NestedList<&str, &str> = NestedList::new();
        new_list.push_item("Alpha");
        new_list.push_group("Gamma", vec!["Omega", "Delta", "Epsilon"]);
        new_list.push_item("Sigma");

        let previous = project(&old_list, &[]);
        let next = project(&new_list, &[]);

        let patch = diff_snapshots(&previous, &next);

        assert_eq!(patch.removed_sections, vec![1]);
        assert_eq!(patch.inserted_sections, vec![2]);
        assert!(patch.removed_rows.is_empty());
        assert!(patch.inserted_rows.is_empty());
        assert!(patch.reloaded_rows.is_empty());
    }

    #[test]
    fn test_diff_to_empty_removes_everything() {
        let previous = project(&sample_list(), &["Beta", "Gamma"]);
        let next: Snapshot<&str, &str> = Snapshot::empty();

        let patch = diff_snapshots(&previous, &next);
        assert_eq!(patch.removed_sections, vec![0, 1, 2]);
        assert!(patch.inserted_sections.is_empty());

        assert_eq!(patch.apply(&previous, &next), next);
    }

    #[test]
    fn test_apply_reproduces_next_order() {
        let old_list = sample_list();
        let mut new_list: NestedList<&str, &str> = NestedList::new();
        new_list.push_group("Gamma", vec!["Omega", "Nu"]);
        new_list.push_item("Alpha");
        new_list.push_group("Delta", vec!["Chi"]);

        let cases = [
            (project(&old_list, &[]), project(&new_list, &[])),
            (project(&old_list, &["Beta"]), project(&new_list, &["Gamma"])),
            (
                project(&old_list, &["Beta", "Gamma"]),
                project(&new_list, &["Gamma", "Delta"]),
            ),
            (project(&old_list, &["Gamma"]), project(&old_list, &["Beta"])),
        ];

        for (previous, next) in cases {
            let patch = diff_snapshots(&previous, &next);
            let replayed = patch.apply(&previous, &next);
            assert_eq!(replayed, next);
        }
    }

    #[test]
    fn test_diff_child_edit_within_group() {
        let mut old_list: NestedList<&str, &str> = NestedList::new();
        old_list.push_group("Beta", vec!["Lambda", "Kappa"]);
        let mut new_list: NestedList<&str, &str> = NestedList::new();
        new_list.push_group("Beta", vec!["Lambda", "Mu", "Kappa"]);

        let previous = project(&old_list, &["Beta"]);
        let next = project(&new_list, &["Beta"]);

        let patch = diff_snapshots(&previous, &next);
        assert_eq!(patch.inserted_rows, vec![RowLocation::new(0, 2)]);
        assert!(patch.removed_rows.is_empty());
        assert!(patch.reloaded_rows.is_empty());
        assert_eq!(patch.apply(&previous, &next), next);
    }

    #[test]
    fn test_longest_common_pairs() {
        let a = [1, 2, 3, 4, 5];
        let b = [2, 4, 5, 6];
        let pairs = longest_common_pairs(&a, &b, |x, y| x == y);
        assert_eq!(pairs, vec![(1, 0), (3, 1), (4, 2)]);

        let empty: [i32; 0] = [];
        assert!(longest_common_pairs(&empty, &b, |x, y| x == y).is_empty());
    }
}

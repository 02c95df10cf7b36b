//! The snapshot-apply expandable data source.

use std::hash::Hash;

use horizon_combo_core::ThreadAffinity;

use super::{ExpandableDataSource, GroupHeaderCellProvider, ItemCellProvider};
use crate::diff::{PopupUpdate, diff_snapshots};
use crate::model::{ExpansionState, NestedList, PopupRow, RowLocation, Snapshot};
use crate::source::{Activation, ComboBoxDataSource, DataSourceSignals, SelectionCellProvider};

/// An [`ExpandableDataSource`] that reduces every content or expansion
/// change to a minimal identity-keyed patch.
///
/// This is the preferred strategy: the popup view receives exactly the
/// row insertions, removals, and in-place reloads that a change implies,
/// and can animate them smoothly even while the popup is on screen.
///
/// # Example
///
/// ```
/// use horizon_combo::model::{NestedList, NestedListEntry};
/// use horizon_combo::source::expandable::{
///     DiffableExpandableDataSource, ExpandableDataSource,
/// };
///
/// let mut source = DiffableExpandableDataSource::new(
///     |item: Option<&String>| item.cloned().unwrap_or_else(|| "Select...".into()),
///     |_loc, group: &String, expanded| format!("{group} ({expanded})"),
///     |_loc, item: &String, _group| item.clone(),
/// );
///
/// source.set_contents(NestedList::from(vec![
///     NestedListEntry::Item("Alpha".to_string()),
///     NestedListEntry::Group {
///         id: "Beta".to_string(),
///         items: vec!["Lambda".to_string(), "Kappa".to_string()],
///     },
/// ]));
///
/// source.toggle_group(&"Beta".to_string());
/// assert_eq!(source.snapshot().total_row_count(), 4);
/// ```
pub struct DiffableExpandableDataSource<G, I, C> {
    contents: NestedList<G, I>,
    selected_item: Option<I>,
    expansion: ExpansionState<G>,
    /// The last projection handed to the view; diffs are computed against
    /// this.
    snapshot: Snapshot<G, I>,
    signals: DataSourceSignals,
    affinity: ThreadAffinity,
    selection_cell_provider: SelectionCellProvider<I, C>,
    group_header_cell_provider: GroupHeaderCellProvider<G, C>,
    item_cell_provider: ItemCellProvider<G, I, C>,
}

impl<G, I, C> DiffableExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    /// Creates a new source that uses the given closures to generate
    /// cells.
    ///
    /// - `selection_cell_provider`: cells representing the currently
    ///   selected item in the combo box itself;
    /// - `group_header_cell_provider`: cells acting as group headers in
    ///   the popup;
    /// - `item_cell_provider`: cells representing selectable items in the
    ///   popup.
    pub fn new<SP, GP, IP>(
        selection_cell_provider: SP,
        group_header_cell_provider: GP,
        item_cell_provider: IP,
    ) -> Self
    where
        SP: Fn(Option<&I>) -> C + 'static,
        GP: Fn(RowLocation, &G, bool) -> C + 'static,
        IP: Fn(RowLocation, &I, Option<&G>) -> C + 'static,
    {
        Self {
            contents: NestedList::new(),
            selected_item: None,
            expansion: ExpansionState::new(),
            snapshot: Snapshot::empty(),
            signals: DataSourceSignals::new(),
            affinity: ThreadAffinity::current(),
            selection_cell_provider: Box::new(selection_cell_provider),
            group_header_cell_provider: Box::new(group_header_cell_provider),
            item_cell_provider: Box::new(item_cell_provider),
        }
    }

    /// Re-projects the popup and publishes the delta against the
    /// previously displayed snapshot.
    fn recalculate_contents(&mut self) {
        let next = Snapshot::project(&self.contents, &self.expansion);
        let patch = diff_snapshots(&self.snapshot, &next);
        self.snapshot = next;

        if patch.is_empty() {
            return;
        }

        tracing::debug!(
            target: "horizon_combo::source",
            ops = patch.op_count(),
            "publishing popup patch"
        );
        self.signals.emit_popup_update(PopupUpdate::Patch(patch));
    }
}

impl<G, I, C> ComboBoxDataSource for DiffableExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    type Cell = C;

    fn number_of_sections(&self) -> usize {
        self.snapshot.section_count()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.snapshot.row_count_in(section)
    }

    fn selection_cell(&self) -> C {
        (self.selection_cell_provider)(self.selected_item.as_ref())
    }

    fn cell_for_row(&self, location: RowLocation) -> Option<C> {
        match self.snapshot.row_at(location)? {
            PopupRow::GroupHeader { id, expanded } => {
                Some((self.group_header_cell_provider)(location, id, *expanded))
            }
            PopupRow::Item { item, group } => {
                Some((self.item_cell_provider)(location, item, group.as_ref()))
            }
        }
    }

    fn did_select_cell(&mut self, location: RowLocation) -> Activation {
        self.affinity.debug_assert_same_thread();

        let Some(row) = self.snapshot.row_at(location).cloned() else {
            tracing::debug!(
                target: "horizon_combo::source",
                %location,
                "discarding stale row activation"
            );
            return Activation::Ignored;
        };

        match row {
            PopupRow::GroupHeader { id, .. } => {
                self.toggle_group(&id);
                Activation::ToggledGroup
            }
            PopupRow::Item { item, .. } => {
                if self.selected_item.as_ref() == Some(&item) {
                    Activation::Dismissed
                } else {
                    self.selected_item = Some(item);
                    self.signals.selection_changed.emit(());
                    Activation::Selected
                }
            }
        }
    }

    fn signals(&self) -> &DataSourceSignals {
        &self.signals
    }
}

impl<G, I, C> ExpandableDataSource for DiffableExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    type GroupId = G;
    type Item = I;

    fn contents(&self) -> &NestedList<G, I> {
        &self.contents
    }

    fn set_contents(&mut self, contents: NestedList<G, I>) {
        self.affinity.debug_assert_same_thread();
        if contents == self.contents {
            return;
        }
        self.contents = contents;
        self.recalculate_contents();
    }

    fn selected_item(&self) -> Option<&I> {
        self.selected_item.as_ref()
    }

    fn set_selected_item(&mut self, item: Option<I>) {
        self.affinity.debug_assert_same_thread();
        self.selected_item = item;
    }

    fn is_group_expanded(&self, id: &G) -> bool {
        self.expansion.is_expanded(id)
    }

    fn set_group_expanded(&mut self, id: &G, expanded: bool) {
        self.affinity.debug_assert_same_thread();
        if !self.expansion.set_expanded(id, expanded) {
            return;
        }
        self.recalculate_contents();
    }

    fn snapshot(&self) -> &Snapshot<G, I> {
        &self.snapshot
    }
}

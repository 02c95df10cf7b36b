//! The manual-patch expandable data source.

use std::hash::Hash;

use horizon_combo_core::ThreadAffinity;

use super::{ExpandableDataSource, GroupHeaderCellProvider, ItemCellProvider};
use crate::diff::{PopupPatch, PopupUpdate};
use crate::model::{ExpansionState, NestedList, PopupRow, RowLocation, Snapshot};
use crate::source::{Activation, ComboBoxDataSource, DataSourceSignals, SelectionCellProvider};

/// An [`ExpandableDataSource`] for hosts whose view layer cannot apply
/// identity-keyed patches.
///
/// Only an expansion toggle gets a targeted patch: an explicit
/// insert-rows or delete-rows for the toggled section's children, plus a
/// reload of its header row. Every other content change degrades to
/// [`PopupUpdate::Reload`]: computing a general multi-section diff
/// manually is not attempted; correctness over minimality.
///
/// The visible behavior is identical to
/// [`DiffableExpandableDataSource`](super::DiffableExpandableDataSource):
/// same row order after every update, same activation semantics, same
/// notifications. The only difference is how much the view can animate.
pub struct CompatExpandableDataSource<G, I, C> {
    contents: NestedList<G, I>,
    selected_item: Option<I>,
    expansion: ExpansionState<G>,
    snapshot: Snapshot<G, I>,
    signals: DataSourceSignals,
    affinity: ThreadAffinity,
    selection_cell_provider: SelectionCellProvider<I, C>,
    group_header_cell_provider: GroupHeaderCellProvider<G, C>,
    item_cell_provider: ItemCellProvider<G, I, C>,
}

impl<G, I, C> CompatExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    /// Creates a new source that uses the given closures to generate
    /// cells. See
    /// [`DiffableExpandableDataSource::new`](super::DiffableExpandableDataSource::new)
    /// for the provider roles.
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

    fn reproject(&mut self) {
        self.snapshot = Snapshot::project(&self.contents, &self.expansion);
    }
}

impl<G, I, C> ComboBoxDataSource for CompatExpandableDataSource<G, I, C>
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

impl<G, I, C> ExpandableDataSource for CompatExpandableDataSource<G, I, C>
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
        self.reproject();
        tracing::debug!(
            target: "horizon_combo::source",
            "content replaced, requesting full reload"
        );
        self.signals.emit_popup_update(PopupUpdate::Reload);
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

        // The expansion set always tracks the request, but a group absent
        // from the current content has nothing to patch; it will surface
        // expanded whenever it reappears.
        let Some(section) = self.contents.index_of_group(id) else {
            return;
        };
        let child_count = self
            .contents
            .get(section)
            .and_then(|entry| entry.children())
            .map_or(0, |items| items.len());

        self.reproject();

        let child_rows = (1..=child_count)
            .map(|row| RowLocation::new(section, row))
            .collect();
        let mut patch = PopupPatch {
            reloaded_rows: vec![RowLocation::new(section, 0)],
            ..PopupPatch::default()
        };
        if expanded {
            patch.inserted_rows = child_rows;
        } else {
            patch.removed_rows = child_rows;
        }

        self.signals.emit_popup_update(PopupUpdate::Patch(patch));
    }

    fn snapshot(&self) -> &Snapshot<G, I> {
        &self.snapshot
    }
}

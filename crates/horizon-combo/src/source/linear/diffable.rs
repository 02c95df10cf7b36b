//! The snapshot-apply linear data source.

use std::hash::Hash;

use horizon_combo_core::ThreadAffinity;

use super::{LinearDataSource, PopupCellProvider, Single};
use crate::diff::{PopupUpdate, diff_snapshots};
use crate::model::{PopupRow, PopupSection, RowLocation, SectionKey, Snapshot};
use crate::source::{Activation, ComboBoxDataSource, DataSourceSignals, SelectionCellProvider};

/// A [`LinearDataSource`] that reduces every content change to a minimal
/// identity-keyed row patch within its single section.
///
/// Items should be unique within the list; duplicate items alias to the
/// same row identity and the resulting patch may coalesce them.
pub struct DiffableLinearDataSource<I, C> {
    contents: Vec<I>,
    selected_item: Option<I>,
    snapshot: Snapshot<Single, I>,
    signals: DataSourceSignals,
    affinity: ThreadAffinity,
    selection_cell_provider: SelectionCellProvider<I, C>,
    popup_cell_provider: PopupCellProvider<I, C>,
}

/// Projects a flat item list into the one-section snapshot shape the diff
/// engine works on.
fn project_items<I: Clone>(items: &[I]) -> Snapshot<Single, I> {
    Snapshot::from_sections(vec![PopupSection {
        key: SectionKey::Group(Single::Only),
        rows: items
            .iter()
            .map(|item| PopupRow::Item {
                item: item.clone(),
                group: None,
            })
            .collect(),
    }])
}

impl<I, C> DiffableLinearDataSource<I, C>
where
    I: Clone + Eq + Hash,
{
    /// Creates a new source that uses the given closures to generate
    /// cells for the selection surface and the popup rows.
    pub fn new<SP, PP>(selection_cell_provider: SP, popup_cell_provider: PP) -> Self
    where
        SP: Fn(Option<&I>) -> C + 'static,
        PP: Fn(RowLocation, &I) -> C + 'static,
    {
        Self {
            contents: Vec::new(),
            selected_item: None,
            snapshot: project_items::<I>(&[]),
            signals: DataSourceSignals::new(),
            affinity: ThreadAffinity::current(),
            selection_cell_provider: Box::new(selection_cell_provider),
            popup_cell_provider: Box::new(popup_cell_provider),
        }
    }
}

impl<I, C> ComboBoxDataSource for DiffableLinearDataSource<I, C>
where
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
        let item = self.item_at(location)?;
        Some((self.popup_cell_provider)(location, item))
    }

    fn did_select_cell(&mut self, location: RowLocation) -> Activation {
        self.affinity.debug_assert_same_thread();

        let Some(item) = self.item_at(location).cloned() else {
            tracing::debug!(
                target: "horizon_combo::source",
                %location,
                "discarding stale row activation"
            );
            return Activation::Ignored;
        };

        if self.selected_item.as_ref() == Some(&item) {
            Activation::Dismissed
        } else {
            self.selected_item = Some(item);
            self.signals.selection_changed.emit(());
            Activation::Selected
        }
    }

    fn signals(&self) -> &DataSourceSignals {
        &self.signals
    }
}

impl<I, C> LinearDataSource for DiffableLinearDataSource<I, C>
where
    I: Clone + Eq + Hash,
{
    type Item = I;

    fn contents(&self) -> &[I] {
        &self.contents
    }

    fn set_contents(&mut self, contents: Vec<I>) {
        self.affinity.debug_assert_same_thread();
        if contents == self.contents {
            return;
        }
        self.contents = contents;

        let next = project_items(&self.contents);
        let patch = diff_snapshots(&self.snapshot, &next);
        self.snapshot = next;

        if patch.is_empty() {
            return;
        }
        self.signals.emit_popup_update(PopupUpdate::Patch(patch));
    }

    fn selected_item(&self) -> Option<&I> {
        self.selected_item.as_ref()
    }

    fn set_selected_item(&mut self, item: Option<I>) {
        self.affinity.debug_assert_same_thread();
        self.selected_item = item;
    }
}

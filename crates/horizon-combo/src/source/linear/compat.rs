//! The manual-reload linear data source.

use std::hash::Hash;

use horizon_combo_core::ThreadAffinity;

use super::{LinearDataSource, PopupCellProvider};
use crate::diff::PopupUpdate;
use crate::model::RowLocation;
use crate::source::{Activation, ComboBoxDataSource, DataSourceSignals, SelectionCellProvider};

/// A basic [`LinearDataSource`] that reloads the whole popup on every
/// content change.
///
/// Available wherever [`DiffableLinearDataSource`](super::DiffableLinearDataSource)
/// is not an option; the drawback is that content changes while the popup
/// is on screen cannot be animated row by row.
pub struct CompatLinearDataSource<I, C> {
    contents: Vec<I>,
    selected_item: Option<I>,
    signals: DataSourceSignals,
    affinity: ThreadAffinity,
    selection_cell_provider: SelectionCellProvider<I, C>,
    popup_cell_provider: PopupCellProvider<I, C>,
}

impl<I, C> CompatLinearDataSource<I, C>
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
            signals: DataSourceSignals::new(),
            affinity: ThreadAffinity::current(),
            selection_cell_provider: Box::new(selection_cell_provider),
            popup_cell_provider: Box::new(popup_cell_provider),
        }
    }
}

impl<I, C> ComboBoxDataSource for CompatLinearDataSource<I, C>
where
    I: Clone + Eq + Hash,
{
    type Cell = C;

    fn number_of_sections(&self) -> usize {
        1
    }

    fn number_of_rows(&self, section: usize) -> usize {
        if section == 0 { self.contents.len() } else { 0 }
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

impl<I, C> LinearDataSource for CompatLinearDataSource<I, C>
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
        self.signals.emit_popup_update(PopupUpdate::Reload);
    }

    fn selected_item(&self) -> Option<&I> {
        self.selected_item.as_ref()
    }

    fn set_selected_item(&mut self, item: Option<I>) {
        self.affinity.debug_assert_same_thread();
        self.selected_item = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn string_source() -> CompatLinearDataSource<String, String> {
        CompatLinearDataSource::new(
            |item: Option<&String>| item.cloned().unwrap_or_else(|| "Select...".into()),
            |_loc, item: &String| item.clone(),
        )
    }

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_content_replacement_reloads() {
        let mut source = string_source();
        let updates = Arc::new(Mutex::new(Vec::new()));
        let updates_clone = updates.clone();
        source.signals().popup_changed.connect(move |update| {
            updates_clone.lock().push(update.clone());
        });

        source.set_contents(items(&["Alpha", "Beta"]));
        source.set_contents(items(&["Alpha", "Beta"]));
        source.set_contents(items(&["Alpha"]));

        assert_eq!(
            *updates.lock(),
            vec![PopupUpdate::Reload, PopupUpdate::Reload]
        );
        assert_eq!(source.number_of_rows(0), 1);
    }

    #[test]
    fn test_selection_semantics_match_diffable() {
        let mut source = string_source();
        source.set_contents(items(&["Alpha", "Beta"]));

        let notifications = Arc::new(Mutex::new(0));
        let notifications_clone = notifications.clone();
        source.signals().selection_changed.connect(move |_| {
            *notifications_clone.lock() += 1;
        });

        assert_eq!(
            source.did_select_cell(RowLocation::new(0, 0)),
            Activation::Selected
        );
        // Re-selecting the current item dismisses without a notification.
        assert_eq!(
            source.did_select_cell(RowLocation::new(0, 0)),
            Activation::Dismissed
        );
        assert_eq!(*notifications.lock(), 1);

        assert_eq!(
            source.did_select_cell(RowLocation::new(0, 5)),
            Activation::Ignored
        );
    }

    #[test]
    fn test_cell_routing() {
        let mut source = string_source();
        source.set_contents(items(&["Alpha"]));

        assert_eq!(source.selection_cell(), "Select...");
        assert_eq!(
            source.cell_for_row(RowLocation::new(0, 0)).as_deref(),
            Some("Alpha")
        );
        assert!(source.cell_for_row(RowLocation::new(1, 0)).is_none());
    }
}

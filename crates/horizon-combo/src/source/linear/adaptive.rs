//! Strategy-resolving linear data source.

use std::hash::Hash;

use super::{CompatLinearDataSource, DiffableLinearDataSource, LinearDataSource};
use crate::model::RowLocation;
use crate::source::expandable::DiffStrategy;
use crate::source::{Activation, ComboBoxDataSource, DataSourceSignals};

/// A [`LinearDataSource`] that delegates to the best concrete
/// implementation for the hosting environment, chosen once at
/// construction from a [`DiffStrategy`] flag.
pub struct AdaptiveLinearDataSource<I, C> {
    inner: Inner<I, C>,
}

enum Inner<I, C> {
    Snapshot(DiffableLinearDataSource<I, C>),
    Manual(CompatLinearDataSource<I, C>),
}

impl<I, C> AdaptiveLinearDataSource<I, C>
where
    I: Clone + Eq + Hash,
{
    /// Creates a new source backed by the strategy the given capability
    /// flag selects.
    pub fn new<SP, PP>(
        strategy: DiffStrategy,
        selection_cell_provider: SP,
        popup_cell_provider: PP,
    ) -> Self
    where
        SP: Fn(Option<&I>) -> C + 'static,
        PP: Fn(RowLocation, &I) -> C + 'static,
    {
        tracing::debug!(
            target: "horizon_combo::source",
            ?strategy,
            "constructing adaptive linear data source"
        );
        let inner = match strategy {
            DiffStrategy::Snapshot => Inner::Snapshot(DiffableLinearDataSource::new(
                selection_cell_provider,
                popup_cell_provider,
            )),
            DiffStrategy::Manual => Inner::Manual(CompatLinearDataSource::new(
                selection_cell_provider,
                popup_cell_provider,
            )),
        };
        Self { inner }
    }

    /// The strategy this source was constructed with.
    pub fn strategy(&self) -> DiffStrategy {
        match &self.inner {
            Inner::Snapshot(_) => DiffStrategy::Snapshot,
            Inner::Manual(_) => DiffStrategy::Manual,
        }
    }
}

impl<I, C> ComboBoxDataSource for AdaptiveLinearDataSource<I, C>
where
    I: Clone + Eq + Hash,
{
    type Cell = C;

    fn number_of_sections(&self) -> usize {
        match &self.inner {
            Inner::Snapshot(source) => source.number_of_sections(),
            Inner::Manual(source) => source.number_of_sections(),
        }
    }

    fn number_of_rows(&self, section: usize) -> usize {
        match &self.inner {
            Inner::Snapshot(source) => source.number_of_rows(section),
            Inner::Manual(source) => source.number_of_rows(section),
        }
    }

    fn selection_cell(&self) -> C {
        match &self.inner {
            Inner::Snapshot(source) => source.selection_cell(),
            Inner::Manual(source) => source.selection_cell(),
        }
    }

    fn cell_for_row(&self, location: RowLocation) -> Option<C> {
        match &self.inner {
            Inner::Snapshot(source) => source.cell_for_row(location),
            Inner::Manual(source) => source.cell_for_row(location),
        }
    }

    fn did_select_cell(&mut self, location: RowLocation) -> Activation {
        match &mut self.inner {
            Inner::Snapshot(source) => source.did_select_cell(location),
            Inner::Manual(source) => source.did_select_cell(location),
        }
    }

    fn signals(&self) -> &DataSourceSignals {
        match &self.inner {
            Inner::Snapshot(source) => source.signals(),
            Inner::Manual(source) => source.signals(),
        }
    }
}

impl<I, C> LinearDataSource for AdaptiveLinearDataSource<I, C>
where
    I: Clone + Eq + Hash,
{
    type Item = I;

    fn contents(&self) -> &[I] {
        match &self.inner {
            Inner::Snapshot(source) => source.contents(),
            Inner::Manual(source) => source.contents(),
        }
    }

    fn set_contents(&mut self, contents: Vec<I>) {
        match &mut self.inner {
            Inner::Snapshot(source) => source.set_contents(contents),
            Inner::Manual(source) => source.set_contents(contents),
        }
    }

    fn selected_item(&self) -> Option<&I> {
        match &self.inner {
            Inner::Snapshot(source) => source.selected_item(),
            Inner::Manual(source) => source.selected_item(),
        }
    }

    fn set_selected_item(&mut self, item: Option<I>) {
        match &mut self.inner {
            Inner::Snapshot(source) => source.set_selected_item(item),
            Inner::Manual(source) => source.set_selected_item(item),
        }
    }
}

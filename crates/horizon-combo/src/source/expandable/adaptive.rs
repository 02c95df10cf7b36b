//! Strategy-resolving expandable data source.

use std::hash::Hash;

use super::{
    CompatExpandableDataSource, DiffableExpandableDataSource, DiffStrategy, ExpandableDataSource,
};
use crate::model::{NestedList, RowLocation, Snapshot};
use crate::source::{Activation, ComboBoxDataSource, DataSourceSignals};

/// An [`ExpandableDataSource`] that delegates to the best concrete
/// implementation for the hosting environment.
///
/// The strategy is chosen exactly once, at construction, from the
/// [`DiffStrategy`] flag the caller supplies, typically derived from a
/// minimum platform version or a view-layer capability. Callers never
/// branch on which variant is active; every operation delegates
/// transparently, and the two variants are behaviorally equivalent.
pub struct AdaptiveExpandableDataSource<G, I, C> {
    inner: Inner<G, I, C>,
}

enum Inner<G, I, C> {
    Snapshot(DiffableExpandableDataSource<G, I, C>),
    Manual(CompatExpandableDataSource<G, I, C>),
}

impl<G, I, C> AdaptiveExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    /// Creates a new source backed by the strategy the given capability
    /// flag selects. See
    /// [`DiffableExpandableDataSource::new`] for the provider roles.
    pub fn new<SP, GP, IP>(
        strategy: DiffStrategy,
        selection_cell_provider: SP,
        group_header_cell_provider: GP,
        item_cell_provider: IP,
    ) -> Self
    where
        SP: Fn(Option<&I>) -> C + 'static,
        GP: Fn(RowLocation, &G, bool) -> C + 'static,
        IP: Fn(RowLocation, &I, Option<&G>) -> C + 'static,
    {
        tracing::debug!(
            target: "horizon_combo::source",
            ?strategy,
            "constructing adaptive expandable data source"
        );
        let inner = match strategy {
            DiffStrategy::Snapshot => Inner::Snapshot(DiffableExpandableDataSource::new(
                selection_cell_provider,
                group_header_cell_provider,
                item_cell_provider,
            )),
            DiffStrategy::Manual => Inner::Manual(CompatExpandableDataSource::new(
                selection_cell_provider,
                group_header_cell_provider,
                item_cell_provider,
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

impl<G, I, C> ComboBoxDataSource for AdaptiveExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
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

impl<G, I, C> ExpandableDataSource for AdaptiveExpandableDataSource<G, I, C>
where
    G: Clone + Eq + Hash,
    I: Clone + Eq + Hash,
{
    type GroupId = G;
    type Item = I;

    fn contents(&self) -> &NestedList<G, I> {
        match &self.inner {
            Inner::Snapshot(source) => source.contents(),
            Inner::Manual(source) => source.contents(),
        }
    }

    fn set_contents(&mut self, contents: NestedList<G, I>) {
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

    fn is_group_expanded(&self, id: &G) -> bool {
        match &self.inner {
            Inner::Snapshot(source) => source.is_group_expanded(id),
            Inner::Manual(source) => source.is_group_expanded(id),
        }
    }

    fn set_group_expanded(&mut self, id: &G, expanded: bool) {
        match &mut self.inner {
            Inner::Snapshot(source) => source.set_group_expanded(id, expanded),
            Inner::Manual(source) => source.set_group_expanded(id, expanded),
        }
    }

    fn snapshot(&self) -> &Snapshot<G, I> {
        match &self.inner {
            Inner::Snapshot(source) => source.snapshot(),
            Inner::Manual(source) => source.snapshot(),
        }
    }
}

//! Data-source abstractions shared by the expandable and linear families.
//!
//! A data source owns the popup's content, its derived snapshot, and the
//! current selection. It talks to its collaborators in two directions:
//!
//! - **push**: [`DataSourceSignals`] notify the popup view of content
//!   patches, the popup container of size changes, and the selection
//!   surface of committed selections;
//! - **pull**: the view layer queries [`cell_for_row`] /
//!   [`selection_cell`] to obtain renderable cells, which the source
//!   builds via the provider closures supplied at construction.
//!
//! Row activation flows back in through [`did_select_cell`], whose
//! [`Activation`] outcome tells the popup controller whether to stay open
//! (a group toggled) or dismiss (an item tapped).
//!
//! [`cell_for_row`]: ComboBoxDataSource::cell_for_row
//! [`selection_cell`]: ComboBoxDataSource::selection_cell
//! [`did_select_cell`]: ComboBoxDataSource::did_select_cell

use horizon_combo_core::Signal;

use crate::diff::PopupUpdate;
use crate::model::RowLocation;

pub mod expandable;
pub mod linear;

/// A closure that produces the cell shown in the combo box itself to
/// represent the currently selected item (`None` renders the
/// placeholder).
pub type SelectionCellProvider<I, C> = Box<dyn Fn(Option<&I>) -> C>;

/// The outcome of routing a row activation through a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The location did not resolve to a row (a stale event that raced a
    /// content change); the event was discarded.
    Ignored,
    /// A group header was activated and its expansion toggled; the popup
    /// stays open.
    ToggledGroup,
    /// A new item was committed as the selection; the popup should
    /// dismiss, and `selection_changed` has been emitted.
    Selected,
    /// The already-selected item was activated again; the popup should
    /// dismiss without any selection notification.
    Dismissed,
}

/// Signals a data source emits toward its collaborators.
///
/// The popup view connects to `popup_changed` and applies the carried
/// update (re-querying cells for inserted or reloaded rows); the popup
/// container connects to `size_changed` to re-measure after the patch is
/// applied; the selection surface connects to `selection_changed` and
/// re-pulls the selection cell.
pub struct DataSourceSignals {
    /// Emitted when the popup's row set changed; carries how the view
    /// should update.
    pub popup_changed: Signal<PopupUpdate>,
    /// Emitted after any update that changed the popup's row count, so
    /// the size-dependent container can re-measure.
    pub size_changed: Signal<()>,
    /// Emitted when the user commits a selection that differs from the
    /// current one. Never emitted for programmatic selection assignment
    /// or for re-activating the already-selected item.
    pub selection_changed: Signal<()>,
}

impl Default for DataSourceSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSourceSignals {
    /// Creates a new set of data source signals.
    pub fn new() -> Self {
        Self {
            popup_changed: Signal::new(),
            size_changed: Signal::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Emits `popup_changed` with the given update, followed by
    /// `size_changed`.
    ///
    /// Every structural update changes the popup's height, so the two
    /// notifications always travel together.
    pub fn emit_popup_update(&self, update: PopupUpdate) {
        self.popup_changed.emit(update);
        self.size_changed.emit(());
    }
}

/// The uniform interface every combo box data source exposes, regardless
/// of content shape (linear or expandable) and patch strategy (snapshot
/// diffing or manual).
///
/// Callers never branch on which concrete implementation is active; the
/// adaptive wrappers delegate every method transparently.
pub trait ComboBoxDataSource {
    /// The renderable cell type produced by this source's providers.
    type Cell;

    /// Number of sections currently projected into the popup.
    fn number_of_sections(&self) -> usize;

    /// Number of rows in the given section, or 0 if out of range.
    fn number_of_rows(&self, section: usize) -> usize;

    /// The cell representing the current selection, for display in the
    /// combo box itself.
    fn selection_cell(&self) -> Self::Cell;

    /// The cell for the row at `location`, or `None` if the location is
    /// out of range.
    fn cell_for_row(&self, location: RowLocation) -> Option<Self::Cell>;

    /// Routes a row activation: toggles expansion for headers, commits or
    /// re-confirms the selection for items. Out-of-range locations are
    /// silently discarded.
    fn did_select_cell(&mut self, location: RowLocation) -> Activation;

    /// The signals this source notifies collaborators through.
    fn signals(&self) -> &DataSourceSignals;
}

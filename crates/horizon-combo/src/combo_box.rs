//! The popup controller: visibility state and activation routing.
//!
//! [`ComboBox`] is the view-agnostic control logic that sits between the
//! host's widgets and a data source. The host's view layer renders the
//! selection surface and the popup; this controller decides *when* the
//! popup is up, announces its lifecycle, and turns row activations into
//! the right mix of expansion toggles, selection commits, and dismissals.
//!
//! # Signals
//!
//! - `popup_will_show` / `popup_did_show`: emitted around the popup
//!   becoming visible
//! - `popup_will_dismiss` / `popup_did_dismiss`: emitted around the popup
//!   being hidden
//!
//! All four are best-effort hooks for the view collaborator: they are
//! emitted synchronously, nothing is consumed back, and any presentation
//! animation the collaborator runs is its own fire-and-forget concern;
//! the controller's state is already updated when the hooks fire.

use horizon_combo_core::{Signal, ThreadAffinity};

use crate::model::RowLocation;
use crate::source::{Activation, ComboBoxDataSource};

/// A combo box control: a data source plus popup visibility.
///
/// # Example
///
/// ```
/// use horizon_combo::combo_box::ComboBox;
/// use horizon_combo::model::{NestedList, RowLocation};
/// use horizon_combo::source::expandable::{
///     DiffableExpandableDataSource, ExpandableDataSource,
/// };
///
/// let mut source = DiffableExpandableDataSource::new(
///     |item: Option<&String>| item.cloned().unwrap_or_else(|| "Select...".into()),
///     |_loc, group: &String, _expanded| group.clone(),
///     |_loc, item: &String, _group| item.clone(),
/// );
/// let mut list = NestedList::new();
/// list.push_group("Beta".to_string(), vec!["Lambda".to_string()]);
/// source.set_contents(list);
///
/// let mut combo = ComboBox::new(source);
/// combo.show_popup();
///
/// // Tapping the header keeps the popup open...
/// combo.activate_row(RowLocation::new(0, 0));
/// assert!(combo.is_popup_visible());
///
/// // ...tapping an item commits and dismisses.
/// combo.activate_row(RowLocation::new(0, 1));
/// assert!(!combo.is_popup_visible());
/// ```
pub struct ComboBox<D: ComboBoxDataSource> {
    data_source: D,
    popup_visible: bool,
    affinity: ThreadAffinity,

    /// Emitted just before the popup becomes visible.
    pub popup_will_show: Signal<()>,
    /// Emitted after the popup became visible.
    pub popup_did_show: Signal<()>,
    /// Emitted just before the popup is hidden.
    pub popup_will_dismiss: Signal<()>,
    /// Emitted after the popup was hidden.
    pub popup_did_dismiss: Signal<()>,
}

impl<D: ComboBoxDataSource> ComboBox<D> {
    /// Creates a controller around the given data source.
    pub fn new(data_source: D) -> Self {
        Self {
            data_source,
            popup_visible: false,
            affinity: ThreadAffinity::current(),
            popup_will_show: Signal::new(),
            popup_did_show: Signal::new(),
            popup_will_dismiss: Signal::new(),
            popup_did_dismiss: Signal::new(),
        }
    }

    /// The underlying data source.
    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    /// Mutable access to the underlying data source, for content and
    /// expansion updates.
    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    /// Whether the popup is currently visible.
    pub fn is_popup_visible(&self) -> bool {
        self.popup_visible
    }

    /// Makes the popup visible, announcing the transition.
    ///
    /// Showing an already-visible popup is a no-op.
    pub fn show_popup(&mut self) {
        self.affinity.debug_assert_same_thread();
        if self.popup_visible {
            return;
        }
        self.popup_will_show.emit(());
        self.popup_visible = true;
        tracing::debug!(target: "horizon_combo::combo_box", "popup shown");
        self.popup_did_show.emit(());
    }

    /// Hides the popup, announcing the transition.
    ///
    /// Dismissing an already-hidden popup is a no-op.
    pub fn dismiss_popup(&mut self) {
        self.affinity.debug_assert_same_thread();
        if !self.popup_visible {
            return;
        }
        self.popup_will_dismiss.emit(());
        self.popup_visible = false;
        tracing::debug!(target: "horizon_combo::combo_box", "popup dismissed");
        self.popup_did_dismiss.emit(());
    }

    /// Toggles the popup's visibility (the tap-on-the-control gesture).
    pub fn toggle_popup(&mut self) {
        if self.popup_visible {
            self.dismiss_popup();
        } else {
            self.show_popup();
        }
    }

    /// Routes a row activation from the popup view.
    ///
    /// Group toggles keep the popup open; item activations dismiss it,
    /// whether or not they changed the selection. Stale locations are
    /// discarded. Returns the data source's routing outcome.
    pub fn activate_row(&mut self, location: RowLocation) -> Activation {
        let outcome = self.data_source.did_select_cell(location);
        match outcome {
            Activation::Selected | Activation::Dismissed => self.dismiss_popup(),
            Activation::ToggledGroup | Activation::Ignored => {}
        }
        outcome
    }

    /// The cell representing the current selection, freshly produced by
    /// the data source.
    pub fn selection_cell(&self) -> D::Cell {
        self.data_source.selection_cell()
    }
}

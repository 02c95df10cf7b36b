//! Convenient re-exports of the types most applications need.
//!
//! ```
//! use horizon_combo::prelude::*;
//! ```

pub use crate::combo_box::ComboBox;
pub use crate::diff::{PopupPatch, PopupUpdate, diff_snapshots};
pub use crate::model::{
    ExpansionState, NestedList, NestedListEntry, NestedListError, PopupRow, PopupSection,
    RowLocation, SectionKey, Snapshot,
};
pub use crate::source::expandable::{
    AdaptiveExpandableDataSource, CompatExpandableDataSource, DiffStrategy,
    DiffableExpandableDataSource, ExpandableDataSource, GroupHeaderCellProvider, ItemCellProvider,
};
pub use crate::source::linear::{
    AdaptiveLinearDataSource, CompatLinearDataSource, DiffableLinearDataSource, LinearDataSource,
    PopupCellProvider, Single,
};
pub use crate::source::{
    Activation, ComboBoxDataSource, DataSourceSignals, SelectionCellProvider,
};
pub use horizon_combo_core::{Signal, ThreadAffinity};

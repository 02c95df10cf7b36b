//! Content model for the combo box core.
//!
//! This module provides the value types the data sources operate on:
//!
//! - [`NestedList`] / [`NestedListEntry`]: the caller-supplied content,
//!   an ordered mix of top-level items and groups-with-children
//! - [`ExpansionState`]: the set of currently-open group identifiers
//! - [`PopupRow`] / [`SectionKey`] / [`RowLocation`]: row and section
//!   identity within the popup
//! - [`Snapshot`] / [`PopupSection`]: the flat, ordered projection of a
//!   `NestedList` under an `ExpansionState`
//!
//! The model is strictly read-derived: the core never mutates a
//! `NestedList`; content changes are always a wholesale replacement by the
//! caller, followed by a re-projection and a diff against the previously
//! displayed snapshot.

mod expansion;
mod nested_list;
mod row;
mod snapshot;

pub use expansion::ExpansionState;
pub use nested_list::{NestedList, NestedListEntry, NestedListError};
pub use row::{PopupRow, RowLocation, SectionKey};
pub use snapshot::{PopupSection, Snapshot};

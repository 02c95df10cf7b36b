//! Horizon Combo - a combo box data-source core.
//!
//! A combo box shows the current selection compactly and reveals a popup
//! list of selectable items on activation, optionally organised into
//! collapsible groups. This crate implements the part of that control
//! that is easy to get wrong and pointless to rewrite per platform: the
//! content model, the flat popup projection, minimal row diffing,
//! expansion and selection state, and the routing of activation events.
//! Rendering, layout, and animation stay with the hosting view layer,
//! reached through signals and pull-based cell providers.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐ set_contents ┌─────────────────┐ popup_changed ┌──────────┐
//! │    Host    │─────────────>│   Data source   │──────────────>│  Popup   │
//! │ (contents) │              │ project + diff  │  size_changed │   view   │
//! └────────────┘              └─────────────────┘               └──────────┘
//!                                ^          │ selection_changed      │
//!                  did_select_cell          v                        │
//!                                │   ┌─────────────┐                 │
//!                                └───│  Selection  │   cell_for_row  │
//!                                    │   surface   │<────────────────┘
//!                                    └─────────────┘
//! ```
//!
//! Every content replacement or expansion toggle re-projects the nested
//! list into a [`model::Snapshot`] and reduces the change to a
//! [`diff::PopupUpdate`]: either a minimal identity-keyed patch or a
//! full reload, depending on the data-source strategy in use (see
//! [`source::expandable::DiffStrategy`]).
//!
//! # Example
//!
//! ```
//! use horizon_combo::prelude::*;
//!
//! let mut source = DiffableExpandableDataSource::new(
//!     |item: Option<&String>| item.cloned().unwrap_or_else(|| "Select...".into()),
//!     |_loc, group: &String, expanded| {
//!         format!("{group} {}", if expanded { "▾" } else { "▸" })
//!     },
//!     |_loc, item: &String, _group| item.clone(),
//! );
//!
//! source.signals().popup_changed.connect(|update| {
//!     // Apply the patch (or reload) to the popup view.
//!     let _ = update;
//! });
//!
//! let mut contents = NestedList::new();
//! contents.push_item("Alpha".to_string());
//! contents.push_group("Beta".to_string(), vec!["Lambda".into(), "Kappa".into()]);
//! source.set_contents(contents);
//!
//! source.toggle_group(&"Beta".to_string());
//! assert_eq!(source.snapshot().total_row_count(), 4);
//! ```

pub use horizon_combo_core::*;

pub mod combo_box;
pub mod diff;
pub mod model;
pub mod prelude;
pub mod source;

//! Core systems for Horizon Combo.
//!
//! This crate provides the plumbing that the combo box data-source core is
//! built on top of:
//!
//! - [`Signal`] - a type-safe signal/slot mechanism used for all
//!   core-to-collaborator notifications
//! - [`ThreadAffinity`] - debug verification that UI-thread-bound state is
//!   only touched from the thread that created it
//! - [`logging`] - `tracing` target constants and convenience macros
//!
//! Everything here is deliberately small: the combo box core is a
//! single-threaded, synchronous component, so there is no event loop, no
//! object registry, and no queued signal dispatch. Slots run directly on
//! the emitting thread.
//!
//! # Example
//!
//! ```
//! use horizon_combo_core::Signal;
//!
//! let changed = Signal::<String>::new();
//! changed.connect(|text| println!("changed to {text}"));
//! changed.emit("Beta".to_string());
//! ```

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;

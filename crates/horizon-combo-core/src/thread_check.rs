//! Thread affinity verification for Horizon Combo.
//!
//! The combo box data-source core is single-threaded and reentrant-unsafe
//! by design: content replacement, expansion toggles, and row activation
//! are all expected to happen on the UI's event-dispatch thread. This
//! module makes that contract checkable.
//!
//! Each data source records a [`ThreadAffinity`] at construction and calls
//! [`ThreadAffinity::debug_assert_same_thread`] in its mutating
//! operations. The check is a no-op in release builds.
//!
//! ```
//! use horizon_combo_core::ThreadAffinity;
//!
//! struct PopupState {
//!     affinity: ThreadAffinity,
//!     visible: bool,
//! }
//!
//! impl PopupState {
//!     fn set_visible(&mut self, visible: bool) {
//!         self.affinity.debug_assert_same_thread();
//!         self.visible = visible;
//!     }
//! }
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker for UI-thread-bound state.
///
/// Records the thread on which a value was created and provides methods to
/// verify that subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("object accessed from wrong thread");
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    ///
    /// This is a no-op in release builds, making it suitable for liberal
    /// use in data-source operations without affecting production
    /// performance.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        panic!(
            "THREAD AFFINITY VIOLATION: {msg}\n\
             Object was created on thread {:?}; current thread is \"{}\" ({:?}).\n\
             Combo box data sources are UI-thread-bound and must only be \
             accessed from the thread on which they were created.",
            self.thread_id,
            current.name().unwrap_or("<unnamed>"),
            current.id(),
        )
    }
}

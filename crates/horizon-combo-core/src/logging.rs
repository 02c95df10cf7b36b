//! Logging facilities for Horizon Combo.
//!
//! Horizon Combo uses the `tracing` crate for instrumentation. To see
//! logs, install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Log lines are tagged with the targets in [`targets`], so individual
//! subsystems can be filtered with `tracing` directives, e.g.
//! `RUST_LOG=horizon_combo::diff=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_combo_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_combo_core::signal";
    /// Projection engine target.
    pub const PROJECTION: &str = "horizon_combo::projection";
    /// Diff/patch engine target.
    pub const DIFF: &str = "horizon_combo::diff";
    /// Data source target.
    pub const SOURCE: &str = "horizon_combo::source";
    /// Popup controller target.
    pub const COMBO_BOX: &str = "horizon_combo::combo_box";
}

/// Macros for common tracing patterns.
///
/// These are just wrappers around the `tracing` crate macros with
/// consistent target naming.
#[macro_export]
macro_rules! combo_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_combo", $($arg)*)
    };
}

#[macro_export]
macro_rules! combo_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_combo", $($arg)*)
    };
}

#[macro_export]
macro_rules! combo_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_combo", $($arg)*)
    };
}

#[macro_export]
macro_rules! combo_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "horizon_combo", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        // Smoke test: the macros must expand without a subscriber installed.
        combo_trace!("trace message");
        combo_debug!(value = 1, "debug message");
        combo_warn!("warn message");
        combo_error!("error message");
    }
}

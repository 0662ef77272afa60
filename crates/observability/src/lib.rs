//! Tracing and logging setup shared by the hub binaries and tests.

/// Initialize process-wide tracing with the default filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, JSON formatting).
pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init_with_filter};

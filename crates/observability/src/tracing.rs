//! Tracing/logging initialization.
//!
//! JSON lines on stdout, filtered by `RUST_LOG` when set.

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is absent. Keeps the SQL driver's per-query logs out.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Like [`init`], with a caller-chosen fallback filter.
pub fn init_with_filter(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        ::tracing::debug!(default_filter, "tracing initialised");
    }
}

//! Tracing/logging setup shared by processes embedding the event stream.

/// Initialize process-wide tracing, filtered by `RUST_LOG` (default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize process-wide tracing with an explicit filter directive.
pub fn init_with_filter(directive: &str) {
    tracing::init_with_filter(directive);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

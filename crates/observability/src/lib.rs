//! Tracing/logging setup shared by the lost-and-found binaries.

/// Initialize process-wide logging with human-readable output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::Format::Pretty);
}

/// Initialize process-wide logging with JSON lines.
pub fn init_json() {
    tracing::init(tracing::Format::Json);
}

/// Tracing configuration (filters, formats).
pub mod tracing;

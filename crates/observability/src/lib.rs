//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide logging (human-readable, stderr).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::Pretty);
}

/// Initialize process-wide logging with JSON lines on stderr.
pub fn init_json() {
    tracing::init(tracing::LogFormat::Json);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

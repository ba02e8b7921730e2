//! Tracing/logging setup shared by the periodcost binaries.

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogConfig::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat};

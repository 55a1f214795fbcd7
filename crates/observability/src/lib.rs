//! Tracing/logging setup shared by every binary that embeds the Insight crates.

/// Tracing configuration (filters, formatting).
pub mod tracing;

pub use crate::tracing::ObservabilityConfig;

/// Initialize process-wide tracing with the default configuration.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(&ObservabilityConfig::default());
}

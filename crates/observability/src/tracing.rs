//! Tracing/logging initialization.
//!
//! Every line carries the fields of the enclosing `request` span, which is
//! how request id, user, path and context reach the log output without being
//! passed around.

use tracing_subscriber::EnvFilter;

use crate::ObservabilityConfig;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    // Configurable via RUST_LOG.
    let _ = if config.json_logs {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
    } else {
        builder.try_init()
    };
}

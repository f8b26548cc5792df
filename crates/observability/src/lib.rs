//! Tracing, logging and request-scoped context (shared setup).

use serde::{Deserialize, Serialize};

/// Request-scoped context store.
pub mod context;

/// Password redaction for log messages.
pub mod redact;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use context::RequestContext;
pub use redact::hide_passwords;

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit JSON-formatted log lines.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: true,
        }
    }
}

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &ObservabilityConfig) {
    tracing::init(config);
}

//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring (permission records, grants)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `errors.rs`: consistent error responses
//! - `format.rs`: JSON / XML envelope rendering

use std::sync::Arc;

use axum::{Extension, Router};

use crate::config::Config;
use crate::middleware;

pub mod errors;
pub mod format;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The request lifecycle middleware is the outermost layer, so it wraps
/// every route, the fallback, and the service wiring.
pub fn build_app(config: &Config, services: Arc<services::AppServices>) -> Router {
    let lifecycle = middleware::LifecycleState::from_config(config);

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            lifecycle,
            middleware::request_lifecycle,
        ))
}

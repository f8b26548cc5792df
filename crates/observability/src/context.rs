//! Per-request context, readable from anywhere inside the request's future.
//!
//! Storage is task-local: each request future carries its own value, so
//! requests handled concurrently (on the same or different worker threads)
//! never observe each other's context, and nothing outlives the request.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Request id used when a trusted request-id header is configured but absent.
pub const NO_REQUEST_ID: &str = "NoRequestId";

/// Business context used when the client sends none.
pub const NO_REQUEST_CONTEXT: &str = "NoContext";

tokio::task_local! {
    static CURRENT: RequestContext;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    request_id: String,
    user: String,
    path: String,
    business_context: String,
    started_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(
        request_id: impl Into<String>,
        user: impl Into<String>,
        path: impl Into<String>,
        business_context: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            user: user.into(),
            path: path.into(),
            business_context: business_context.into(),
            started_at: Utc::now(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn business_context(&self) -> &str {
        &self.business_context
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

/// Run `fut` with `ctx` as the current request context.
///
/// The value is dropped when `fut` completes.
pub async fn scope<F>(ctx: RequestContext, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(ctx, fut).await
}

/// Clone of the current request context, or `None` outside a request.
pub fn current() -> Option<RequestContext> {
    CURRENT.try_with(Clone::clone).ok()
}

/// Borrow the current request context without cloning it.
pub fn with_current<R>(f: impl FnOnce(&RequestContext) -> R) -> Option<R> {
    CURRENT.try_with(f).ok()
}

//! Request lifecycle middleware.
//!
//! Wraps every request in three hooks:
//!
//! - `on_request_start`: resolve identity, install the request context, log
//!   the (redacted) request body at DEBUG
//! - `on_exception`: log unexpected failures (including handler panics) at
//!   ERROR, without details
//! - `on_request_end`: log the outcome by status class, then elapsed time
//!
//! All log lines emitted while the request runs, including those of the
//! handler, carry the `request` span fields (request id, user, path, context).

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use tracing::{Instrument, Level};

use netapi_auth::{AuthenticatedUser, MalformedCredentialsError, NO_REQUEST_USER};
use netapi_observability::{context, hide_passwords, RequestContext};

use crate::app::errors::{json_error, ApiError, UnexpectedFailure};
use crate::config::Config;
use crate::context::RequestId;
use crate::identity::{
    resolve_request_context, resolve_request_id, resolve_username, IdentityConfig,
};

const BODY_OMITTED: &str = "[body omitted]";

#[derive(Clone)]
pub struct LifecycleState {
    pub identity: Arc<IdentityConfig>,
    pub max_logged_body_bytes: usize,
}

impl LifecycleState {
    pub fn new(identity: IdentityConfig, max_logged_body_bytes: usize) -> Self {
        Self {
            identity: Arc::new(identity),
            max_logged_body_bytes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.identity.clone(), config.max_logged_body_bytes)
    }
}

pub async fn request_lifecycle(
    State(state): State<LifecycleState>,
    req: Request,
    next: Next,
) -> Response {
    let headers = req.headers();
    let request_id = resolve_request_id(headers, &state.identity);
    let business_context = resolve_request_context(headers);
    let user = resolve_username(headers);
    let path = hide_passwords(&full_path(req.uri())).into_owned();

    let username = match &user {
        Ok(user) => user.username().to_string(),
        Err(_) => NO_REQUEST_USER.to_string(),
    };

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        user = %username,
        path = %path,
        context = %business_context,
    );

    let ctx = RequestContext::new(request_id.clone(), username, path, business_context);

    context::scope(ctx, run(state, req, next, RequestId::new(request_id), user))
        .instrument(span)
        .await
}

async fn run(
    state: LifecycleState,
    req: Request,
    next: Next,
    request_id: RequestId,
    user: Result<AuthenticatedUser, MalformedCredentialsError>,
) -> Response {
    let req = match on_request_start(&state, req, request_id, user).await {
        Ok(req) => req,
        Err(rejection) => return on_request_end(rejection),
    };

    let response = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => ApiError::unexpected(anyhow::anyhow!("handler panicked")).into_response(),
    };

    if response.extensions().get::<UnexpectedFailure>().is_some() {
        on_exception();
    }

    on_request_end(response)
}

async fn on_request_start(
    state: &LifecycleState,
    mut req: Request,
    request_id: RequestId,
    user: Result<AuthenticatedUser, MalformedCredentialsError>,
) -> Result<Request, Response> {
    let user = user.map_err(|e| {
        tracing::warn!(error = %e, "rejecting request with malformed authorization header");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(request_id);
    req.extensions_mut().insert(user);

    if !tracing::enabled!(Level::DEBUG) {
        return Ok(req);
    }

    let (parts, body) = req.into_parts();
    let (data, body) = buffer_for_log(body, state.max_logged_body_bytes).await?;

    tracing::debug!(
        "{}",
        hide_passwords(&format!("start of request {}. data: [{}]", parts.method, data))
    );

    Ok(Request::from_parts(parts, body))
}

/// Read a body of known size up to `limit` and hand back an equivalent body.
async fn buffer_for_log(body: Body, limit: usize) -> Result<(String, Body), Response> {
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= limit as u64);

    if !fits {
        return Ok((BODY_OMITTED.to_string(), body));
    }

    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => Ok((String::from_utf8_lossy(&bytes).into_owned(), Body::from(bytes))),
        Err(e) => {
            tracing::warn!(error = %e, "request body could not be read");
            Err(json_error(
                StatusCode::BAD_REQUEST,
                "unreadable_body",
                "request body could not be read",
            ))
        }
    }
}

fn on_exception() {
    tracing::error!("unexpected error");
}

fn on_request_end(response: Response) -> Response {
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(status = status.as_u16(), "request completed with failure. content: []");
    } else {
        tracing::debug!(status = status.as_u16(), "request completed successfully");
    }

    let elapsed_ms = context::with_current(RequestContext::elapsed_ms).unwrap_or_default();
    tracing::debug!(elapsed_ms, "end of request");

    response
}

fn full_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

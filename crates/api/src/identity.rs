//! Request identity resolution from inbound headers.
//!
//! Header values are read as ISO-8859-1 text, the way they arrive on the wire.

use core::str::FromStr;

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderName};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use uuid::Uuid;

use netapi_auth::{decode_basic_credentials, decode_latin1, AuthenticatedUser, MalformedCredentialsError};
use netapi_observability::context::{NO_REQUEST_CONTEXT, NO_REQUEST_ID};

/// Client-supplied business context propagated into every log line.
pub const REQUEST_CONTEXT_HEADER: HeaderName = HeaderName::from_static("x-request-context");

/// Username header sent by browser sessions (non-API callers).
pub const USERNAME_HEADER: HeaderName = HeaderName::from_static("networkapi-username");

/// What to do when a trusted request-id header is configured but missing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MissingRequestIdPolicy {
    /// Use the `NoRequestId` sentinel.
    #[default]
    Sentinel,
    /// Generate a fresh id, as if no header were configured.
    Generate,
}

impl FromStr for MissingRequestIdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generate" => Ok(Self::Generate),
            "sentinel" => Ok(Self::Sentinel),
            other => Err(format!("expected 'generate' or 'sentinel', got '{other}'")),
        }
    }
}

/// Request-id settings.
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    /// Header trusted as an externally supplied request id.
    pub request_id_header: Option<HeaderName>,
    pub missing_request_id: MissingRequestIdPolicy,
}

/// Resolve the request id.
///
/// A non-empty value of the configured header is echoed verbatim; when that
/// header is missing the result is the `NoRequestId` sentinel, unless the
/// policy asks for a generated id. Without a configured header a fresh id is
/// always generated.
pub fn resolve_request_id(headers: &HeaderMap, config: &IdentityConfig) -> String {
    if let Some(name) = &config.request_id_header {
        let supplied = headers
            .get(name)
            .map(|v| decode_latin1(v.as_bytes()))
            .filter(|v| !v.is_empty());

        match (supplied, config.missing_request_id) {
            (Some(id), _) => return id,
            (None, MissingRequestIdPolicy::Sentinel) => return NO_REQUEST_ID.to_string(),
            (None, MissingRequestIdPolicy::Generate) => {}
        }
    }

    generate_request_id()
}

/// 128 random bits, URL-safe base64 without padding, upper-cased (22 chars).
pub fn generate_request_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes()).to_uppercase()
}

pub fn resolve_request_context(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_CONTEXT_HEADER)
        .map(|v| decode_latin1(v.as_bytes()))
        .unwrap_or_else(|| NO_REQUEST_CONTEXT.to_string())
}

/// Resolve the caller's username.
///
/// The custom username header wins and is taken as-is (`is_api = false`).
/// Otherwise the `Authorization` header is decoded and its user part
/// upper-cased (`is_api = true`). Without either header the `NoUser`
/// sentinel is returned.
pub fn resolve_username(headers: &HeaderMap) -> Result<AuthenticatedUser, MalformedCredentialsError> {
    if let Some(value) = headers.get(USERNAME_HEADER) {
        return Ok(AuthenticatedUser::session(decode_latin1(value.as_bytes())));
    }

    if let Some(value) = headers.get(AUTHORIZATION) {
        let credentials = decode_basic_credentials(&decode_latin1(value.as_bytes()))?;
        return Ok(AuthenticatedUser::api(credentials.username()));
    }

    Ok(AuthenticatedUser::anonymous())
}

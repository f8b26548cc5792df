//! Translation of handler outcomes into HTTP responses.
//!
//! Every failure a handler can produce ends up here. Authorization and
//! business failures become typed responses; anything else becomes a generic
//! 500 tagged with [`UnexpectedFailure`] so the lifecycle middleware can run
//! its on-exception hook.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use netapi_auth::{AuthzError, MalformedCredentialsError};

/// Error code reported when the data source could not be read.
pub const DATA_SOURCE_FAILURE: u16 = 1;

/// Response extension marking a 500 produced from an unexpected error.
#[derive(Debug, Clone, Copy)]
pub struct UnexpectedFailure;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    /// A business failure, reported to the client only by its code.
    #[error("business error {code}")]
    Business { code: u16 },

    #[error(transparent)]
    MalformedCredentials(#[from] MalformedCredentialsError),

    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn business(code: u16) -> Self {
        Self::Business { code }
    }

    pub fn unexpected(err: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Unauthorized(_) => json_error(
                StatusCode::FORBIDDEN,
                "not_authorized",
                "user does not have permission to perform the operation",
            ),
            ApiError::Business { code } => coded_error(code),
            ApiError::MalformedCredentials(_) => json_error(
                StatusCode::BAD_REQUEST,
                "malformed_credentials",
                "authorization header could not be decoded",
            ),
            ApiError::Unexpected(_) => {
                let mut response = json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "unexpected error",
                );
                response.extensions_mut().insert(UnexpectedFailure);
                response
            }
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Coded business error body: `{"error": "business_error", "code": n, "message": ...}`.
pub fn coded_error(code: u16) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({
            "error": "business_error",
            "code": code,
            "message": error_message(code),
        })),
    )
        .into_response()
}

fn error_message(code: u16) -> &'static str {
    match code {
        DATA_SOURCE_FAILURE => "failed to access the data source",
        _ => "unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netapi_auth::Operation;

    #[test]
    fn unauthorized_maps_to_forbidden() {
        let err = ApiError::from(AuthzError::Forbidden {
            username: "BOB".to_string(),
            capability: "administracao_usuarios".to_string(),
            operation: Operation::Read,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.extensions().get::<UnexpectedFailure>().is_none());
    }

    #[test]
    fn business_error_is_coded_and_not_unexpected() {
        let response = ApiError::business(DATA_SOURCE_FAILURE).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<UnexpectedFailure>().is_none());
    }

    #[test]
    fn unexpected_error_is_marked() {
        let response = ApiError::unexpected(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<UnexpectedFailure>().is_some());
    }

    #[test]
    fn malformed_credentials_is_bad_request() {
        let response = ApiError::from(MalformedCredentialsError::MissingSeparator).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

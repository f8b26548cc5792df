//! Permission records of the user-group administration module.

use std::sync::Arc;

use axum::{extract::Extension, http::HeaderMap, response::Response, routing::get, Router};
use serde_json::Value;

use netapi_auth::{admin, AuthenticatedUser, Operation};
use netapi_core::Record;

use crate::app::errors::{ApiError, DATA_SOURCE_FAILURE};
use crate::app::format::{self, ResponseFormat};
use crate::app::services::AppServices;
use crate::authz;

pub fn router() -> Router {
    Router::new().route("/all", get(list_all))
}

/// GET /perms/all - List every permission record.
///
/// Requires read access to user administration. Answers in XML when the
/// client accepts it.
pub async fn list_all(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthenticatedUser>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    tracing::debug!("listing all permissions");

    authz::check_permission(
        &services,
        &user,
        &admin::USER_ADMINISTRATION,
        Operation::Read,
    )
    .await?;

    let perms = services.permissions.list_all().await.map_err(|e| {
        tracing::error!(error = %e, "failed to list permissions");
        ApiError::business(DATA_SOURCE_FAILURE)
    })?;

    let perms = perms
        .iter()
        .map(|perm| Value::Object(perm.to_fields()))
        .collect();

    format::render(ResponseFormat::negotiate(&headers), "perms", Value::Array(perms))
}

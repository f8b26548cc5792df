use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::json;

use netapi_auth::AuthenticatedUser;
use netapi_observability::context;

use crate::app::errors::ApiError;
use crate::context::RequestId;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /whoami - Echo the identity and context resolved for this request.
pub async fn whoami(
    Extension(request_id): Extension<RequestId>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ctx = context::current()
        .ok_or_else(|| ApiError::unexpected(anyhow::anyhow!("request context missing")))?;

    Ok(Json(json!({
        "request_id": request_id.as_str(),
        "user": ctx.user(),
        "is_api": user.is_api(),
        "path": ctx.path(),
        "context": ctx.business_context(),
    })))
}

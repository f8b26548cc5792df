//! API-side authorization gate for resource handlers.
//!
//! Loads the caller's administrative grants and applies the pure policy check
//! from `netapi-auth`. Handlers call this before touching any store.

use netapi_auth::{authorize, AuthenticatedUser, Capability, Operation};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Check that `user` may perform `operation` on `capability`.
///
/// A grant source failure is an unexpected error, never an implicit grant.
pub async fn check_permission(
    services: &AppServices,
    user: &AuthenticatedUser,
    capability: &Capability,
    operation: Operation,
) -> Result<(), ApiError> {
    let grants = if user.is_anonymous() {
        Vec::new()
    } else {
        services
            .grants
            .grants_for(user.username())
            .await
            .map_err(ApiError::unexpected)?
    };

    authorize(user, &grants, capability, operation).map_err(|e| {
        tracing::error!(
            capability = %capability,
            operation = %operation,
            "user does not have permission to perform the operation"
        );
        ApiError::from(e)
    })
}

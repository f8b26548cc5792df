use thiserror::Error;

use crate::{AdministrativeGrant, AuthenticatedUser, Capability, Operation};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: '{username}' lacks {operation} on '{capability}'")]
    Forbidden {
        username: String,
        capability: String,
        operation: Operation,
    },
}

/// Whether any grant allows `operation` on `capability`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn has_perm(grants: &[AdministrativeGrant], capability: &Capability, operation: Operation) -> bool {
    grants
        .iter()
        .any(|g| &g.capability == capability && g.allows(operation))
}

/// Authorize a user against the grants loaded for them.
pub fn authorize(
    user: &AuthenticatedUser,
    grants: &[AdministrativeGrant],
    capability: &Capability,
    operation: Operation,
) -> Result<(), AuthzError> {
    // The sentinel user never holds grants.
    if !user.is_anonymous() && has_perm(grants, capability, operation) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            username: user.username().to_string(),
            capability: capability.as_str().to_string(),
            operation,
        })
    }
}

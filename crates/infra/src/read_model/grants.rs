use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use netapi_auth::AdministrativeGrant;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Source of the administrative grants held by a user through their groups.
///
/// Usernames match case-insensitively. Unknown users have no grants.
#[async_trait]
pub trait GrantSource: Send + Sync {
    async fn grants_for(&self, username: &str) -> Result<Vec<AdministrativeGrant>, StoreError>;
}

/// In-memory grant table for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryGrantSource {
    inner: RwLock<HashMap<String, Vec<AdministrativeGrant>>>,
}

impl InMemoryGrantSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, username: &str, grant: AdministrativeGrant) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(username.to_uppercase()).or_default().push(grant);
        }
    }
}

#[async_trait]
impl GrantSource for InMemoryGrantSource {
    async fn grants_for(&self, username: &str) -> Result<Vec<AdministrativeGrant>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("grant store lock poisoned".to_string()))?;
        Ok(map.get(&username.to_uppercase()).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netapi_auth::admin;

    #[tokio::test]
    async fn lookup_ignores_username_case() {
        let source = InMemoryGrantSource::new();
        source.grant(
            "alice",
            AdministrativeGrant::new("admins", admin::USER_ADMINISTRATION, true, false),
        );

        assert_eq!(source.grants_for("ALICE").await.unwrap().len(), 1);
        assert_eq!(source.grants_for("Alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_has_no_grants() {
        let source = InMemoryGrantSource::new();
        assert!(source.grants_for("nobody").await.unwrap().is_empty());
    }
}

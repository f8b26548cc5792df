use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use netapi_core::{Entity, RecordId};
use netapi_grupo::{GrupoError, Permission};

/// Read access to the stored permission records.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Every stored permission, ordered by id.
    async fn list_all(&self) -> Result<Vec<Permission>, GrupoError>;
}

/// In-memory permission store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    inner: RwLock<BTreeMap<RecordId, Permission>>,
}

impl InMemoryPermissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permissions(permissions: impl IntoIterator<Item = Permission>) -> Self {
        let repo = Self::new();
        for perm in permissions {
            repo.insert(perm);
        }
        repo
    }

    /// Insert or replace a record (keyed by id).
    pub fn insert(&self, permission: Permission) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(*permission.id(), permission);
        }
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn list_all(&self) -> Result<Vec<Permission>, GrupoError> {
        let map = self
            .inner
            .read()
            .map_err(|_| GrupoError::data_source("permission store lock poisoned"))?;
        Ok(map.values().cloned().collect())
    }
}

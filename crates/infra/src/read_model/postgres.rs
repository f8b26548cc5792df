//! Postgres-backed stores.
//!
//! Tables read:
//! `permissions(id, function)`, `users(id, username, active)`,
//! `user_groups(id, name)`, `user_group_members(user_id, group_id)`,
//! `administrative_permissions(group_id, permission_id, read, write)`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use netapi_auth::{AdministrativeGrant, Capability};
use netapi_core::RecordId;
use netapi_grupo::{GrupoError, Permission};

use super::{GrantSource, PermissionRepository, StoreError};

/// Permission records read from the `permissions` table.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn list_all(&self) -> Result<Vec<Permission>, GrupoError> {
        let rows = sqlx::query("SELECT id, function FROM permissions ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "permissions query failed");
                GrupoError::data_source(e.to_string())
            })?;

        rows.into_iter()
            .map(|row| -> Result<Permission, GrupoError> {
                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| GrupoError::data_source(e.to_string()))?;
                let function: String = row
                    .try_get("function")
                    .map_err(|e| GrupoError::data_source(e.to_string()))?;
                Ok(Permission::from_row(RecordId::new(id), function))
            })
            .collect()
    }
}

/// Grants resolved through active users' group memberships.
#[derive(Clone)]
pub struct PostgresGrantSource {
    pool: PgPool,
}

impl PostgresGrantSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantSource for PostgresGrantSource {
    async fn grants_for(&self, username: &str) -> Result<Vec<AdministrativeGrant>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                g.name AS group_name,
                p.function AS function,
                ap.read AS read,
                ap.write AS write
            FROM users u
            JOIN user_group_members m ON m.user_id = u.id
            JOIN user_groups g ON g.id = m.group_id
            JOIN administrative_permissions ap ON ap.group_id = g.id
            JOIN permissions p ON p.id = ap.permission_id
            WHERE upper(u.username) = upper($1) AND u.active
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<AdministrativeGrant, StoreError> {
                Ok(AdministrativeGrant::new(
                    row.try_get::<String, _>("group_name")?,
                    Capability::new(row.try_get::<String, _>("function")?),
                    row.try_get::<bool, _>("read")?,
                    row.try_get::<bool, _>("write")?,
                ))
            })
            .collect()
    }
}

//! Store wiring for the handlers.

use std::sync::Arc;

use sqlx::PgPool;

use netapi_infra::{
    db, GrantSource, InMemoryGrantSource, InMemoryPermissionRepository, PermissionRepository,
    PostgresGrantSource, PostgresPermissionRepository,
};

use crate::config::Config;

/// Collaborators shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    pub permissions: Arc<dyn PermissionRepository>,
    pub grants: Arc<dyn GrantSource>,
}

impl AppServices {
    pub fn new(permissions: Arc<dyn PermissionRepository>, grants: Arc<dyn GrantSource>) -> Self {
        Self { permissions, grants }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresPermissionRepository::new(pool.clone())),
            Arc::new(PostgresGrantSource::new(pool)),
        )
    }

    /// Postgres when `DATABASE_URL` is configured, empty in-memory stores otherwise.
    pub fn from_config(config: &Config) -> Result<Self, sqlx::Error> {
        match &config.database_url {
            Some(url) => {
                let pool = db::connect_lazy(url, config.db_max_connections)?;
                Ok(Self::postgres(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using empty in-memory stores");
                Ok(Self::new(
                    Arc::new(InMemoryPermissionRepository::new()),
                    Arc::new(InMemoryGrantSource::new()),
                ))
            }
        }
    }
}

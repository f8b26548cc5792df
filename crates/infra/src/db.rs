//! Database adapters (connection pool wiring).

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Open a Postgres pool. Connections are established lazily on first use so
/// the API can start while the database is still coming up.
pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)
}

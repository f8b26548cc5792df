//! Read-side storage abstractions consulted by the API.

pub mod grants;
pub mod permissions;
pub mod postgres;

pub use grants::{GrantSource, InMemoryGrantSource, StoreError};
pub use permissions::{InMemoryPermissionRepository, PermissionRepository};
pub use postgres::{PostgresGrantSource, PostgresPermissionRepository};

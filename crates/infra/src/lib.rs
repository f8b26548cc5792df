//! Infrastructure layer: database wiring and the read-side stores the API
//! consults (permission records, administrative grants).

pub mod db;
pub mod read_model;

pub use read_model::{
    GrantSource, InMemoryGrantSource, InMemoryPermissionRepository, PermissionRepository,
    PostgresGrantSource, PostgresPermissionRepository, StoreError,
};

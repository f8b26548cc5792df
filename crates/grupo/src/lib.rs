//! User-group domain module.
//!
//! Holds the records the group administration endpoints expose (no IO, no
//! HTTP, no storage).

pub mod error;
pub mod permission;

pub use error::GrupoError;
pub use permission::Permission;

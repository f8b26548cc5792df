//! `netapi-auth`: identity and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: callers hand
//! it header text and grant lists, it hands back identities and decisions.

pub mod authorize;
pub mod capability;
pub mod credentials;
pub mod grant;
pub mod user;

pub use authorize::{authorize, has_perm, AuthzError};
pub use capability::{admin, Capability, Operation};
pub use credentials::{decode_basic_credentials, decode_latin1, BasicCredentials, MalformedCredentialsError};
pub use grant::AdministrativeGrant;
pub use user::{AuthenticatedUser, NO_REQUEST_USER};

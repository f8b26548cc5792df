use serde::Serialize;

/// Username reported when a request carries no identity headers.
pub const NO_REQUEST_USER: &str = "NoUser";

/// Identity derived from the inbound request headers.
///
/// `is_api` is true when the identity came from an `Authorization` header
/// (API caller) and false for the custom username header used by browser
/// sessions or when no identity was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    username: String,
    is_api: bool,
}

impl AuthenticatedUser {
    /// Identity supplied through the custom username header; case is kept.
    pub fn session(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_api: false,
        }
    }

    /// Identity supplied through the `Authorization` header.
    pub fn api(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_api: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::session(NO_REQUEST_USER)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_api(&self) -> bool {
        self.is_api
    }

    pub fn is_anonymous(&self) -> bool {
        self.username == NO_REQUEST_USER
    }
}

impl Default for AuthenticatedUser {
    fn default() -> Self {
        Self::anonymous()
    }
}

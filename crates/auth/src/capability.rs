use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability identifier (the name of an administrative function).
///
/// Capabilities are opaque strings at this layer; which users hold them is
/// decided by grants loaded from the authorization source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of access requested on a capability.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Read,
    Write,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operation::Read => f.write_str("READ"),
            Operation::Write => f.write_str("WRITE"),
        }
    }
}

/// Administrative capability catalogue.
pub mod admin {
    use super::Capability;

    pub const USER_ADMINISTRATION: Capability = Capability::from_static("administracao_usuarios");
}

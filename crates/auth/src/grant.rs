use serde::{Deserialize, Serialize};

use crate::{Capability, Operation};

/// A capability granted to one of the user's groups, with per-operation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeGrant {
    /// Group the grant was issued to (audit/display only).
    pub group: String,
    pub capability: Capability,
    pub read: bool,
    pub write: bool,
}

impl AdministrativeGrant {
    pub fn new(group: impl Into<String>, capability: Capability, read: bool, write: bool) -> Self {
        Self {
            group: group.into(),
            capability,
            read,
            write,
        }
    }

    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::Read => self.read,
            Operation::Write => self.write,
        }
    }
}

use serde::{Deserialize, Serialize};

use netapi_core::{DomainError, DomainResult, Entity, Record, RecordId};

/// An administrative function that group grants refer to
/// (e.g. `"administracao_usuarios"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: RecordId,
    function: String,
}

impl Permission {
    /// Build a permission record, rejecting blank function names.
    pub fn new(id: RecordId, function: impl Into<String>) -> DomainResult<Self> {
        let function = function.into();
        if function.trim().is_empty() {
            return Err(DomainError::blank("permission", "function"));
        }
        Ok(Self { id, function })
    }

    /// Rebuild a stored record as-is, without validation.
    pub fn from_row(id: RecordId, function: impl Into<String>) -> Self {
        Self {
            id,
            function: function.into(),
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl Entity for Permission {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Record for Permission {}

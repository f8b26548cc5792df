//! Errors raised while building domain records from raw values.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field was empty or whitespace only.
    #[error("{entity}.{field} must not be blank")]
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

impl DomainError {
    pub fn blank(entity: &'static str, field: &'static str) -> Self {
        Self::BlankField { entity, field }
    }
}

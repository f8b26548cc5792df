use thiserror::Error;

/// Business failures of the user-group domain.
///
/// Resource handlers translate every variant into a coded error response;
/// none of them is fatal to the server.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrupoError {
    /// The backing data source could not be read.
    #[error("data source failure: {0}")]
    DataSource(String),
}

impl GrupoError {
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }
}

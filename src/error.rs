use thiserror::Error;

/// Everything a lifecycle operation can fail with. Errors are synchronous
/// and terminal for the invocation; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not authorized: {0}")]
    Authorization(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    State(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Error::NotFound { entity, id }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

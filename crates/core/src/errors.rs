use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scheduling conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl LexError {
    /// True for failures whose detail must stay server-side.
    pub fn is_internal(&self) -> bool {
        matches!(self, LexError::Database(_) | LexError::Internal(_))
    }
}

pub type LexResult<T> = Result<T, LexError>;

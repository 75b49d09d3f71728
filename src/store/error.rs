use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("resource not found: {0}")]
    NotFound(String),
}

impl RecordError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Message without the variant prefix, suitable for client responses.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::NotFound(message) => message,
        }
    }
}

pub type RecordResult<T> = Result<T, RecordError>;

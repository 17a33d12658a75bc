use k12_core::{AppError, ErrorKind};

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Transport(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let kind = match &err {
            StoreError::Transport(_) => ErrorKind::Transport,
            StoreError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            StoreError::InvalidQuery(_) => ErrorKind::Validation,
            StoreError::Serialization(_) => ErrorKind::Internal,
            StoreError::Redis(e) if e.code() == Some("NOPERM") => ErrorKind::PermissionDenied,
            StoreError::Redis(_) => ErrorKind::Transport,
        };
        AppError::new(kind, err)
    }
}

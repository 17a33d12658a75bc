use k12_core::{AppError, ErrorKind};

/// Error type for auth provider operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    AccountExists(String),

    #[error("Auth service unavailable: {0}")]
    Transport(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Session file error: {0}")]
    SessionFile(#[from] std::io::Error),

    #[error("Malformed account record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if let AuthError::App(inner) = err {
            return inner;
        }

        let kind = match &err {
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::AccountExists(_) => ErrorKind::AccountExists,
            AuthError::Transport(_) => ErrorKind::Transport,
            AuthError::Redis(e) if e.code() == Some("NOPERM") => ErrorKind::PermissionDenied,
            AuthError::Redis(_) => ErrorKind::Transport,
            AuthError::Token(_) | AuthError::SessionFile(_) | AuthError::Serialization(_) => {
                ErrorKind::Internal
            }
            AuthError::App(inner) => inner.kind,
        };
        AppError::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_kinds() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).kind,
            ErrorKind::InvalidCredentials
        );
        assert_eq!(
            AppError::from(AuthError::AccountExists("a@b.co".into())).kind,
            ErrorKind::AccountExists
        );
        assert_eq!(
            AppError::from(AuthError::Transport("offline".into())).kind,
            ErrorKind::Transport
        );
    }

    #[test]
    fn test_wrapped_app_error_passes_through() {
        let inner = AppError::validation(anyhow::anyhow!("bad"));
        let mapped = AppError::from(AuthError::from(inner));
        assert_eq!(mapped.kind, ErrorKind::Validation);
        assert!(mapped.to_string().contains("bad"));
    }
}

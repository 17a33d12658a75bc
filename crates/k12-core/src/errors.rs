//! Application error type shared by every repository and session operation.
//!
//! Every fallible operation in the client returns `Result<T, AppError>`.
//! An [`AppError`] pairs an [`ErrorKind`] (what the caller can branch on)
//! with an [`anyhow::Error`] carrying the detail and context chain.

use anyhow::Error;
use std::fmt;

/// Failure categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested document or profile does not exist.
    NotFound,
    /// The auth backend rejected the email/password pair.
    InvalidCredentials,
    /// An account already exists for the email being registered.
    AccountExists,
    /// The backend refused access to the document or collection.
    PermissionDenied,
    /// The network or backend is unavailable.
    Transport,
    /// Caller-side input check failed before any network call.
    Validation,
    /// Client-side fault: malformed document, hashing failure, and similar.
    Internal,
}

impl ErrorKind {
    /// Short human-readable label used as the prefix of user messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::InvalidCredentials => "Invalid credentials",
            Self::AccountExists => "Account already exists",
            Self::PermissionDenied => "Permission denied",
            Self::Transport => "Connection problem",
            Self::Validation => "Invalid input",
            Self::Internal => "Unexpected error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn invalid_credentials<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidCredentials, err)
    }

    pub fn account_exists<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::AccountExists, err)
    }

    pub fn permission_denied<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::PermissionDenied, err)
    }

    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Transport, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    /// Wraps the detail with additional context, keeping the kind.
    pub fn context<C>(self, context: C) -> Self
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        Self {
            kind: self.kind,
            error: self.error.context(context),
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Message suitable for showing to the person using the app.
    ///
    /// Always names the failure category so different failures read
    /// differently, followed by the outermost detail.
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.kind.label(), self.error)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.kind, self.error)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("x")).kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            AppError::invalid_credentials(anyhow::anyhow!("x")).kind,
            ErrorKind::InvalidCredentials
        );
        assert_eq!(
            AppError::account_exists(anyhow::anyhow!("x")).kind,
            ErrorKind::AccountExists
        );
        assert_eq!(
            AppError::permission_denied(anyhow::anyhow!("x")).kind,
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            AppError::transport(anyhow::anyhow!("x")).kind,
            ErrorKind::Transport
        );
        assert_eq!(
            AppError::validation(anyhow::anyhow!("x")).kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_user_messages_are_distinguishable() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::InvalidCredentials,
            ErrorKind::AccountExists,
            ErrorKind::PermissionDenied,
            ErrorKind::Transport,
            ErrorKind::Validation,
            ErrorKind::Internal,
        ];

        let messages: std::collections::HashSet<String> = kinds
            .iter()
            .map(|kind| AppError::new(*kind, anyhow::anyhow!("same detail")).user_message())
            .collect();

        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn test_context_keeps_kind() {
        let error = AppError::not_found(anyhow::anyhow!("missing"))
            .context("Failed to load user profile");

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(
            error.user_message(),
            "Not found: Failed to load user profile"
        );
        assert!(error.to_string().contains("missing"));
    }
}

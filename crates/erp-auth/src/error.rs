//! Typed authentication outcomes.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use erp_core::error::{AppError, ErrorKind};

/// Form field that must be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// Login name.
    Username,
    /// Account secret.
    Password,
    /// Contact address (password reset).
    Email,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "Username"),
            Self::Password => write!(f, "Password"),
            Self::Email => write!(f, "Email"),
        }
    }
}

/// Why an authentication request did not establish a session.
///
/// Every variant is recoverable by the user and meant to be displayed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty or whitespace.
    #[error("{0} is required")]
    MissingField(CredentialField),
    /// Unknown username or wrong secret.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Too many consecutive failures; attempts are blocked for a while.
    #[error("Too many failed login attempts. Try again after {locked_until}")]
    TooManyAttempts {
        /// When attempts are accepted again.
        locked_until: DateTime<Utc>,
    },
    /// Someone is already logged in on this session.
    #[error("A session is already active. Log out first.")]
    SessionActive,
    /// The credential backend failed.
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(_) => AppError::validation(err.to_string()),
            AuthError::InvalidCredentials | AuthError::TooManyAttempts { .. } => {
                AppError::authentication(err.to_string())
            }
            AuthError::SessionActive => AppError::session(err.to_string()),
            AuthError::Backend(inner) => inner,
        }
    }
}

impl AuthError {
    /// The [`ErrorKind`] this error maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::Validation,
            Self::InvalidCredentials | Self::TooManyAttempts { .. } => ErrorKind::Authentication,
            Self::SessionActive => ErrorKind::Session,
            Self::Backend(inner) => inner.kind,
        }
    }
}

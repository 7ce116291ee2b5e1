//! Error types for stash-core

use thiserror::Error;

use crate::auth::AuthError;
use crate::validation::ValidationReport;

/// Result type alias using stash-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stash-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any network call was made
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationReport),

    /// Transport-level failure talking to the remote service
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with an error status
    #[error("Remote service error: {message} ({status})")]
    Api { status: u16, message: String },

    /// The requested record does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The service rejected our credentials or token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No signed-in user is available for an operation that needs one
    #[error("Not signed in")]
    Unauthenticated,

    /// Auth client failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], used by presentation code to
/// choose how a failure is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Service,
    NotFound,
    Auth,
    Config,
    Internal,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Http(_) => ErrorKind::Network,
            Self::Api { .. } => ErrorKind::Service,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized(_) | Self::Unauthenticated | Self::Auth(_) => ErrorKind::Auth,
            Self::Config(_) => ErrorKind::Config,
            Self::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Validation details, if this is a validation failure.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn classifies_errors_by_kind() {
        assert_eq!(Error::NotFound("n1".into()).kind(), ErrorKind::NotFound);
        assert_eq!(Error::Unauthenticated.kind(), ErrorKind::Auth);
        assert_eq!(
            Error::Api {
                status: 500,
                message: "boom".into()
            }
            .kind(),
            ErrorKind::Service
        );
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn validation_error_exposes_report() {
        let report = ValidationReport::from(vec![FieldError::new("title", "too short")]);
        let error = Error::from(report);
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.validation().unwrap().field("title").is_some());
        assert!(error.to_string().contains("title: too short"));
    }
}

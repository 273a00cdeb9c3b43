//! Error types for API and session operations.
//!
//! # Design
//! - Keep the failure kind (network, unauthorized, rejected) intact for callers.
//! - Offer a fixed user-facing sentence separately from diagnostic detail.

use std::io;

use thiserror::Error;

/// Message surfaced to end users for transport and server failures.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something bad happened; please try again later.";

/// Message surfaced to end users when the session is missing or rejected.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "Please log in again to continue.";

/// Failure raised by the session backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("session file I/O failed")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
    /// A stored value could not be encoded or decoded.
    #[error("session value could not be (de)serialised")]
    Serialization {
        /// Underlying serde error.
        #[from]
        source: serde_json::Error,
    },
    /// The platform storage rejected the operation.
    #[error("session storage unavailable: {detail}")]
    Backend {
        /// Backend-specific description.
        detail: String,
    },
}

/// Primary error type for myFlix API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The operation needs a logged-in session and none is cached.
    #[error("not logged in")]
    NotAuthenticated,
    /// The configured base URL cannot carry path segments.
    #[error("invalid API base URL '{value}'")]
    InvalidBaseUrl {
        /// Offending URL text.
        value: String,
    },
    /// The request never produced an HTTP response.
    #[error("request failed before a response was received")]
    Network {
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server refused the bearer token (401/403).
    #[error("request unauthorized (status {status})")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
    },
    /// The server answered with any other non-success status.
    #[error("request rejected (status {status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided explanation, when present.
        detail: Option<String>,
    },
    /// A success response carried a body that could not be decoded.
    #[error("failed to decode response body")]
    Decode {
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Persisting or loading the session failed.
    #[error("session storage failed")]
    Storage {
        /// Backend error.
        #[from]
        source: StoreError,
    },
}

/// Copyable discriminant of [`ApiError`] for branching in views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`ApiError::NotAuthenticated`].
    NotAuthenticated,
    /// See [`ApiError::InvalidBaseUrl`].
    Configuration,
    /// See [`ApiError::Network`].
    Network,
    /// See [`ApiError::Unauthorized`].
    Unauthorized,
    /// See [`ApiError::Rejected`].
    Rejected,
    /// See [`ApiError::Decode`].
    Decode,
    /// See [`ApiError::Storage`].
    Storage,
}

impl ApiError {
    /// Discriminant of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthenticated => ErrorKind::NotAuthenticated,
            Self::InvalidBaseUrl { .. } => ErrorKind::Configuration,
            Self::Network { .. } => ErrorKind::Network,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Storage { .. } => ErrorKind::Storage,
        }
    }

    /// HTTP status attached to the failure, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided explanation for rejected requests.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Fixed sentence suitable for a toast or CLI error line.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated | Self::Unauthorized { .. } => SIGN_IN_REQUIRED_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_status_follow_variant() {
        let rejected = ApiError::Rejected {
            status: 422,
            detail: Some("Username already exists".into()),
        };
        assert_eq!(rejected.kind(), ErrorKind::Rejected);
        assert_eq!(rejected.status(), Some(422));
        assert_eq!(rejected.detail(), Some("Username already exists"));
        assert_eq!(rejected.user_message(), GENERIC_FAILURE_MESSAGE);

        let unauthorized = ApiError::Unauthorized { status: 401 };
        assert_eq!(unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(unauthorized.user_message(), SIGN_IN_REQUIRED_MESSAGE);
        assert!(unauthorized.detail().is_none());

        assert_eq!(ApiError::NotAuthenticated.status(), None);
    }

    #[test]
    fn storage_errors_convert() {
        let err = ApiError::from(StoreError::Backend {
            detail: "quota exceeded".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}

//! Error types for Kan API operations.

use thiserror::Error;

/// The error type for Kan API operations.
///
/// Three kinds of failure reach callers:
/// - [`Error::Validation`]: raised locally before any request is sent.
/// - [`Error::Transport`]: the HTTP round trip itself did not complete.
/// - [`Error::Api`]: the remote service answered with a non-success status.
#[derive(Debug, Error)]
pub enum Error {
    /// A field the chosen action requires was not supplied.
    #[error("{field} required for {action}")]
    Validation {
        /// Name of the missing field, as the caller spells it.
        field: &'static str,
        /// The action that requires it.
        action: &'static str,
    },

    /// The request could not be completed (DNS, refused connection, timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The remote service returned a non-success HTTP status.
    #[error("Kan API {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, verbatim.
        body: String,
    },

    /// A JSON response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of an [`Error::Api`], `None` for every other kind.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 4xx API errors: the request needs correcting.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// True for 5xx API errors: the same request may succeed later.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// True for errors raised before any network attempt.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// A specialized Result type for Kan API operations.
pub type Result<T> = std::result::Result<T, Error>;

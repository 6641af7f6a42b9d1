//! Error types for the Kan MCP server.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that can occur in the Kan MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter violates its tool schema.
    #[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
    InvalidArgument {
        /// The field name that had an invalid value.
        field: &'static str,
        /// The invalid value that was provided.
        value: String,
        /// Description of valid values.
        valid_values: &'static str,
    },

    /// An error from the Kan client or handlers.
    #[error(transparent)]
    Kan(#[from] kan::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the caller can fix the problem by changing parameters.
    #[must_use]
    pub fn is_invalid_params(&self) -> bool {
        match self {
            Self::InvalidArgument { .. } => true,
            Self::Kan(e) => e.is_validation(),
            Self::Json(_) => false,
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        if err.is_invalid_params() {
            McpError::invalid_params(err.to_string(), None)
        } else {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

/// Result type for Kan MCP operations.
pub type Result<T> = std::result::Result<T, Error>;

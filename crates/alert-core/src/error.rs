//! Error types for alert tracking operations.

use thiserror::Error;

/// Errors that can occur while querying the alert API or tracking a region.
#[derive(Debug, Error)]
pub enum AlertError {
    /// A caller-supplied argument violates a precondition.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A caller-supplied argument is outside its permitted range.
    #[error("Argument '{name}' out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },

    /// A required configuration value or secret is absent.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A configuration value is present but unusable.
    #[error("Invalid configuration '{key}': {reason}")]
    InvalidConfiguration { key: &'static str, reason: String },

    /// HTTP transport error or non-success status.
    #[error("Request failed: {message}")]
    Request { status: Option<u16>, message: String },

    /// The response body does not match the expected shape.
    #[error("Unable to deserialize response from {}: {source}", response.url)]
    Deserialization {
        response: ResponseSnapshot,
        #[source]
        source: DecodeError,
    },
}

impl AlertError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Create a request failure without an HTTP status (transport error).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Request {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    pub fn is_missing_configuration(&self) -> bool {
        matches!(self, Self::MissingConfiguration(_))
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    pub fn is_deserialization(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }
}

/// The underlying cause of a deserialization failure.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not valid JSON, or its shape does not match.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A region list was expected to contain at least one element.
    #[error("the response contains no regions")]
    EmptyRegionList,
}

/// A copy of the response a deserialization failure originated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    /// Request URL the response belongs to.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Reject empty or whitespace-only strings with an invalid-argument error.
pub fn ensure_not_blank(name: &'static str, value: &str) -> Result<(), AlertError> {
    if value.trim().is_empty() {
        return Err(AlertError::invalid_argument(
            name,
            "cannot be empty or whitespace",
        ));
    }
    Ok(())
}

//! Error types for the dyndns system
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for dyndns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dyndns system
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or connection failure (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed or unexpected response body
    #[error("Decode error: {0}")]
    Decode(String),

    /// A required argument is missing; checked before any request is made
    #[error("{0}")]
    Precondition(String),

    /// The provider answered with a non-success HTTP status
    #[error("Remote failure (HTTP {status}): {body}")]
    RemoteFailure {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Invalid command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing command output failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a remote failure from a status code and response body
    pub fn remote_failure(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteFailure {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error comes from bad user input rather than a failed run
    ///
    /// The binary uses this to pick its exit code. A `Precondition` is not a
    /// usage error: its message is regular command output.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Config(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_displays_bare_message() {
        let err = Error::precondition("cannot update without hostname");
        assert_eq!(err.to_string(), "cannot update without hostname");
    }

    #[test]
    fn test_remote_failure_display() {
        let err = Error::remote_failure(401, "{\"code\":401}");
        assert_eq!(err.to_string(), "Remote failure (HTTP 401): {\"code\":401}");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_usage_classification() {
        assert!(!Error::precondition("x").is_usage());
        assert!(Error::invalid_input("x").is_usage());
        assert!(Error::config("x").is_usage());
        assert!(!Error::network("x").is_usage());
        assert!(!Error::decode("x").is_usage());
        assert!(!Error::remote_failure(500, "").is_usage());
    }
}

//! Common error types for mrr-cli.
//!
//! This module provides a centralized Error enum using thiserror,
//! with conversions from underlying error types used throughout the crate.

use thiserror::Error;

/// Main error type for mrr-cli operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid startup configuration. Fatal.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-200 response from the API, carrying the server's message.
    #[error("{0}")]
    Api(String),

    /// Network-level failure: connection refused, timeout, truncated body
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose body was not JSON, or a body that could not
    /// be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed command input. No request was sent.
    #[error("{reason}")]
    Argument {
        reason: String,
        usage: &'static str,
    },

    /// Input line that names no known command
    #[error("Unknown syntax: {0}")]
    UnknownCommand(String),

    /// I/O errors from the terminal
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the shell must stop after this error.
    ///
    /// Configuration and terminal I/O failures end a session; everything
    /// else is reported and the loop continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Config(_))
    }
}

/// Convenience type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_bare_message() {
        let err = Error::Api("bad request".into());
        assert_eq!(err.to_string(), "bad request");
    }

    #[test]
    fn only_io_and_config_are_fatal() {
        assert!(Error::Config("no key".into()).is_fatal());
        assert!(Error::Io(std::io::Error::other("closed")).is_fatal());
        assert!(!Error::Api("nope".into()).is_fatal());
        assert!(!Error::Argument {
            reason: "missing id".into(),
            usage: "get_rental <ids>",
        }
        .is_fatal());
    }
}

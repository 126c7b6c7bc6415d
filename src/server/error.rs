//! Error types for the host adapter.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors raised while serving a connection.
///
/// Unmatched routes are not errors: the router answers them through its
/// not-found handler.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A handler panicked while serving the request.
    #[error("Handler panicked: {0}")]
    HandlerPanicked(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

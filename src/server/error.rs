//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that end the handling of a single connection.
///
/// None of these reach the accept loop: they are logged where the connection
/// task finishes and the socket is closed.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading the HTTP request.
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error in a response helper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types for the HTTP request parser.

use thiserror::Error;

/// Errors that can occur while reading a request off the wire.
///
/// A malformed request line is not represented here: [`read_request`](super::read_request)
/// reports it as `Ok(None)` so the caller can close the connection silently.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the blank line that terminates the headers.
    #[error("Unexpected end of stream while reading headers")]
    UnexpectedEof,

    /// A header line without a colon.
    #[error("Malformed header line: {0}")]
    MalformedHeader(String),

    /// The `Content-Length` value is not a non-negative integer.
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// The request line or a header line is not valid UTF-8.
    #[error("Request head is not valid UTF-8")]
    InvalidUtf8,

    /// Error parsing JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON body was requested but the request is not `application/json`.
    #[error("Request body is not application/json")]
    NotJson,
}

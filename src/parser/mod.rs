//! HTTP request parser module.
//!
//! Turns the bytes of one connection into a [`Request`]: request line, a raw
//! header block with `Content-Length`/`Content-Type` recognised, an optional
//! fixed-length body, and form-decoded query and post parameters.

mod request;
mod form;
mod error;

// Re-export public items
pub use request::{HeaderBlock, Request, RequestLine};
pub use form::{decode_form_encoded, Params};
pub use error::Error;

// Re-export the parsing functions
pub use request::{parse_headers, parse_request_line, read_request, split_target};

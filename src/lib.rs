//! A minimal HTTP/1.1 server built directly on TCP sockets.
//!
//! Every connection carries exactly one request. The request line, headers
//! and body are parsed by hand, the request is routed by an exact
//! `"METHOD PATH"` match to a registered handler, and anything unmatched is
//! either served from a fixed whitelist of static files or answered with a
//! 404. Every response advertises `Connection: close`.
//!
//! # Features
//!
//! - Request parsing from any `AsyncBufRead`, with raw header block, fixed-length body
//!   and form-decoded query and post parameters
//! - Exact method and path routing to handlers that write their own response
//! - Whitelisted static files, with `{time}` substitution in `/classic.html`
//! - Bounded worker pool; a failing connection never affects the others
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use rawhttp::read_request;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut input: &[u8] = b"GET /search?tag=a&tag=b HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match read_request(&mut input).await {
//!     Ok(Some(request)) => {
//!         assert_eq!(request.path(), "/search");
//!         assert_eq!(request.query_param("tag"), ["a", "b"]);
//!     }
//!     Ok(None) => println!("Malformed request line"),
//!     Err(err) => println!("Error reading request: {err}"),
//! }
//! # });
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use rawhttp::{write_response, HttpServer, ServerConfig, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rawhttp::ServerError> {
//!     let mut server = HttpServer::new(ServerConfig::with_port(9999));
//!
//!     server.add_handler("GET", "/messages", |request, out| {
//!         Box::pin(async move {
//!             let body = format!("<h1>GET /messages</h1>\nHeaders: {}", request.headers());
//!             write_response(out, StatusCode::Ok, Some("text/html"), body.as_bytes()).await
//!         })
//!     });
//!
//!     server.start().await
//! }
//! ```
//!
//! See `demos/messages.rs` for a complete application.

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{decode_form_encoded, read_request, Error as ParserError, Params, Request};
pub use server::{
    write_json, write_not_found, write_response, Error as ServerError, HttpServer, ResponseData,
    ResponseStream, Router, ServerConfig, StaticFiles, StatusCode,
};

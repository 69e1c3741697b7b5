//! HTTP server implementation for rawhttp.
//!
//! Accepts TCP connections, runs each through the parser, routes the request
//! to a registered handler, a whitelisted static file or a 404, and closes the
//! connection once the response is written.

mod response;
mod config;
mod error;
mod handler;
mod router;
mod static_files;
mod http_server;

// Re-export public items
pub use response::{write_json, write_not_found, write_response, ResponseData, StatusCode};
pub use config::{ServerConfig, DEFAULT_PORT, DEFAULT_WORKERS};
pub use error::Error;
pub use handler::{route_key, Handler, HandlerFuture, ResponseStream, RouteTable};
pub use router::Router;
pub use static_files::{
    content_type_for, render_template, timestamp, StaticFiles, TEMPLATED_PATH, TIME_PLACEHOLDER,
    WHITELIST,
};
pub use http_server::HttpServer;

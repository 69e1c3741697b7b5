//! Request handlers and the route table.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::warn;
use tokio::io::AsyncWrite;

use crate::parser::Request;
use crate::server::Error;

/// The output side of a connection, as seen by a handler.
pub type ResponseStream<'a> = dyn AsyncWrite + Unpin + Send + 'a;

/// Type alias for the boxed future a handler returns.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// A registered request handler.
///
/// It receives the parsed request and the connection's output stream and must
/// write the whole response itself, status line through body. Nothing is
/// added around it.
pub type Handler =
    Arc<dyn for<'a> Fn(&'a Request, &'a mut ResponseStream<'a>) -> HandlerFuture<'a> + Send + Sync>;

/// The `"METHOD PATH"` key handlers are registered and looked up under.
pub fn route_key(method: &str, path: &str) -> String {
    format!("{method} {path}")
}

/// Exact-match mapping from `"METHOD PATH"` to [`Handler`].
///
/// Filled while the server is being set up and read-only afterwards.
#[derive(Default, Clone)]
pub struct RouteTable {
    handlers: HashMap<String, Handler>,
}

impl RouteTable {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and `path`, replacing any previous one.
    pub fn insert<F>(&mut self, method: &str, path: &str, handler: F)
    where
        F: for<'a> Fn(&'a Request, &'a mut ResponseStream<'a>) -> HandlerFuture<'a>
            + Send
            + Sync
            + 'static,
    {
        let key = route_key(method, path);
        if self.handlers.insert(key.clone(), Arc::new(handler)).is_some() {
            warn!("Replacing handler for {key}");
        }
    }

    /// Look up the handler registered for exactly this method and path.
    pub fn get(&self, method: &str, path: &str) -> Option<&Handler> {
        self.handlers.get(&route_key(method, path))
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

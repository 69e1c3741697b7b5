//! Dispatch of a parsed request to a handler, a static file, or a 404.

use log::debug;

use crate::parser::Request;
use crate::server::handler::{ResponseStream, RouteTable};
use crate::server::response::write_not_found;
use crate::server::static_files::StaticFiles;
use crate::server::Error;

/// Decides what produces the response for a request.
///
/// Lookup is an exact match on method and clean path. A registered GET
/// handler does not answer HEAD, and nothing else about the method is
/// considered before falling back to static files.
#[derive(Clone)]
pub struct Router {
    routes: RouteTable,
    static_files: StaticFiles,
}

impl Router {
    /// Create a router over a frozen route table and a static file root.
    pub fn new(routes: RouteTable, static_files: StaticFiles) -> Self {
        Self {
            routes,
            static_files,
        }
    }

    /// Produce and write a complete response for `request`.
    pub async fn route(&self, request: &Request, out: &mut ResponseStream<'_>) -> Result<(), Error> {
        let (method, path) = (request.method(), request.path());

        if let Some(handler) = self.routes.get(method, path) {
            debug!("{method} {path} -> handler");
            return handler(request, out).await;
        }

        if self.static_files.is_whitelisted(path) {
            debug!("{method} {path} -> static file");
            self.static_files.serve(path, out).await
        } else {
            debug!("{method} {path} -> 404");
            write_not_found(out).await
        }
    }
}

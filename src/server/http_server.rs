//! HTTP server implementation: accept loop, worker pool and per-connection pipeline.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::parser::{read_request, Request};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{HandlerFuture, ResponseStream, RouteTable};
use crate::server::router::Router;
use crate::server::static_files::StaticFiles;

/// An HTTP server.
///
/// Handlers are registered through `&mut self` before [`start`](Self::start)
/// or [`serve`](Self::serve) consumes the server, so the route table is
/// complete before the first connection is accepted and is only read from then on.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    routes: RouteTable,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            routes: RouteTable::new(),
        }
    }

    /// Register a handler for an exact method and path.
    ///
    /// ```no_run
    /// use rawhttp::{write_response, HttpServer, ServerConfig, StatusCode};
    ///
    /// let mut server = HttpServer::new(ServerConfig::default());
    /// server.add_handler("GET", "/hello", |_request, out| {
    ///     Box::pin(async move {
    ///         write_response(out, StatusCode::Ok, Some("text/plain"), b"hello").await
    ///     })
    /// });
    /// ```
    pub fn add_handler<F>(&mut self, method: &str, path: &str, handler: F)
    where
        F: for<'a> Fn(&'a Request, &'a mut ResponseStream<'a>) -> HandlerFuture<'a>
            + Send
            + Sync
            + 'static,
    {
        self.routes.insert(method, path, handler);
    }

    /// The handlers registered so far.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Freeze the registered handlers and the static file root into a [`Router`].
    pub fn into_router(self) -> Router {
        Router::new(self.routes, StaticFiles::new(self.config.public_dir))
    }

    /// Display the registered endpoints.
    fn display_server_info(&self) {
        info!("Registered endpoints:");
        for key in self.routes.keys() {
            info!("  {key}");
        }
        info!(
            "Static files from {dir}",
            dir = self.config.public_dir.display()
        );
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Bind the configured address and serve until the process is terminated.
    ///
    /// Only a failure to bind is returned.
    pub async fn start(self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener.
    ///
    /// Never returns: accept errors are logged and the loop carries on. Each
    /// connection runs in its own task but only `config.workers` of them do
    /// work at once; the rest wait for a permit.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        self.display_server_info();

        let workers = Arc::new(Semaphore::new(self.config.workers));
        let router = Arc::new(self.into_router());

        loop {
            match listener.accept().await {
                Ok((socket, addr)) => {
                    Self::handle_new_connection(socket, addr, workers.clone(), router.clone());
                }
                Err(e) => Self::handle_accept_error(e).await,
            }
        }
    }

    /// Hand an accepted connection to the worker pool.
    fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        workers: Arc<Semaphore>,
        router: Arc<Router>,
    ) {
        debug!("Accepted connection from {addr}");

        tokio::spawn(async move {
            // Waits for a free worker; the permit is released when the task ends.
            let Ok(_permit) = workers.acquire_owned().await else {
                return;
            };

            if let Err(e) = Self::handle_connection(&mut socket, &router).await {
                error!("Error handling connection from {addr}: {e}");
            }
            // Dropping the socket closes the connection.
        });
    }

    /// Log an accept failure and back off briefly before the next accept.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Run one request/response cycle on `socket`: parse, route, write.
    ///
    /// A malformed request line ends the cycle with nothing written. The
    /// caller closes the socket afterwards in every case.
    pub async fn handle_connection<S>(socket: &mut S, router: &Router) -> Result<(), Error>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let request = {
            let mut reader = BufReader::new(&mut *socket);
            read_request(&mut reader).await?
        };

        let Some(request) = request else {
            debug!("Malformed request line, closing without a response");
            return Ok(());
        };

        let mut out = BufWriter::new(&mut *socket);
        router.route(&request, &mut out).await?;
        out.flush().await?;

        Ok(())
    }
}

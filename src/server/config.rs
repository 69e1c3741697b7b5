//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 9999;

/// Number of connections handled at the same time.
pub const DEFAULT_WORKERS: usize = 64;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of connections handled concurrently. Connections
    /// accepted beyond this wait for a free worker; none are rejected.
    pub workers: usize,
    /// The directory whitelisted static files are served from.
    pub public_dir: PathBuf,
}

impl ServerConfig {
    /// The default configuration listening on `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            workers: DEFAULT_WORKERS,
            public_dir: PathBuf::from("public"),
        }
    }
}

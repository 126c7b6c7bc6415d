//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

use crate::router::RouterConfig;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            max_connections: 1024,
            read_buffer_size: 8192,
        }
    }
}

impl ServerConfig {
    /// A router configuration whose context pool retains one idle context per
    /// allowed connection.
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            max_idle_contexts: self.max_connections,
            ..RouterConfig::default()
        }
    }
}

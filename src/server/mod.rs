//! Host adapter: a small tokio TCP server that feeds requests to a
//! [`Router`](crate::router::Router).
//!
//! One request is read per connection, parsed with
//! [`parse_request`](crate::parser::parse_request), dispatched, and the
//! response sink is written back before the connection is closed.

mod response;
mod config;
mod error;
mod http_server;
mod tests;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use http_server::HttpServer;

//! A segment-trie HTTP request router.
//!
//! Routes are registered per method as path patterns whose segments are either
//! fixed text or named variables (`:name` or `{name}`). Requests are matched
//! segment by segment with backtracking, preferring whichever sibling was
//! registered first, and the bound parameters are handed to the handler chain
//! through a pooled, reusable [`Context`].
//!
//! # Features
//!
//! - Shared-prefix route trie with per-method forests
//! - Depth-first matching with explicit backtracking, fixed segments before
//!   later-registered variables
//! - Global middlewares, route groups with their own prefix and middlewares
//! - Pooled request contexts: no allocation in the core once warmed up
//! - Route table introspection
//! - A small tokio host adapter ([`HttpServer`]) for serving over TCP
//!
//! # Examples
//!
//! ```
//! use microroute::{Handler, HttpRequest, HttpResponse, Method, Router, StatusCode};
//!
//! let mut router = Router::new();
//! router.get("/users/new", Handler::named("new_user_form", |ctx| {
//!     ctx.response_mut().write_str("form");
//! }));
//! router.get("/users/{id}", Handler::named("show_user", |ctx| {
//!     let id = ctx.param("id").unwrap_or_default().to_string();
//!     ctx.response_mut().write_str(&format!("user {id}"));
//! }));
//!
//! let request = HttpRequest::new(Method::GET, "/users/42");
//! let mut response = HttpResponse::new(StatusCode::Ok);
//! router.serve(&mut response, &request);
//! assert_eq!(response.body, b"user 42");
//!
//! let request = HttpRequest::new(Method::GET, "/users/new");
//! let mut response = HttpResponse::new(StatusCode::Ok);
//! router.serve(&mut response, &request);
//! assert_eq!(response.body, b"form");
//! ```
//!
//! ## Wrapping conventional handlers
//!
//! ```
//! use microroute::{Handler, HttpRequest, HttpResponse, Method, Router, StatusCode};
//!
//! fn ping(writer: &mut HttpResponse, _request: &HttpRequest) {
//!     writer.write_str("pong");
//! }
//!
//! let mut router = Router::new();
//! router.get("/ping", Handler::legacy(ping));
//!
//! let mut response = HttpResponse::new(StatusCode::Ok);
//! router.serve(&mut response, &HttpRequest::new(Method::GET, "/ping"));
//! assert_eq!(response.body, b"pong");
//! ```
//!
//! See `demos/router_server.rs` for a router served over TCP.

// Request model
pub mod parser;

// Routing core
pub mod router;

// Host adapter
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use router::{Context, ContextPool, Handler, Params, RouteEntry, Router, RouterConfig, RouterGroup, split_path};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};

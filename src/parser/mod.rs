//! HTTP request model.
//!
//! The router consumes [`HttpRequest`] values; [`parse_request`] is only used by
//! the host adapter in [`crate::server`] to turn raw bytes into one.

mod request;
mod method;
mod version;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;

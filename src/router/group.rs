//! Path-prefixed route groups.

use log::debug;

use crate::parser::Method;
use crate::router::handler::Handler;
use crate::router::Router;

/// Registers routes under a common prefix, prepending the group's middlewares
/// to every handler chain it adds.
///
/// Groups only rewrite registrations; matching is unaffected.
pub struct RouterGroup<'a> {
    router: &'a mut Router,
    prefix: String,
    middlewares: Vec<Handler>,
}

impl<'a> RouterGroup<'a> {
    pub(crate) fn new(router: &'a mut Router, prefix: &str, middlewares: Vec<Handler>) -> Self {
        let prefix = format!("{}/", prefix.trim_matches('/'));
        debug!("opened route group {prefix}");
        Self {
            router,
            prefix,
            middlewares,
        }
    }

    /// The normalised prefix, always ending in `/`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Append a middleware for routes registered through this group from now on.
    pub fn use_middleware(&mut self, middleware: Handler) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Register `pattern` relative to the group prefix.
    pub fn add_route(&mut self, method: Method, pattern: &str, handlers: Vec<Handler>) -> &mut Self {
        let pattern = self.join(pattern);
        let chain = self.middlewares.iter().cloned().chain(handlers).collect();
        self.router.add_route(method, &pattern, chain);
        self
    }

    /// Open a nested group inheriting this group's prefix and middlewares.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        let prefix = self.join(prefix);
        RouterGroup::new(self.router, &prefix, self.middlewares.clone())
    }

    pub fn get(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::GET, pattern, vec![handler])
    }

    pub fn head(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::HEAD, pattern, vec![handler])
    }

    pub fn post(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::POST, pattern, vec![handler])
    }

    pub fn put(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::PUT, pattern, vec![handler])
    }

    pub fn patch(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::PATCH, pattern, vec![handler])
    }

    pub fn delete(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::DELETE, pattern, vec![handler])
    }

    pub fn options(&mut self, pattern: &str, handler: Handler) -> &mut Self {
        self.add_route(Method::OPTIONS, pattern, vec![handler])
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path.trim_matches('/'))
    }
}

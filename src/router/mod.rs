//! Segment-trie request router.
//!
//! Routes are registered per method as patterns such as `/users/{id}` or
//! `/users/:id/posts`. Patterns sharing a prefix share trie nodes. At request
//! time the path is split into segments and matched depth-first, trying
//! children in registration order, so a fixed segment registered before a
//! variable sibling wins. Matched variables are bound into a pooled
//! [`Context`] which every global middleware and then the route's handler
//! chain receives in turn.

mod context;
mod group;
mod handler;
mod matcher;
mod node;
mod params;
mod split;
mod table;

use log::{debug, info, trace};

use crate::parser::{HttpRequest, Method};
use crate::server::HttpResponse;

use self::matcher::find_path;
use self::node::RouteTree;

// Re-export public items
pub use context::{Context, ContextPool};
pub use group::RouterGroup;
pub use handler::{Handler, HandlerFn};
pub use node::Segment;
pub use params::{Param, Params};
pub use split::split_path;
pub use table::RouteEntry;

/// Router tuning knobs.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Initial capacity of the pooled segment, frame and parameter buffers.
    pub segment_capacity: usize,
    /// Released contexts beyond this many are dropped instead of pooled.
    pub max_idle_contexts: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            segment_capacity: 16,
            max_idle_contexts: 1024,
        }
    }
}

/// The request router.
///
/// Register everything first, then share the router (typically in an `Arc`)
/// with the serving threads. Serving takes `&self` and only touches the
/// context pool.
pub struct Router {
    tree: RouteTree,
    middlewares: Vec<Handler>,
    not_found: Handler,
    pool: ContextPool,
}

impl Router {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            tree: RouteTree::new(),
            middlewares: Vec::new(),
            not_found: Handler::named("not_found", handler::not_found),
            pool: ContextPool::new(config.segment_capacity, config.max_idle_contexts),
        }
    }

    /// Append a global middleware. Middlewares run on every matched request,
    /// in registration order, before the route's own handlers.
    pub fn use_middleware(&mut self, middleware: Handler) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Replace the handler invoked when no route matches.
    pub fn set_not_found(&mut self, handler: Handler) -> &mut Self {
        self.not_found = handler;
        self
    }

    /// Register `handlers` for `method` requests matching `pattern`.
    ///
    /// Never rejects a pattern: overlapping patterns coexist and are told apart
    /// at match time, and registering the same pattern twice appends to its
    /// handler chain.
    pub fn add_route(&mut self, method: Method, pattern: &str, handlers: Vec<Handler>) -> &mut Self {
        let segments = split_path(pattern).into_iter().map(Segment::parse).collect();
        debug!("registered route {method} {pattern} ({} handlers)", handlers.len());
        self.tree.insert(method, segments, handlers);
        self
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

    /// Open a route group under `prefix`.
    pub fn group(&mut self, prefix: &str) -> RouterGroup<'_> {
        RouterGroup::new(self, prefix, Vec::new())
    }

    /// Dispatch one request, writing into `response`.
    ///
    /// Unmatched requests, and requests whose matched node carries no
    /// handlers, go to the not-found handler; no middleware runs for them.
    pub fn serve(&self, response: &mut HttpResponse, request: &HttpRequest) {
        let mut ctx = self.pool.acquire(request, response);

        let Some(roots) = self.tree.roots(request.method) else {
            trace!("no routes for {}, dispatching not found", request.method);
            self.not_found.call(&mut ctx);
            return;
        };

        let path = request.route_path();
        let scratch = &mut ctx.scratch;
        split::split_bounds(path, &mut scratch.segments);
        let matched = find_path(&self.tree, roots, path, &scratch.segments, &mut scratch.frames);

        let terminal = match scratch.frames.last() {
            Some(frame) if matched && self.tree.node(frame.node).is_terminal() => self.tree.node(frame.node),
            _ => {
                trace!("no route for {} {path}, dispatching not found", request.method);
                self.not_found.call(&mut ctx);
                return;
            }
        };

        for (frame, bounds) in scratch.frames.iter().zip(&scratch.segments) {
            if let Segment::Variable(name) = &self.tree.node(frame.node).segment {
                scratch.params.set(name, &path[bounds.clone()]);
            }
        }

        for middleware in &self.middlewares {
            middleware.call(&mut ctx);
        }
        for handler in &terminal.handlers {
            handler.call(&mut ctx);
        }
    }

    /// The registered routes, sorted by path and then by method.
    pub fn routes(&self) -> Vec<RouteEntry> {
        table::collect(&self.tree)
    }

    /// Log the route table at `info` level.
    pub fn print_routes(&self) {
        info!("Registered routes:");
        for route in self.routes() {
            info!("  {route}");
        }
    }

    /// The pool contexts are drawn from.
    pub fn pool(&self) -> &ContextPool {
        &self.pool
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

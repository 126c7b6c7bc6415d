//! Per-request context and the pool that recycles its buffers.

use std::ops::Range;

use parking_lot::Mutex;

use crate::parser::HttpRequest;
use crate::router::matcher::Frame;
use crate::router::params::Params;
use crate::server::HttpResponse;

/// Reusable per-request buffers.
#[derive(Default)]
pub(crate) struct Scratch {
    pub(crate) params: Params,
    pub(crate) segments: Vec<Range<usize>>,
    pub(crate) frames: Vec<Frame>,
}

impl Scratch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            params: Params::with_capacity(capacity),
            segments: Vec::with_capacity(capacity),
            frames: Vec::with_capacity(capacity),
        }
    }

    fn reset(&mut self) {
        self.params.reset();
        self.segments.clear();
        self.frames.clear();
    }
}

/// State handed to every handler while one request is dispatched.
///
/// A `Context` borrows the request and the response sink, and owns buffers
/// taken from a [`ContextPool`]. Dropping it hands the buffers back, which also
/// happens while a panicking handler unwinds, so every acquire is released
/// exactly once.
pub struct Context<'r> {
    pub(crate) scratch: Scratch,
    request: &'r HttpRequest,
    response: &'r mut HttpResponse,
    pool: &'r ContextPool,
}

impl<'r> Context<'r> {
    /// Bound path parameters, in root-to-leaf order.
    pub fn params(&self) -> &Params {
        &self.scratch.params
    }

    /// Shorthand for `ctx.params().get(name)`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.scratch.params.get(name)
    }

    pub fn request(&self) -> &HttpRequest {
        self.request
    }

    pub fn response(&self) -> &HttpResponse {
        &*self.response
    }

    pub fn response_mut(&mut self) -> &mut HttpResponse {
        &mut *self.response
    }

    /// The response sink and the request, in the order conventional
    /// `(writer, request)` handlers take them.
    pub fn parts(&mut self) -> (&mut HttpResponse, &HttpRequest) {
        (&mut *self.response, self.request)
    }
}

impl Drop for Context<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.scratch));
    }
}

/// Concurrency-safe pool of context buffers.
///
/// The pool grows on demand; at most `max_idle` released buffers are retained.
pub struct ContextPool {
    idle: Mutex<Vec<Scratch>>,
    capacity: usize,
    max_idle: usize,
}

impl ContextPool {
    /// Create a pool whose fresh buffers can hold `capacity` segments.
    pub fn new(capacity: usize, max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            capacity,
            max_idle,
        }
    }

    /// Take a context for one request. Never fails.
    ///
    /// The parameter buffer is empty on return, whatever the previous request
    /// bound into it.
    pub fn acquire<'r>(&'r self, request: &'r HttpRequest, response: &'r mut HttpResponse) -> Context<'r> {
        let recycled = self.idle.lock().pop();
        let mut scratch = recycled.unwrap_or_else(|| Scratch::with_capacity(self.capacity));
        scratch.reset();

        Context {
            scratch,
            request,
            response,
            pool: self,
        }
    }

    fn release(&self, scratch: Scratch) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(scratch);
        }
    }

    /// Number of released contexts waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }
}

impl Default for ContextPool {
    fn default() -> Self {
        let config = crate::router::RouterConfig::default();
        Self::new(config.segment_capacity, config.max_idle_contexts)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::parser::Method;
    use crate::server::StatusCode;

    #[test]
    fn test_drop_returns_context_to_pool() {
        let pool = ContextPool::default();
        let request = HttpRequest::new(Method::GET, "/");
        let mut response = HttpResponse::new(StatusCode::Ok);

        {
            let mut ctx = pool.acquire(&request, &mut response);
            ctx.scratch.params.set("id", "7");
            assert_eq!(pool.idle(), 0);
        }
        assert_eq!(pool.idle(), 1);

        let ctx = pool.acquire(&request, &mut response);
        assert!(ctx.params().is_empty(), "recycled params must be cleared");
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_released_during_unwind() {
        let pool = ContextPool::default();
        let request = HttpRequest::new(Method::GET, "/");
        let mut response = HttpResponse::new(StatusCode::Ok);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ctx = pool.acquire(&request, &mut response);
            panic!("handler failed");
        }));

        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_idle_contexts_are_capped() {
        let pool = ContextPool::new(4, 1);
        let request = HttpRequest::new(Method::GET, "/");
        let mut first = HttpResponse::new(StatusCode::Ok);
        let mut second = HttpResponse::new(StatusCode::Ok);

        let a = pool.acquire(&request, &mut first);
        let b = pool.acquire(&request, &mut second);
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_parts_expose_request_and_response() {
        let pool = ContextPool::default();
        let request = HttpRequest::new(Method::PUT, "/items/3");
        let mut response = HttpResponse::new(StatusCode::Ok);

        let mut ctx = pool.acquire(&request, &mut response);
        let (writer, req) = ctx.parts();
        writer.set_status(StatusCode::Accepted);
        assert_eq!(req.method, Method::PUT);
        assert_eq!(ctx.response().status, StatusCode::Accepted);
        assert_eq!(ctx.request().path, "/items/3");
    }
}

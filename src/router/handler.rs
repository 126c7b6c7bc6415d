//! Request handlers.

use std::any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::router::context::Context;
use crate::server::{HttpResponse, StatusCode};

/// Type alias for the function a [`Handler`] wraps.
pub type HandlerFn = Arc<dyn Fn(&mut Context<'_>) + Send + Sync>;

/// A named unit of request-handling logic.
///
/// Handlers run for their side effects on the [`Context`]: reading the request
/// and params, writing the response. The name is only used by the route table.
#[derive(Clone)]
pub struct Handler {
    name: Cow<'static, str>,
    func: HandlerFn,
}

impl Handler {
    /// Wrap `f`, naming the handler after its type.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>) + Send + Sync + 'static,
    {
        Self::named(any::type_name::<F>(), f)
    }

    /// Wrap `f` under an explicit display name.
    pub fn named<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&mut Context<'_>) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(f),
        }
    }

    /// Adapt a handler written against the conventional `(writer, request)`
    /// shape.
    pub fn legacy<F>(f: F) -> Self
    where
        F: Fn(&mut HttpResponse, &HttpRequest) + Send + Sync + 'static,
    {
        Self {
            name: any::type_name::<F>().into(),
            func: Arc::new(move |ctx: &mut Context<'_>| {
                let (writer, request) = ctx.parts();
                f(writer, request)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, ctx: &mut Context<'_>) {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.name).finish()
    }
}

/// Default fallback for requests that match no route.
pub(crate) fn not_found(ctx: &mut Context<'_>) {
    ctx.response_mut()
        .set_status(StatusCode::NotFound)
        .set_header("Content-Type", "text/plain")
        .write_str("404 page not found");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Method;
    use crate::router::ContextPool;

    fn legacy_echo(writer: &mut HttpResponse, request: &HttpRequest) {
        writer.write_str(&request.path);
    }

    #[test]
    fn test_names() {
        let explicit = Handler::named("list_users", |_| {});
        assert_eq!(explicit.name(), "list_users");

        let legacy = Handler::legacy(legacy_echo);
        assert!(legacy.name().ends_with("legacy_echo"), "got {}", legacy.name());
        assert_eq!(format!("{explicit:?}"), "Handler(\"list_users\")");
    }

    #[test]
    fn test_legacy_handler_sees_context_parts() {
        let pool = ContextPool::default();
        let request = HttpRequest::new(Method::GET, "/ping");
        let mut response = HttpResponse::new(StatusCode::Ok);

        {
            let mut ctx = pool.acquire(&request, &mut response);
            Handler::legacy(legacy_echo).call(&mut ctx);
        }
        assert_eq!(response.body, b"/ping".to_vec());
    }

    #[test]
    fn test_default_not_found() {
        let pool = ContextPool::default();
        let request = HttpRequest::new(Method::GET, "/nowhere");
        let mut response = HttpResponse::new(StatusCode::Ok);

        not_found(&mut pool.acquire(&request, &mut response));
        assert_eq!(response.status, StatusCode::NotFound);
        assert_eq!(response.body, b"404 page not found".to_vec());
    }
}

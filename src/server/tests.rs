//! Tests for the host adapter.

#[cfg(test)]
mod server_tests {
    use std::io::{self, Cursor};
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use crate::router::{Handler, Router};
    use crate::server::{HttpServer, ServerConfig, HttpResponse, StatusCode, Error};

    // In-memory stand-in for a TcpStream
    struct MockTcpStream {
        read_data: Cursor<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(read_data: &[u8]) -> Self {
            Self {
                read_data: Cursor::new(read_data.to_vec()),
                write_data: Vec::new(),
            }
        }

        fn written(&self) -> String {
            String::from_utf8_lossy(&self.write_data).into_owned()
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
            buf.advance(n);
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.get_mut().write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn test_router() -> Router {
        let mut router = Router::new();
        router
            .get("/users/{id}", Handler::named("show_user", |ctx| {
                let id = ctx.param("id").unwrap_or_default().to_string();
                ctx.response_mut()
                    .set_header("Content-Type", "text/plain")
                    .write_str(&format!("user {id}"));
            }))
            .post("/users", Handler::named("create_user", |ctx| {
                #[derive(serde::Deserialize, serde::Serialize)]
                struct User {
                    name: String,
                }
                let created = ctx.request().json::<User>();
                let response = ctx.response_mut();
                match created {
                    Ok(user) => {
                        response.set_status(StatusCode::Created);
                        let _ = response.set_json(&user);
                    }
                    Err(_) => {
                        response.set_status(StatusCode::BadRequest);
                    }
                }
            }))
            .get("/boom", Handler::named("boom", |_| panic!("kaboom")));
        router
    }

    async fn run(router: &Router, raw: &[u8]) -> (Result<(), Error>, String) {
        let mut stream = MockTcpStream::new(raw);
        let result = HttpServer::handle_connection(&mut stream, router, 1024).await;
        (result, stream.written())
    }

    #[tokio::test]
    async fn test_server_creation() {
        let config = ServerConfig {
            addr: "127.0.0.1:9090".parse().unwrap(),
            max_connections: 16,
            read_buffer_size: 4096,
        };

        let server = HttpServer::new(config.clone(), test_router());
        assert_eq!(server.config.addr, config.addr);
        assert_eq!(server.config.max_connections, 16);
        assert_eq!(server.router.routes().len(), 3);
        assert_eq!(config.router_config().max_idle_contexts, 16);
    }

    #[tokio::test]
    async fn test_routes_with_params() {
        let router = test_router();
        let (result, response) = run(&router, b"GET /users/42 HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

        assert!(result.is_ok());
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.ends_with("user 42"));
    }

    #[tokio::test]
    async fn test_json_body_round_trip() {
        let router = test_router();
        let raw = b"POST /users HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\n\r\n{\"name\":\"grace\"}";
        let (result, response) = run(&router, raw).await;

        assert!(result.is_ok());
        assert!(response.starts_with("HTTP/1.1 201 Created\r\n"));
        assert!(response.contains("Content-Type: application/json\r\n"));
        assert!(response.ends_with("{\"name\":\"grace\"}"));
    }

    #[tokio::test]
    async fn test_not_found_is_not_an_error() {
        let router = test_router();
        let (result, response) = run(&router, b"GET /nonexistent HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

        assert!(result.is_ok());
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.ends_with("404 page not found"));
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let router = test_router();
        let (result, response) = run(&router, b"INVALID REQUEST").await;

        assert!(matches!(result, Err(Error::ParseError(_))));
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.contains("Error parsing request:"));
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_500() {
        let router = test_router();
        let (result, response) = run(&router, b"GET /boom HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

        assert!(matches!(result, Err(Error::HandlerPanicked(ref m)) if m == "kaboom"));
        assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert_eq!(router.pool().idle(), 1);
    }

    #[tokio::test]
    async fn test_closed_connection() {
        let router = test_router();
        let (result, response) = run(&router, b"").await;
        assert!(result.is_ok());
        assert!(response.is_empty());
    }

    #[test]
    fn test_response_sink_keeps_content_length() {
        let mut response = HttpResponse::new(StatusCode::Ok);
        response.write_str("abc").write(b"de");
        assert_eq!(response.headers.get("Content-Length").unwrap(), "5");

        let replaced = response.with_body("x");
        assert_eq!(replaced.body, b"x".to_vec());
        assert_eq!(replaced.headers.get("Content-Length").unwrap(), "1");
        assert_eq!(StatusCode::NotFound.code(), 404);
    }
}

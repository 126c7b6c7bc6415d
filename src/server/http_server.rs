//! HTTP server implementation.

use std::any::Any;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::signal;
use log::{debug, info, warn, error};

use crate::parser::parse_request;
use crate::router::Router;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server dispatching every request through a [`Router`].
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The router; registration must be complete before the server starts.
    pub router: Arc<Router>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and router.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Spawn a task for an accepted connection, or turn it away when the
    /// connection limit is reached.
    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        router: Arc<Router>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        tasks.spawn(async move {
            // Released when the task completes
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &router, read_buffer_size).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Wait for in-flight connections, for at most 30 seconds.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        self.router.print_routes();

        let listener = self.setup_listener().await?;
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);

        let mut tasks = JoinSet::new();
        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.router.clone(),
                                self.config.read_buffer_size,
                                &mut tasks,
                            ).await;
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                            error!("Critical error accepting connection, shutting down: {e}");
                            break;
                        }
                        Err(e) => {
                            error!("Error accepting connection: {e}");
                            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request from `socket`, dispatch it, and write the response.
    ///
    /// A malformed request is answered with 400 and a panicking handler with
    /// 500; both are also returned as errors for the caller to log.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&buf[..n]) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::new(StatusCode::BadRequest)
                    .with_content_type("text/plain")
                    .with_body(format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };
        debug!("{} {}", request.method, request.path);

        let mut response = HttpResponse::new(StatusCode::Ok);
        let dispatched = panic::catch_unwind(AssertUnwindSafe(|| router.serve(&mut response, &request)));

        if let Err(payload) = dispatched {
            let message = panic_message(payload.as_ref());
            let response = HttpResponse::new(StatusCode::InternalServerError)
                .with_content_type("text/plain")
                .with_body("Internal server error");
            socket.write_all(&response.to_bytes()).await?;
            return Err(Error::HandlerPanicked(message));
        }

        socket.write_all(&response.to_bytes()).await?;
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

//! Serves a small router over TCP on 127.0.0.1:8080.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use microroute::{Handler, HttpServer, Router, ServerConfig, StatusCode};
use serde::Serialize;

#[derive(Serialize)]
struct Record {
    realm: String,
    storage: String,
    id: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::default();
    let mut router = Router::with_config(config.router_config());

    let served = Arc::new(AtomicU64::new(0));
    router.use_middleware(Handler::named("request_counter", move |ctx| {
        let n = served.fetch_add(1, Ordering::Relaxed) + 1;
        ctx.response_mut().set_header("X-Request-Count", n.to_string());
    }));

    router.get("/", Handler::named("index", |ctx| {
        ctx.response_mut()
            .set_header("Content-Type", "text/html")
            .write_str("<html><body><h1>microroute-rs</h1></body></html>");
    }));

    {
        let mut records = router.group("/storage/v1/{realm}/{storage}");
        records.use_middleware(Handler::named("require_host", |ctx| {
            if !ctx.request().has_header("Host") {
                ctx.response_mut().set_status(StatusCode::BadRequest);
            }
        }));
        records.get("/records/{id}", Handler::named("get_record", |ctx| {
            let record = Record {
                realm: ctx.param("realm").unwrap_or_default().to_string(),
                storage: ctx.param("storage").unwrap_or_default().to_string(),
                id: ctx.param("id").unwrap_or_default().to_string(),
            };
            let encoded = ctx.response_mut().set_json(&record).map(|_| ());
            if let Err(e) = encoded {
                log::error!("failed to encode record: {e}");
                ctx.response_mut().set_status(StatusCode::InternalServerError);
            }
        }));
        records.delete("/records/{id}", Handler::named("delete_record", |ctx| {
            ctx.response_mut().set_status(StatusCode::NoContent);
        }));
    }

    let server = HttpServer::new(config, router);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;

    Ok(())
}

use std::sync::Arc;

use hearth::config::Config;
use hearth::http::request::{Method, Request};
use hearth::http::response::{Response, StatusCode};
use hearth::router::{PathParams, Router, shared};
use hearth::server;

async fn home(_req: Request, _params: PathParams) -> anyhow::Result<Response> {
    Ok(Response::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .body("<html><body><b>hearth</b></body></html>")
        .build())
}

async fn welcome(_req: Request, params: PathParams) -> anyhow::Result<String> {
    Ok(format!("Welcome {}", params.get("name").unwrap_or_default()))
}

async fn login(req: Request, _params: PathParams) -> anyhow::Result<String> {
    match req.method {
        Some(Method::POST) => {
            let name = req.form("name").unwrap_or_default();
            let password = req.form("password").unwrap_or_default();
            Ok(format!("{name}:{password}"))
        }
        _ => Ok("form".to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log.level()?)
        .init();

    let mut router = Router::new();
    router.add_routes([
        ("/welcome/{name}", shared(welcome)),
        ("/", shared(home)),
        ("/login", shared(login)),
    ])?;
    let router = Arc::new(router);

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

mod calc;
mod client;
mod config;
mod cors;
mod errors;
mod estimate;
mod handlers;
mod models;
mod validation;

use anyhow::Context;
use axum::routing::{Router, get, post};
use config::Config;
use reqwest::Client;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// configuration and http client shared with every handler;
// the client is shared so connections are pooled across requests
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: Client
}

pub fn app(state: AppState) -> Router {

    let router = Router::new()
        .route("/", get(handlers::health_check))
        .route("/calculate", post(handlers::calculate))
        .with_state(state);

    cors::with_cors(router)

}

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, /calculate will fail until it is");
    }

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();

    let state = AppState {
        config,
        http_client: Client::new()
    };

    let listener = TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("API listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())

}

async fn shutdown_signal() {

    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutting down");

}

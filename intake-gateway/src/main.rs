//! Entry point for the `intake-gateway` HTTP server.

use std::sync::Arc;

use intake_gateway::{config::GatewayConfig, routes::create_router};
use intake_store::{FsSubmissionStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match FsSubmissionStore::open(StoreConfig::new(&config.submissions_root)).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open submissions root");
            std::process::exit(1);
        }
    };

    let app = create_router(Arc::new(store), &config);

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        root = %config.submissions_root.display(),
        "intake-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

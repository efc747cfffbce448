//! RootPilot Server: application entry point.

use anyhow::Context;
use rootpilot_db::MemStore;
use rootpilot_server::{AppState, ServerConfig, router};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "rootpilot=info,tower_http=info";

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_json);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting RootPilot server...");
    if config.uses_development_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development signing secret");
    }

    let store = MemStore::new();
    let bind_addr = config.bind_addr;
    let app = router(AppState::new(store.clone(), config));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    store.shutdown();
    tracing::info!("RootPilot server stopped.");
    Ok(())
}

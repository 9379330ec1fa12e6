//! Storefront shipping server.

use anyhow::Context;
use std::sync::Arc;
use storefront_shipping::api::rest::{AppState, create_router};
use storefront_shipping::config::AppConfig;
use storefront_shipping::infrastructure::logging::init_logging;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("loading configuration")?;
    init_logging(config.log_format).context("installing log subscriber")?;

    let state = AppState::from_config(&config).context("building application state")?;
    if !state.integrations.shipping {
        tracing::warn!("SHIPSTATION_API_KEY/SECRET not set; rate requests will fail");
    }
    tracing::info!(
        carriers = ?config.shipping.carriers,
        origin = %config.shipping.origin,
        "shipping configured"
    );

    let router = create_router(Arc::new(state));
    let listener = TcpListener::bind(config.server_addr)
        .await
        .with_context(|| format!("binding {}", config.server_addr))?;
    tracing::info!(addr = %config.server_addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received");
}

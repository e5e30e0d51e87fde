//! Account Directory Gateway binary.
//!
//! Loads configuration, connects the platform client and serves the
//! gateway routers.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use account_gateway::config::Config;
use account_gateway::openapi::openapi_router;
use account_gateway::platform::{DocumentPlatform, RestPlatform};
use account_gateway::{purchase_orders_router, users_router, GatewayState};

#[tokio::main]
async fn main() {
    // Fail fast on missing or invalid configuration.
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        platform = %config.platform.base_url,
        "Starting account gateway"
    );

    let platform: Arc<dyn DocumentPlatform> = match RestPlatform::new(&config.platform) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let state = GatewayState::new(platform);

    let app = Router::new()
        .nest("/users", users_router(state.clone()))
        .nest("/purchase-orders", purchase_orders_router(state))
        .merge(openapi_router())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Error: server exited: {e}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

use api_service::config::ApiConfig;
use api_service::db::{MongoHandle, MongoOptions};
use api_service::startup::{build_router, AppState};
use dotenvy::dotenv;
use service_core::config::Environment;
use service_core::observability::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let environment = Environment::from_env();
    init_tracing("api-service", "info", environment);

    let config = ApiConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    // Connect to the database when a connection string is configured;
    // a connection failure here is fatal.
    let db = MongoHandle::connect(
        &config.mongo.uri,
        config.mongo.client_options(),
        MongoOptions::default(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to connect to MongoDB: {}", e);
        anyhow::anyhow!("Database connection error: {}", e)
    })?;

    let app = build_router(AppState { db }, &config.cors_origin);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Backend server listening on port {}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    info!("Server stopped");
    Ok(())
}

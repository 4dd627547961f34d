//! Standalone MongoDB connectivity check.
//!
//! Usage: set `MONGO_URI` in the environment or a `.env` file, then
//! `cargo run --bin mongo-ping`. Exits 1 when the ping fails.

use api_service::config::ApiConfig;
use api_service::db::{MongoHandle, MongoOptions};
use dotenvy::dotenv;
use service_core::config::Environment;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing("mongo-ping", "info", Environment::from_env());

    let config = match ApiConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };

    if config.mongo.uri.is_empty() {
        tracing::error!("Please set MONGO_URI in your environment or a .env file");
        std::process::exit(1);
    }

    // One-shot check: a single connection, pinging the admin database.
    let overrides = MongoOptions {
        db_name: Some("admin".to_string()),
        max_pool_size: Some(1),
    };

    match MongoHandle::connect(&config.mongo.uri, config.mongo.client_options(), overrides).await {
        Ok(_) => tracing::info!("Ping succeeded - connected to MongoDB"),
        Err(err) => {
            tracing::error!("MongoDB connection failed: {}", err);
            std::process::exit(1);
        }
    }
}

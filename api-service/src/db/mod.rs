use mongodb::{bson::doc, options::ClientOptions, Client as MongoClient, Database};
use serde::{Serialize, Serializer};
use service_core::error::AppError;

/// Connection phase as reported by `/api/health`. Serialized as an integer
/// code (0..=3) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
}

impl ReadyState {
    pub fn code(self) -> u8 {
        match self {
            ReadyState::Disconnected => 0,
            ReadyState::Connected => 1,
            ReadyState::Connecting => 2,
            ReadyState::Disconnecting => 3,
        }
    }
}

impl Serialize for ReadyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Optional connector settings. Defaults come from the environment
/// ([`crate::config::MongoConfig::client_options`]); caller values win on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MongoOptions {
    pub db_name: Option<String>,
    pub max_pool_size: Option<u32>,
}

impl MongoOptions {
    pub fn merge(mut self, overrides: MongoOptions) -> MongoOptions {
        if overrides.db_name.is_some() {
            self.db_name = overrides.db_name;
        }
        if overrides.max_pool_size.is_some() {
            self.max_pool_size = overrides.max_pool_size;
        }
        self
    }
}

#[derive(Clone)]
pub struct MongoHandle {
    client: MongoClient,
    db: Database,
}

impl MongoHandle {
    /// Opens a pooled connection. An empty `uri` means "database disabled"
    /// and yields `Ok(None)` without an attempt. Otherwise a single attempt
    /// is made with `overrides` merged over `defaults` (caller wins): parse
    /// the connection string, apply the merged options and ping the server
    /// so a bad endpoint fails here instead of on the first request. No
    /// retry.
    pub async fn connect(
        uri: &str,
        defaults: MongoOptions,
        overrides: MongoOptions,
    ) -> Result<Option<Self>, AppError> {
        if uri.is_empty() {
            tracing::warn!("No MONGO_URI provided - skipping database connection");
            return Ok(None);
        }

        let client_options = resolve_client_options(uri, defaults.merge(overrides)).await?;

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database("test"));

        // The client connects lazily; ping now for fail-fast startup.
        db.run_command(doc! { "ping": 1 }, None).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        tracing::info!(database = %db.name(), "Connected to MongoDB");
        Ok(Some(Self { client, db }))
    }

    /// Live connectivity probe behind the health endpoint's `dbState` field.
    pub async fn ready_state(&self) -> ReadyState {
        match self
            .client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
        {
            Ok(_) => ReadyState::Connected,
            Err(err) => {
                tracing::warn!(error = %err, "MongoDB ping failed");
                ReadyState::Disconnected
            }
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

async fn resolve_client_options(
    uri: &str,
    options: MongoOptions,
) -> Result<ClientOptions, AppError> {
    let mut client_options = ClientOptions::parse(uri).await.map_err(|e| {
        tracing::error!("Failed to connect to MongoDB: {}", e);
        AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
    })?;
    client_options.max_pool_size = options.max_pool_size;
    if options.db_name.is_some() {
        client_options.default_database = options.db_name;
    }
    Ok(client_options)
}

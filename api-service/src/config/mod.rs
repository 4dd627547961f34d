use crate::db::MongoOptions;
use service_core::config::{get_env, get_env_parsed};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub mongo: MongoConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string. Empty means the database is disabled.
    pub uri: String,
    pub db_name: Option<String>,
    pub max_pool_size: u32,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Ok(ApiConfig {
            port: get_env_parsed("PORT", 5000),
            cors_origin: get_env("CORS_ORIGIN", Some("*"))?,
            mongo: MongoConfig {
                uri: get_env("MONGO_URI", Some(""))?,
                db_name: env::var("MONGO_DB_NAME").ok().filter(|v| !v.is_empty()),
                max_pool_size: get_env_parsed("MONGO_MAX_POOL_SIZE", 10),
            },
        })
    }
}

impl MongoConfig {
    /// Environment-derived connector defaults; `MongoHandle::connect` merges
    /// caller overrides on top.
    pub fn client_options(&self) -> MongoOptions {
        MongoOptions {
            db_name: self.db_name.clone(),
            max_pool_size: Some(self.max_pool_size),
        }
    }
}

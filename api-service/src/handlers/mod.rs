use crate::db::ReadyState;
use crate::startup::AppState;
use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
    #[serde(rename = "dbState")]
    pub db_state: Option<ReadyState>,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_state = match &state.db {
        Some(db) => Some(db.ready_state().await),
        None => None,
    };

    Json(HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        db_state,
    })
}

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from backend",
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}

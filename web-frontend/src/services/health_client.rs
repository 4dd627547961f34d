use axum::http::StatusCode;
use serde::Deserialize;
use service_core::error::AppError;
use thiserror::Error;

/// The backend's health payload, as rendered into the status line.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthSnapshot {
    pub status: String,
    pub time: String,
    #[serde(rename = "dbState", default)]
    pub db_state: Option<i32>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Status(StatusCode),
    #[error("{0}")]
    Transport(String),
}

/// One-shot client for `GET {base_url}/health`.
#[derive(Clone)]
pub struct HealthClient {
    http: reqwest::Client,
    base_url: String,
}

impl HealthClient {
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
        Ok(Self { http, base_url })
    }

    pub async fn fetch_health(&self) -> Result<HealthSnapshot, FetchError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| FetchError::Transport(root_message(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response
            .json::<HealthSnapshot>()
            .await
            .map_err(|e| FetchError::Transport(root_message(&e)))
    }

    /// Fetches the backend health and renders it for display. Every failure
    /// becomes inline text; nothing is retried.
    pub async fn status_line(&self) -> String {
        render_status(self.fetch_health().await)
    }
}

pub fn render_status(result: Result<HealthSnapshot, FetchError>) -> String {
    match result {
        Ok(health) => format!("Backend: {} (time: {})", health.status, health.time),
        Err(FetchError::Status(status)) => format!(
            "Backend error: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
        Err(FetchError::Transport(message)) => {
            format!("Backend not available — {}", message)
        }
    }
}

// reqwest errors wrap the interesting cause (connect refused, bad JSON)
// in transport noise; dig out the innermost message for display.
fn root_message(err: &reqwest::Error) -> String {
    let mut source: &dyn std::error::Error = err;
    while let Some(inner) = source.source() {
        source = inner;
    }
    source.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_renders_status_and_time() {
        let snapshot = HealthSnapshot {
            status: "ok".to_string(),
            time: "2024-01-01T00:00:00Z".to_string(),
            db_state: None,
        };
        assert_eq!(
            render_status(Ok(snapshot)),
            "Backend: ok (time: 2024-01-01T00:00:00Z)"
        );
    }

    #[test]
    fn http_failure_renders_code_and_reason() {
        assert_eq!(
            render_status(Err(FetchError::Status(StatusCode::SERVICE_UNAVAILABLE))),
            "Backend error: 503 Service Unavailable"
        );
    }

    #[test]
    fn transport_failure_renders_the_message() {
        assert_eq!(
            render_status(Err(FetchError::Transport("Failed to fetch".to_string()))),
            "Backend not available — Failed to fetch"
        );
    }
}

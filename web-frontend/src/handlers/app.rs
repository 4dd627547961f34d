use crate::startup::FrontendState;
use askama::Template;
use axum::extract::State;
use axum::http::{header, HeaderMap, Uri};
use axum::response::IntoResponse;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub status_line: String,
    pub page_url: String,
    pub api_base: String,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        IndexTemplate {
            status_line: "Loading...".to_string(),
            page_url: String::new(),
            api_base: String::new(),
        }
    }
}

pub async fn index(
    State(state): State<FrontendState>,
    headers: HeaderMap,
    uri: Uri,
) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    // Honor the scheme set by a TLS-terminating proxy.
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("http");

    IndexTemplate {
        status_line: state.health.status_line().await,
        page_url: format!("{}://{}{}", scheme, host, uri),
        api_base: state.api_base.clone(),
    }
}

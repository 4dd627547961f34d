use crate::db::MongoHandle;
use crate::handlers::{health, hello, not_found};
use axum::http::{header, HeaderValue, Method};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared request context; the database handle is injected here at startup
/// instead of living in a module-wide singleton.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<MongoHandle>,
}

pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/hello", get(hello))
        .fallback(not_found)
        .with_state(state)
        // Add CORS layer (short-circuits pre-flight requests)
        .layer(build_cors_layer(cors_origin))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        // Add security headers middleware
        .layer(from_fn(security_headers_middleware))
}

fn build_cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    layer.allow_origin(
        origins
            .split(',')
            .filter_map(|origin| {
                let origin = origin.trim();
                match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::error!("Invalid CORS origin '{}': {}. Ignoring.", origin, e);
                        None
                    }
                }
            })
            .collect::<Vec<HeaderValue>>(),
    )
}

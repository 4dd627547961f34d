use crate::config::FrontendConfig;
use crate::handlers::index;
use crate::proxy::{proxy_api, ApiProxy};
use crate::services::HealthClient;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct FrontendState {
    pub health: HealthClient,
    pub proxy: Option<ApiProxy>,
    pub api_base: String,
}

impl FrontendState {
    pub fn new(config: &FrontendConfig) -> Result<Self, AppError> {
        let proxy = if config.proxy_enabled() {
            Some(ApiProxy::new(&config.proxy_target)?)
        } else {
            None
        };

        Ok(FrontendState {
            health: HealthClient::new(config.health_base())?,
            proxy,
            api_base: config.api_base.clone(),
        })
    }
}

pub fn build_router(state: FrontendState) -> Router {
    let mut router = Router::new().route("/", get(index));

    // Dev-only /api forwarding; production never mounts these routes.
    if state.proxy.is_some() {
        router = router
            .route("/api", any(proxy_api))
            .route("/api/*path", any(proxy_api));
    }

    router
        .with_state(state)
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
}

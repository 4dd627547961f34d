use crate::startup::FrontendState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use service_core::error::AppError;

const MAX_PROXIED_BODY: usize = 10 * 1024 * 1024;

// Hop-by-hop headers never forwarded by a proxy (RFC 9110 §7.6.1).
const HOP_BY_HOP: [header::HeaderName; 5] = [
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Development-only `/api` forwarder to the backend origin, so the page can
/// call the API same-origin during local development. Rewrites the origin
/// header to the target and skips certificate validation.
#[derive(Clone)]
pub struct ApiProxy {
    http: reqwest::Client,
    target: String,
}

impl ApiProxy {
    pub fn new(target: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
        Ok(Self {
            http,
            target: target.trim_end_matches('/').to_string(),
        })
    }

    pub async fn forward(&self, req: Request) -> Result<Response, AppError> {
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();
        let url = format!("{}{}", self.target, path_and_query);

        let method = req.method().clone();
        let request_headers = outbound_headers(req.headers(), &self.target);

        let body = axum::body::to_bytes(req.into_body(), MAX_PROXIED_BODY)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

        let upstream = self
            .http
            .request(method, &url)
            .headers(request_headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Proxy request failed");
                AppError::BadGateway(e.to_string())
            })?;

        let status = upstream.status();
        let mut response_headers = upstream.headers().clone();
        for name in HOP_BY_HOP {
            response_headers.remove(&name);
        }

        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| AppError::BadGateway(e.to_string()))?;

        let mut response = Response::builder()
            .status(status)
            .body(Body::from(bytes))
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

fn outbound_headers(headers: &HeaderMap, target: &str) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP {
        out.remove(&name);
    }
    // reqwest derives Host from the target URL
    out.remove(header::HOST);
    if out.contains_key(header::ORIGIN) {
        if let Ok(value) = HeaderValue::from_str(target) {
            out.insert(header::ORIGIN, value);
        }
    }
    out
}

pub async fn proxy_api(
    State(state): State<FrontendState>,
    req: Request,
) -> Result<Response, AppError> {
    match &state.proxy {
        Some(proxy) => proxy.forward(req).await,
        None => Err(AppError::NotFound(anyhow::anyhow!("Not found"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_rewritten_to_the_target() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"));
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

        let out = outbound_headers(&headers, "http://localhost:5000");
        assert_eq!(out.get(header::ORIGIN).unwrap(), "http://localhost:5000");
        assert!(!out.contains_key(header::HOST));
        assert!(!out.contains_key(header::CONNECTION));
    }
}

//! `/api/*` forwarder to the upstream MIS API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to `/api` on this host so the bundle needs no CORS setup
//! or upstream URL. Method, query, body and the auth/content headers go
//! upstream unchanged; the upstream status and body come back verbatim.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::config::Config;

/// Request headers passed to the upstream API.
pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

/// Response headers passed back to the browser.
pub const FORWARDED_RESPONSE_HEADERS: [HeaderName; 1] = [header::CONTENT_TYPE];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "proxy failure");
        let body = serde_json::json!({ "message": "Сервер МИС недоступен" });
        (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response()
    }
}

/// Shared upstream client; cheap to clone into handlers.
#[derive(Clone)]
pub struct Upstream {
    http: reqwest::Client,
    base: Arc<str>,
}

impl Upstream {
    /// # Errors
    ///
    /// [`ProxyError::ClientBuild`] if the TLS backend cannot initialise.
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ProxyError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base: Arc::from(config.api_url.as_str()) })
    }

    #[must_use]
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        upstream_url(&self.base, path, query)
    }
}

/// Join `base`, a request path and an optional raw query string.
#[must_use]
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Copy the `allowed` headers (every value) out of `incoming`.
#[must_use]
pub fn forwarded_headers(incoming: &HeaderMap, allowed: &[HeaderName]) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in allowed {
        for value in incoming.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// # Errors
///
/// [`ProxyError::Upstream`] (502) when the upstream cannot be reached or its
/// body cannot be read.
pub async fn forward(
    State(upstream): State<Upstream>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream.url(&path, query.as_deref());
    tracing::debug!(%method, upstream = %url, "forwarding api request");

    let reply = upstream
        .http
        .request(method, &url)
        .headers(forwarded_headers(&headers, &FORWARDED_REQUEST_HEADERS))
        .body(body)
        .send()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    let status = reply.status();
    let reply_headers = forwarded_headers(reply.headers(), &FORWARDED_RESPONSE_HEADERS);
    let bytes = reply.bytes().await.map_err(|e| ProxyError::Upstream(e.to_string()))?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = reply_headers;
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

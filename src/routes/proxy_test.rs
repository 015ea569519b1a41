use axum::http::{HeaderValue, Request};
use tower::ServiceExt;

use super::*;
use crate::config::{UpstreamTimeouts, DEFAULT_PORT};

fn config(api_url: &str) -> Config {
    Config {
        port: DEFAULT_PORT,
        api_url: api_url.to_owned(),
        timeouts: UpstreamTimeouts { request_secs: 2, connect_secs: 1 },
    }
}

// =============================================================================
// URL joining
// =============================================================================

#[test]
fn url_joins_base_and_path_with_one_slash() {
    assert_eq!(upstream_url("https://mis/api/", "/patient/1", None), "https://mis/api/patient/1");
    assert_eq!(upstream_url("https://mis/api", "patient", None), "https://mis/api/patient");
}

#[test]
fn url_keeps_raw_query() {
    assert_eq!(
        upstream_url("https://mis/api", "patient", Some("name=%D0%98&page=2")),
        "https://mis/api/patient?name=%D0%98&page=2"
    );
    assert_eq!(upstream_url("https://mis/api", "patient", Some("")), "https://mis/api/patient");
}

// =============================================================================
// Header filtering
// =============================================================================

#[test]
fn only_allowed_headers_are_forwarded() {
    let mut incoming = HeaderMap::new();
    incoming.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
    incoming.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    incoming.insert(header::COOKIE, HeaderValue::from_static("session=1"));
    incoming.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

    let out = forwarded_headers(&incoming, &FORWARDED_REQUEST_HEADERS);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer t");
    assert!(out.get(header::COOKIE).is_none());
    assert!(out.get(header::HOST).is_none());
}

// =============================================================================
// Router
// =============================================================================

#[tokio::test]
async fn healthz_is_ok() {
    let app = crate::routes::api_routes(Upstream::new(&config("http://127.0.0.1:9")).unwrap());
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let app = crate::routes::api_routes(Upstream::new(&config("http://127.0.0.1:9")).unwrap());
    let response = app
        .oneshot(Request::builder().uri("/api/patient?page=1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

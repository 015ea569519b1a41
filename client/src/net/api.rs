//! REST gateway for the upstream MIS API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the stored
//! bearer token attached to every request.
//! Server-side (SSR): every call fails with [`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures are classified into [`ApiError`] and returned to the call site,
//! which picks its own localized message (e.g. 400 vs 409 on login). A 401
//! from any call clears the stored token and sends the browser to `/` once
//! per page load; the caller still receives `Err(ApiError::Unauthorized)`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base path every resource path is resolved against.
pub const API_BASE: &str = "/api";

/// Query string pairs; repeated keys are sent as repeated parameters.
pub type Query = Vec<(String, String)>;

/// Classified failure of an API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("request failed: {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Classify a non-success HTTP status and its response body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::BadRequest(body.trim().to_owned()),
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict(body.trim().to_owned()),
            other => Self::Status(other),
        }
    }

    /// HTTP status this error was built from, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Status(code) => Some(*code),
            Self::Transport(_) | Self::Decode(_) | Self::Unavailable => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Resolve a resource path (`"patient/1"`) against [`API_BASE`].
#[must_use]
pub fn endpoint(path: &str) -> String {
    format!("{API_BASE}/{}", path.trim_start_matches('/'))
}

/// `Authorization` header value for a stored token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// One-shot latch so concurrent 401 responses redirect only once.
#[derive(Debug)]
pub struct RedirectLatch {
    tripped: AtomicBool,
}

impl RedirectLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { tripped: AtomicBool::new(false) }
    }

    /// Returns `true` only for the first caller.
    pub fn trip(&self) -> bool {
        !self.tripped.swap(true, Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }
}

impl Default for RedirectLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "hydrate")]
static UNAUTHORIZED_REDIRECT: RedirectLatch = RedirectLatch::new();

/// Apply the 401 policy: clear the token and navigate to `/`, at most once
/// per latch. Returns whether this call performed the redirect.
pub fn handle_unauthorized<C, N>(latch: &RedirectLatch, clear_token: C, navigate: N) -> bool
where
    C: FnOnce(),
    N: FnOnce(&str),
{
    if !latch.trip() {
        return false;
    }
    clear_token();
    navigate("/");
    true
}

/// Decode a JSON response body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body does not match `T`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extract the id of a created resource.
///
/// The API answers create calls with either a bare JSON string or an object
/// carrying an `id` field.
#[must_use]
pub fn parse_created_id(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    match value {
        serde_json::Value::String(id) if !id.is_empty() => Some(id),
        serde_json::Value::Object(map) => map.get("id").and_then(|v| v.as_str()).map(ToOwned::to_owned),
        _ => None,
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET` a resource and decode the JSON response.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on transport, status, or decode failure.
pub async fn get_json<T: DeserializeOwned>(path: &str, query: &[(String, String)]) -> Result<T, ApiError> {
    let text = send(Method::Get, path, query, None).await?;
    decode(&text)
}

/// `POST` a JSON body and decode the JSON response.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on transport, status, or decode failure.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let text = send(Method::Post, path, &[], Some(to_body(body)?)).await?;
    decode(&text)
}

/// `POST` a JSON body to a create endpoint and return the new resource id.
///
/// # Errors
///
/// Returns the classified [`ApiError`]; [`ApiError::Decode`] if no id is present.
pub async fn post_for_id<B: Serialize>(path: &str, body: &B) -> Result<String, ApiError> {
    let text = send(Method::Post, path, &[], Some(to_body(body)?)).await?;
    parse_created_id(&text).ok_or_else(|| ApiError::Decode(format!("missing id in response: {text}")))
}

/// `POST` without a body, ignoring the response.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on transport or status failure.
pub async fn post_empty(path: &str) -> Result<(), ApiError> {
    send(Method::Post, path, &[], None).await.map(|_| ())
}

/// `PUT` a JSON body, ignoring the response.
///
/// # Errors
///
/// Returns the classified [`ApiError`] on transport or status failure.
pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    send(Method::Put, path, &[], Some(to_body(body)?)).await.map(|_| ())
}

#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
async fn send(
    method: Method,
    path: &str,
    query: &[(String, String)],
    body: Option<serde_json::Value>,
) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;

        let url = endpoint(path);
        let mut builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
        };
        if !query.is_empty() {
            builder = builder.query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(token) = crate::util::storage::load_token() {
            builder = builder.header("Authorization", &bearer(&token));
        }
        let request = match body {
            Some(body) => builder.json(&body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let ok = resp.ok();
        let text = resp.text().await.unwrap_or_default();
        if ok {
            return Ok(text);
        }

        let err = ApiError::from_status(status, &text);
        if err == ApiError::Unauthorized {
            handle_unauthorized(&UNAUTHORIZED_REDIRECT, crate::util::storage::clear_token, |target| {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.location().set_href(target) {
                        leptos::logging::warn!("redirect to {target} failed: {e:?}");
                    }
                }
            });
        }
        leptos::logging::warn!("{} {url} failed: {err}", method.as_str());
        Err(err)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

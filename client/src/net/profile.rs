//! Doctor account: registration, login/logout, and the profile.

use super::api::{self, ApiError};
use super::types::{Doctor, LoginRequest, ProfileUpdate, RegisterRequest, TokenResponse};

/// Register a doctor and return the issued bearer token.
///
/// # Errors
///
/// Propagates [`ApiError`]; a 409 means the email is taken.
pub async fn register(body: &RegisterRequest) -> Result<String, ApiError> {
    let resp: TokenResponse = api::post_json("doctor/register", body).await?;
    Ok(resp.token)
}

/// Exchange credentials for a bearer token.
///
/// # Errors
///
/// Propagates [`ApiError`]; a 400 means the credentials were rejected.
pub async fn login(body: &LoginRequest) -> Result<String, ApiError> {
    let resp: TokenResponse = api::post_json("doctor/login", body).await?;
    Ok(resp.token)
}

/// Invalidate the current token server-side.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn logout() -> Result<(), ApiError> {
    api::post_empty("doctor/logout").await
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn get_profile() -> Result<Doctor, ApiError> {
    api::get_json("doctor/profile", &[]).await
}

/// # Errors
///
/// Propagates [`ApiError`]; a 409 means the new email is taken.
pub async fn edit_profile(body: &ProfileUpdate) -> Result<(), ApiError> {
    api::put_json("doctor/profile", body).await
}

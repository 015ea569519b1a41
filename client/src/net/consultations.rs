//! Consultation resource: inspections awaiting the doctor's speciality,
//! consultation threads, and comments.

use super::api::{self, ApiError};
use super::patients::InspectionFilters;
use super::types::{CommentCreate, CommentUpdate, Consultation, InspectionPage};

#[must_use]
pub fn consultation_path(id: &str) -> String {
    format!("consultation/{id}")
}

#[must_use]
pub fn comment_path(comment_id: &str) -> String {
    format!("consultation/comment/{comment_id}")
}

/// Inspections with consultations matching the signed-in doctor's speciality.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn list_consultations(filters: &InspectionFilters) -> Result<InspectionPage, ApiError> {
    api::get_json("consultation", &filters.to_query()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn get_consultation(id: &str) -> Result<Consultation, ApiError> {
    api::get_json(&consultation_path(id), &[]).await
}

/// Post a reply and return the new comment id.
///
/// # Errors
///
/// Propagates [`ApiError`]; a 403 means the doctor's speciality does not match.
pub async fn add_comment(consultation_id: &str, body: &CommentCreate) -> Result<String, ApiError> {
    api::post_for_id(&format!("{}/comment", consultation_path(consultation_id)), body).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn edit_comment(comment_id: &str, body: &CommentUpdate) -> Result<(), ApiError> {
    api::put_json(&comment_path(comment_id), body).await
}

//! Inspection resource: detail, edit, and follow-up chain.

use super::api::{self, ApiError};
use super::types::{Inspection, InspectionEdit, InspectionPreview};

#[must_use]
pub fn inspection_path(id: &str) -> String {
    format!("inspection/{id}")
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn get_inspection(id: &str) -> Result<Inspection, ApiError> {
    api::get_json(&inspection_path(id), &[]).await
}

/// Replace the editable fields of an inspection.
///
/// # Errors
///
/// Propagates [`ApiError`]; a 403 means the signed-in doctor is not the author.
pub async fn edit_inspection(id: &str, body: &InspectionEdit) -> Result<(), ApiError> {
    api::put_json(&inspection_path(id), body).await
}

/// Every follow-up of a root inspection, in server order.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn get_chain(root_id: &str) -> Result<Vec<InspectionPreview>, ApiError> {
    api::get_json(&format!("{}/chain", inspection_path(root_id)), &[]).await
}

/// Whether the patient already has an inspection concluding Death, other
/// than `exclude`. Candidates are checked one by one.
///
/// # Errors
///
/// Propagates the first [`ApiError`] from the search or a detail fetch.
pub async fn patient_has_death(patient_id: &str, exclude: Option<&str>) -> Result<bool, ApiError> {
    let candidates: Vec<String> = super::patients::search_inspections(patient_id, "")
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect();
    crate::state::inspection_form::prior_death_exists(&candidates, exclude, |id| async move {
        get_inspection(&id).await.map(|i| i.conclusion)
    })
    .await
}

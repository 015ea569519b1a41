//! Patient resource: registry listing, patient cards, and per-patient
//! inspection history.

#[cfg(test)]
#[path = "patients_test.rs"]
mod patients_test;

use super::api::{self, ApiError, Query};
use super::types::{
    Conclusion, InspectionCreate, InspectionPage, InspectionShort, Patient, PatientCreate, PatientPage,
};

pub const PATIENT_PAGE_SIZES: [u32; 3] = [5, 10, 20];
pub const INSPECTION_PAGE_SIZES: [u32; 3] = [2, 4, 8];
pub const DEFAULT_INSPECTION_PAGE_SIZE: u32 = 4;

/// Server-side sort keys for the patient registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatientSorting {
    #[default]
    NameAsc,
    NameDesc,
    CreateAsc,
    CreateDesc,
    InspectionAsc,
    InspectionDesc,
}

impl PatientSorting {
    pub const ALL: [Self; 6] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::CreateAsc,
        Self::CreateDesc,
        Self::InspectionAsc,
        Self::InspectionDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "NameAsc",
            Self::NameDesc => "NameDesc",
            Self::CreateAsc => "CreateAsc",
            Self::CreateDesc => "CreateDesc",
            Self::InspectionAsc => "InspectionAsc",
            Self::InspectionDesc => "InspectionDesc",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "По имени (А-Я)",
            Self::NameDesc => "По имени (Я-А)",
            Self::CreateAsc => "По дате создания (старые)",
            Self::CreateDesc => "По дате создания (новые)",
            Self::InspectionAsc => "По дате осмотров (старые)",
            Self::InspectionDesc => "По дате осмотров (новые)",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

/// Registry filter form state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientFilters {
    pub name: String,
    pub conclusions: Vec<Conclusion>,
    pub sorting: PatientSorting,
    pub scheduled_visits: bool,
    pub only_mine: bool,
    pub page: u32,
    pub size: u32,
}

impl Default for PatientFilters {
    fn default() -> Self {
        Self {
            name: String::new(),
            conclusions: Vec::new(),
            sorting: PatientSorting::default(),
            scheduled_visits: false,
            only_mine: false,
            page: 1,
            size: PATIENT_PAGE_SIZES[0],
        }
    }
}

impl PatientFilters {
    /// Query pairs; empty name and unset flags are omitted.
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        let name = self.name.trim();
        if !name.is_empty() {
            query.push(("name".to_owned(), name.to_owned()));
        }
        for conclusion in &self.conclusions {
            query.push(("conclusions".to_owned(), conclusion.as_str().to_owned()));
        }
        query.push(("sorting".to_owned(), self.sorting.as_str().to_owned()));
        if self.scheduled_visits {
            query.push(("scheduledVisits".to_owned(), "true".to_owned()));
        }
        if self.only_mine {
            query.push(("onlyMine".to_owned(), "true".to_owned()));
        }
        query.push(("page".to_owned(), self.page.max(1).to_string()));
        query.push(("size".to_owned(), self.size.to_string()));
        query
    }
}

/// Filter state for inspection lists (patient card and consultations page).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectionFilters {
    pub grouped: bool,
    pub icd_roots: Vec<String>,
    pub page: u32,
    pub size: u32,
}

impl Default for InspectionFilters {
    fn default() -> Self {
        Self {
            grouped: false,
            icd_roots: Vec::new(),
            page: 1,
            size: DEFAULT_INSPECTION_PAGE_SIZE,
        }
    }
}

impl InspectionFilters {
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = vec![("grouped".to_owned(), self.grouped.to_string())];
        for root in &self.icd_roots {
            query.push(("icdRoots".to_owned(), root.clone()));
        }
        query.push(("page".to_owned(), self.page.max(1).to_string()));
        query.push(("size".to_owned(), self.size.to_string()));
        query
    }
}

#[must_use]
pub fn patient_path(id: &str) -> String {
    format!("patient/{id}")
}

#[must_use]
pub fn inspections_path(patient_id: &str) -> String {
    format!("patient/{patient_id}/inspections")
}

/// Register a new patient.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn create_patient(body: &PatientCreate) -> Result<String, ApiError> {
    api::post_for_id("patient", body).await
}

/// One page of the patient registry.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn list_patients(filters: &PatientFilters) -> Result<PatientPage, ApiError> {
    api::get_json("patient", &filters.to_query()).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn get_patient(id: &str) -> Result<Patient, ApiError> {
    api::get_json(&patient_path(id), &[]).await
}

/// Record an inspection for a patient and return its id.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn create_inspection(patient_id: &str, body: &InspectionCreate) -> Result<String, ApiError> {
    api::post_for_id(&inspections_path(patient_id), body).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn list_inspections(patient_id: &str, filters: &InspectionFilters) -> Result<InspectionPage, ApiError> {
    api::get_json(&inspections_path(patient_id), &filters.to_query()).await
}

/// Inspections of a patient that can still be continued, matched by
/// diagnosis name or code.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn search_inspections(patient_id: &str, request: &str) -> Result<Vec<InspectionShort>, ApiError> {
    let query = vec![("request".to_owned(), request.trim().to_owned())];
    api::get_json(&format!("{}/search", inspections_path(patient_id)), &query).await
}

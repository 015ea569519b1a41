//! Reference data (ICD-10, specialities) and the ICD-root report.

#[cfg(test)]
#[path = "dictionary_test.rs"]
mod dictionary_test;

use super::api::{self, ApiError, Query};
use super::types::{Icd10Page, Icd10Record, Report, SpecialityPage};

/// Page size for lookup dropdowns.
pub const LOOKUP_PAGE_SIZE: u32 = 20;

#[must_use]
pub fn lookup_query(key: &str, text: &str, page: u32, size: u32) -> Query {
    let mut query = Query::new();
    let text = text.trim();
    if !text.is_empty() {
        query.push((key.to_owned(), text.to_owned()));
    }
    query.push(("page".to_owned(), page.max(1).to_string()));
    query.push(("size".to_owned(), size.to_string()));
    query
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn icd10_roots() -> Result<Vec<Icd10Record>, ApiError> {
    api::get_json("dictionary/icd10/roots", &[]).await
}

/// Search ICD-10 by code or name.
///
/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn search_icd10(text: &str, page: u32) -> Result<Icd10Page, ApiError> {
    api::get_json("dictionary/icd10", &lookup_query("request", text, page, LOOKUP_PAGE_SIZE)).await
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn specialities(name: &str, page: u32) -> Result<SpecialityPage, ApiError> {
    api::get_json("dictionary/speciality", &lookup_query("name", name, page, LOOKUP_PAGE_SIZE)).await
}

/// Report period and optional ICD-root restriction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportParams {
    /// ISO-8601 start of the period.
    pub start: String,
    /// ISO-8601 end of the period.
    pub end: String,
    pub icd_roots: Vec<String>,
}

impl ReportParams {
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = vec![
            ("start".to_owned(), self.start.clone()),
            ("end".to_owned(), self.end.clone()),
        ];
        for root in &self.icd_roots {
            query.push(("icdRoots".to_owned(), root.clone()));
        }
        query
    }
}

/// # Errors
///
/// Propagates [`ApiError`] from the gateway.
pub async fn icd_roots_report(params: &ReportParams) -> Result<Report, ApiError> {
    api::get_json("report/icdrootsreport", &params.to_query()).await
}

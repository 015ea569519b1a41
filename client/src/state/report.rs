//! ICD-root visit report: filter checks and the table the page renders.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use chrono::{DateTime, Utc};

use crate::net::dictionary::ReportParams;
use crate::net::types::Report;
use crate::util::datetime::{format_date, parse_utc, to_iso};

pub const SUMMARY_LABEL: &str = "Итог: ";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("Пожалуйста, выберите дату начала периода")]
    MissingStart,
    #[error("Пожалуйста, выберите дату конца периода")]
    MissingEnd,
    #[error("Дата начала периода не может быть позже даты конца")]
    StartAfterEnd,
}

/// Build request parameters from ISO start/end values.
///
/// # Errors
///
/// Missing bounds, or a start later than the end.
pub fn report_params(start: Option<&str>, end: Option<&str>, icd_roots: Vec<String>) -> Result<ReportParams, ReportError> {
    let start: DateTime<Utc> = start.and_then(parse_utc).ok_or(ReportError::MissingStart)?;
    let end: DateTime<Utc> = end.and_then(parse_utc).ok_or(ReportError::MissingEnd)?;
    if start > end {
        return Err(ReportError::StartAfterEnd);
    }
    Ok(ReportParams { start: to_iso(start), end: to_iso(end), icd_roots })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub patient: String,
    pub birthdate: String,
    pub gender: String,
    /// Visit counts aligned with [`ReportTable::columns`].
    pub visits: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportTable {
    /// One column per ICD root, in filter order.
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
    /// Summary row, labelled [`SUMMARY_LABEL`].
    pub summary: ReportRow,
}

impl ReportTable {
    #[must_use]
    pub fn from_report(report: &Report) -> Self {
        let columns = report.filters.icd_roots.clone();
        let rows = report
            .records
            .iter()
            .map(|record| ReportRow {
                patient: record.patient_name.clone(),
                birthdate: record.patient_birthdate.as_deref().map(format_date).unwrap_or_default(),
                gender: record.gender.map(|g| g.label().to_owned()).unwrap_or_default(),
                visits: columns
                    .iter()
                    .map(|root| record.visits_by_root.get(root).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();
        let summary = ReportRow {
            patient: SUMMARY_LABEL.to_owned(),
            visits: columns
                .iter()
                .map(|root| report.summary_by_root.get(root).copied().unwrap_or(0))
                .collect(),
            ..ReportRow::default()
        };
        Self { columns, rows, summary }
    }
}

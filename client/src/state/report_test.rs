use super::*;
use crate::net::types::{Gender, ReportFilters, ReportRecord};
use std::collections::BTreeMap;

fn visits(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
}

// =============================================================
// Parameters
// =============================================================

#[test]
fn params_require_both_bounds() {
    assert_eq!(report_params(None, Some("2024-01-01T00:00:00Z"), vec![]), Err(ReportError::MissingStart));
    assert_eq!(report_params(Some("2024-01-01T00:00:00Z"), Some("bad"), vec![]), Err(ReportError::MissingEnd));
}

#[test]
fn params_reject_inverted_period() {
    assert_eq!(
        report_params(Some("2024-02-01T00:00:00Z"), Some("2024-01-01T00:00:00Z"), vec![]),
        Err(ReportError::StartAfterEnd)
    );
}

#[test]
fn params_normalize_timestamps() {
    let params = report_params(
        Some("2024-01-01T03:00:00+03:00"),
        Some("2024-02-01T00:00:00Z"),
        vec!["r1".to_owned()],
    )
    .unwrap();
    assert_eq!(params.start, "2024-01-01T00:00:00.000Z");
    assert_eq!(params.icd_roots, vec!["r1".to_owned()]);
}

// =============================================================
// Table
// =============================================================

#[test]
fn table_has_a_column_per_root_and_zero_fills_missing_counts() {
    let report = Report {
        filters: ReportFilters {
            start: String::new(),
            end: String::new(),
            icd_roots: vec!["A00-B99".to_owned(), "C00-D48".to_owned()],
        },
        records: vec![ReportRecord {
            patient_name: "Ivan".to_owned(),
            patient_birthdate: Some("1990-05-17T00:00:00".to_owned()),
            gender: Some(Gender::Male),
            visits_by_root: visits(&[("A00-B99", 3)]),
        }],
        summary_by_root: visits(&[("A00-B99", 3)]),
    };
    let table = ReportTable::from_report(&report);
    assert_eq!(table.columns, vec!["A00-B99".to_owned(), "C00-D48".to_owned()]);
    assert_eq!(table.rows[0].visits, vec![3, 0]);
    assert_eq!(table.rows[0].birthdate, "1990.05.17");
    assert_eq!(table.rows[0].gender, "Мужской");
    assert_eq!(table.summary.patient, SUMMARY_LABEL);
    assert_eq!(table.summary.visits, vec![3, 0]);
}

#[test]
fn empty_report_still_has_summary_row() {
    let table = ReportTable::from_report(&Report::default());
    assert!(table.rows.is_empty());
    assert!(table.columns.is_empty());
    assert_eq!(table.summary.patient, SUMMARY_LABEL);
}

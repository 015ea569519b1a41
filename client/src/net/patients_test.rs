use super::*;

fn keys(query: &Query) -> Vec<&str> {
    query.iter().map(|(k, _)| k.as_str()).collect()
}

// =============================================================
// PatientFilters
// =============================================================

#[test]
fn default_filters_send_sorting_page_and_size_only() {
    let query = PatientFilters::default().to_query();
    assert_eq!(keys(&query), vec!["sorting", "page", "size"]);
    assert_eq!(query[0].1, "NameAsc");
    assert_eq!(query[1].1, "1");
    assert_eq!(query[2].1, "5");
}

#[test]
fn conclusions_repeat_the_key() {
    let filters = PatientFilters {
        conclusions: vec![Conclusion::Disease, Conclusion::Death],
        ..PatientFilters::default()
    };
    let query = filters.to_query();
    let values: Vec<&str> = query
        .iter()
        .filter(|(k, _)| k == "conclusions")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(values, vec!["Disease", "Death"]);
}

#[test]
fn name_is_trimmed_and_flags_are_included_when_set() {
    let filters = PatientFilters {
        name: "  Ivan ".to_owned(),
        scheduled_visits: true,
        only_mine: true,
        sorting: PatientSorting::InspectionDesc,
        ..PatientFilters::default()
    };
    let query = filters.to_query();
    assert!(query.contains(&("name".to_owned(), "Ivan".to_owned())));
    assert!(query.contains(&("scheduledVisits".to_owned(), "true".to_owned())));
    assert!(query.contains(&("onlyMine".to_owned(), "true".to_owned())));
    assert!(query.contains(&("sorting".to_owned(), "InspectionDesc".to_owned())));
}

#[test]
fn page_zero_is_clamped_to_first_page() {
    let filters = PatientFilters { page: 0, ..PatientFilters::default() };
    assert!(filters.to_query().contains(&("page".to_owned(), "1".to_owned())));
}

#[test]
fn sorting_parse_matches_as_str() {
    for sorting in PatientSorting::ALL {
        assert_eq!(PatientSorting::parse(sorting.as_str()), Some(sorting));
    }
    assert_eq!(PatientSorting::parse("Random"), None);
}

// =============================================================
// InspectionFilters
// =============================================================

#[test]
fn inspection_filters_default_to_four_per_page_ungrouped() {
    let query = InspectionFilters::default().to_query();
    assert_eq!(
        query,
        vec![
            ("grouped".to_owned(), "false".to_owned()),
            ("page".to_owned(), "1".to_owned()),
            ("size".to_owned(), "4".to_owned()),
        ]
    );
}

#[test]
fn inspection_filters_repeat_icd_roots() {
    let filters = InspectionFilters {
        grouped: true,
        icd_roots: vec!["r1".to_owned(), "r2".to_owned()],
        page: 3,
        size: 8,
    };
    assert_eq!(keys(&filters.to_query()), vec!["grouped", "icdRoots", "icdRoots", "page", "size"]);
}

// =============================================================
// Paths
// =============================================================

#[test]
fn paths_embed_the_patient_id() {
    assert_eq!(patient_path("p1"), "patient/p1");
    assert_eq!(inspections_path("p1"), "patient/p1/inspections");
}

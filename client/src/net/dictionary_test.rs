use super::*;

#[test]
fn lookup_query_omits_blank_text() {
    assert_eq!(
        lookup_query("request", "  ", 1, 20),
        vec![("page".to_owned(), "1".to_owned()), ("size".to_owned(), "20".to_owned())]
    );
}

#[test]
fn lookup_query_trims_text_and_clamps_page() {
    let query = lookup_query("name", " Хирург ", 0, 5);
    assert_eq!(query[0], ("name".to_owned(), "Хирург".to_owned()));
    assert_eq!(query[1], ("page".to_owned(), "1".to_owned()));
}

#[test]
fn report_query_lists_period_then_roots() {
    let params = ReportParams {
        start: "2024-01-01T00:00:00Z".to_owned(),
        end: "2024-02-01T00:00:00Z".to_owned(),
        icd_roots: vec!["a".to_owned(), "b".to_owned()],
    };
    let query = params.to_query();
    let keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["start", "end", "icdRoots", "icdRoots"]);
}

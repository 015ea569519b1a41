use super::*;

#[test]
fn no_pages_renders_nothing() {
    assert!(page_items(1, 0).is_empty());
}

#[test]
fn short_lists_show_every_page() {
    assert_eq!(page_items(2, 4), vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn long_lists_collapse_into_gaps() {
    assert_eq!(
        page_items(10, 20),
        vec![Some(1), None, Some(8), Some(9), Some(10), Some(11), Some(12), None, Some(20)]
    );
}

#[test]
fn adjacent_edge_page_has_no_gap() {
    assert_eq!(page_items(4, 7), vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]);
}

#[test]
fn current_page_is_clamped_into_range() {
    assert_eq!(page_items(99, 3), vec![Some(1), Some(2), Some(3)]);
}

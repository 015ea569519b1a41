use super::*;

#[test]
fn heading_names_the_visit_date_and_time() {
    let heading = inspection_heading("2024-03-01T12:00:00Z");
    assert!(heading.starts_with("Амбулаторный осмотр от 2024.03."));
    let (_, time) = heading.rsplit_once(" – ").unwrap();
    assert_eq!(time.len(), 5);
    assert!(time.ends_with(":00"));
}

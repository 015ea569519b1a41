use super::*;

fn root(id: &str, code: &str, name: &str) -> Icd10Record {
    Icd10Record { id: id.to_owned(), code: code.to_owned(), name: name.to_owned(), ..Icd10Record::default() }
}

#[test]
fn roots_are_sorted_by_code_and_labelled() {
    let options = root_options(vec![
        root("2", "C00-D48", "Новообразования"),
        root("1", "A00-B99", "Некоторые инфекционные болезни"),
    ]);
    assert_eq!(options[0], SelectOption::new("1", "A00-B99 – Некоторые инфекционные болезни"));
    assert_eq!(options[1].id, "2");
}

use super::*;

// =============================================================
// Enums
// =============================================================

#[test]
fn conclusion_serializes_as_server_names() {
    assert_eq!(serde_json::to_string(&Conclusion::Death).unwrap(), "\"Death\"");
    assert_eq!(
        serde_json::from_str::<Conclusion>("\"Recovery\"").unwrap(),
        Conclusion::Recovery
    );
}

#[test]
fn conclusion_parse_matches_as_str() {
    for conclusion in Conclusion::ALL {
        assert_eq!(Conclusion::parse(conclusion.as_str()), Some(conclusion));
    }
    assert_eq!(Conclusion::parse("death"), None);
}

#[test]
fn gender_parse_is_case_insensitive() {
    assert_eq!(Gender::parse("male"), Some(Gender::Male));
    assert_eq!(Gender::parse("Female"), Some(Gender::Female));
    assert_eq!(Gender::parse("other"), None);
}

#[test]
fn diagnosis_type_parse_ignores_padding() {
    assert_eq!(DiagnosisType::parse("Complication "), Some(DiagnosisType::Complication));
    assert_eq!(DiagnosisType::parse("Main"), Some(DiagnosisType::Main));
}

#[test]
fn labels_are_localized() {
    assert_eq!(Conclusion::Disease.label(), "Болезнь");
    assert_eq!(DiagnosisType::Main.label(), "Основной");
    assert_eq!(Gender::Female.label(), "Женский");
}

// =============================================================
// Response decoding
// =============================================================

#[test]
fn inspection_preview_decodes_camel_case() {
    let raw = r#"{
        "id": "i-1",
        "createTime": "2024-01-01T10:00:00Z",
        "previousId": null,
        "date": "2024-01-01T09:00:00Z",
        "conclusion": "Disease",
        "doctorId": "d-1",
        "doctor": "Dr. House",
        "patientId": "p-1",
        "patient": "John",
        "diagnosis": {"id": "x", "code": "A00", "name": "Cholera", "type": "Main"},
        "hasChain": true,
        "hasNested": true
    }"#;
    let preview: InspectionPreview = serde_json::from_str(raw).unwrap();
    assert_eq!(preview.id, "i-1");
    assert_eq!(preview.previous_id, None);
    assert_eq!(preview.diagnosis.kind, DiagnosisType::Main);
    assert!(preview.has_chain);
    assert!(preview.has_nested);
}

#[test]
fn comment_decodes_with_missing_optional_fields() {
    let raw = r#"{"id": "c-1", "content": "hi", "author": "Ann", "authorId": "d-1"}"#;
    let comment: Comment = serde_json::from_str(raw).unwrap();
    assert_eq!(comment.parent_id, None);
    assert_eq!(comment.modified_date, None);
    assert_eq!(comment.author, "Ann");
}

#[test]
fn report_decodes_visit_maps() {
    let raw = r#"{
        "filters": {"start": "s", "end": "e", "icdRoots": ["A00-B99"]},
        "records": [{"patientName": "P", "gender": "Male", "visitsByRoot": {"A00-B99": 2}}],
        "summaryByRoot": {"A00-B99": 2}
    }"#;
    let report: Report = serde_json::from_str(raw).unwrap();
    assert_eq!(report.filters.icd_roots, vec!["A00-B99".to_owned()]);
    assert_eq!(report.records[0].visits_by_root.get("A00-B99"), Some(&2));
    assert_eq!(report.records[0].gender, Some(Gender::Male));
}

// =============================================================
// Comment
// =============================================================

#[test]
fn comment_is_modified_only_when_timestamps_differ() {
    let mut comment = Comment { create_time: "t1".to_owned(), ..Comment::default() };
    assert!(!comment.is_modified());
    comment.modified_date = Some("t1".to_owned());
    assert!(!comment.is_modified());
    comment.modified_date = Some("t2".to_owned());
    assert!(comment.is_modified());
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn inspection_create_omits_absent_optional_fields() {
    let body = InspectionCreate {
        date: "d".to_owned(),
        anamnesis: "a".to_owned(),
        complaints: "c".to_owned(),
        treatment: "t".to_owned(),
        conclusion: Conclusion::Recovery,
        next_visit_date: None,
        death_date: None,
        previous_inspection_id: None,
        diagnoses: vec![],
        consultations: vec![],
    };
    let value = serde_json::to_value(&body).unwrap();
    let object = value.as_object().unwrap();
    assert!(!object.contains_key("nextVisitDate"));
    assert!(!object.contains_key("deathDate"));
    assert!(!object.contains_key("previousInspectionId"));
    assert_eq!(object["conclusion"], "Recovery");
}

#[test]
fn comment_create_uses_parent_id_key() {
    let body = CommentCreate { content: "ok".to_owned(), parent_id: "c-1".to_owned() };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({"content": "ok", "parentId": "c-1"})
    );
}

#[test]
fn diagnosis_create_renames_type() {
    let body = DiagnosisCreate {
        icd_diagnosis_id: "icd".to_owned(),
        description: Some("note".to_owned()),
        kind: DiagnosisType::Concomitant,
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({"icdDiagnosisId": "icd", "description": "note", "type": "Concomitant"})
    );
}

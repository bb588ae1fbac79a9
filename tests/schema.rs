//! Tests for schema extraction and decoding.
mod common;
use common::*;
use formfill::prelude::*;
use formfill::schema::{FREE_TEXT_OPTION, RawEntry, extract_schema_blob, extract_script_variable};
use serde_json::json;
use std::collections::HashSet;

#[test]
fn test_decode_single_page_form() {
    let decoded = decode(&single_page_blob());
    let fields: Vec<_> = decoded.fields().collect();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].id, FieldId::Entry(111));
    assert_eq!(fields[0].kind, FieldKind::ShortAnswer);
    assert_eq!(fields[0].container_name, "Name");
    assert!(fields[0].required);
    assert_eq!(fields[0].options, None);
    assert_eq!(fields[0].sub_label, None);

    assert_eq!(fields[1].id, FieldId::Entry(222));
    assert_eq!(fields[1].kind, FieldKind::Checkboxes);
    assert!(!fields[1].required);
    assert_eq!(
        fields[1].options,
        Some(vec!["A".to_string(), "B".to_string()])
    );
    assert!(!decoded.collects_email);
}

#[test]
fn test_only_required_is_subset() {
    let blob = form_blob(
        vec![
            text_question(1, "Name", 111, true),
            text_question(2, "Nickname", 112, false),
            page_break(50, "Second", None),
            choice_question(3, "Pick", 2, 113, &[("A", None)], true),
            choice_question(4, "Maybe", 3, 114, &[("B", None)], false),
        ],
        false,
    );

    let all = decode(&blob);
    let required = SchemaDecoder::new()
        .only_required(true)
        .decode(&blob)
        .expect("Failed to decode");

    let all_ids: HashSet<_> = all.fields().map(|f| f.id.clone()).collect();
    let required_ids: HashSet<_> = required.fields().map(|f| f.id.clone()).collect();

    assert!(required_ids.is_subset(&all_ids));
    assert!(required_ids.len() < all_ids.len());
    assert_eq!(
        required_ids,
        HashSet::from([FieldId::Entry(111), FieldId::Entry(113)])
    );
    assert!(required.fields().all(|f| f.required));
    // Page breaks survive filtering.
    assert_eq!(required.page_break_count(), 1);
}

#[test]
fn test_empty_option_label_becomes_free_text_sentinel() {
    let blob = form_blob(
        vec![choice_question(1, "Colour", 2, 10, &[("Red", None), ("", None)], true)],
        false,
    );
    let decoded = decode(&blob);
    let field = decoded.fields().next().unwrap();

    assert_eq!(
        field.options,
        Some(vec!["Red".to_string(), FREE_TEXT_OPTION.to_string()])
    );
    assert_eq!(field.selectable_options(), Some(vec!["Red".to_string()]));
}

#[test]
fn test_grid_rows_become_separate_fields() {
    let blob = form_blob(
        vec![json!([
            7, "Grid", null, 7,
            [
                [501, [["1"], ["2"], ["3"]], 1, ["Row A"]],
                [502, [["1"], ["2"], ["3"]], 0, ["Row", "B"]]
            ]
        ])],
        false,
    );
    let decoded = decode(&blob);
    let fields: Vec<_> = decoded.fields().collect();

    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.container_name == "Grid"));
    assert!(fields.iter().all(|f| f.kind == FieldKind::GridChoice));
    assert_eq!(fields[0].sub_label.as_deref(), Some("Row A"));
    assert_eq!(fields[1].sub_label.as_deref(), Some("Row - B"));
    assert!(fields[0].required);
    assert!(!fields[1].required);
}

#[test]
fn test_option_jumps_are_recorded() {
    let decoded = decode(&branching_blob());
    let dropdown = decoded
        .fields()
        .find(|f| f.id == FieldId::Entry(333))
        .unwrap();

    assert!(dropdown.has_branches());
    assert_eq!(dropdown.option_next_page.get("X"), Some(&100));
    assert_eq!(dropdown.option_next_page.get("Y"), Some(&200));
}

#[test]
fn test_page_breaks_and_unknown_kinds() {
    let blob = form_blob(
        vec![
            json!([9, "Intro", "Just text", 6, null]),
            page_break(60, "Next", Some(60)),
            json!([10, "Upload", null, 13, [[900, null, 0]]]),
        ],
        false,
    );
    let decoded = decode(&blob);

    assert_eq!(decoded.entries.len(), 3);
    match &decoded.entries[0] {
        RawEntry::Question { kind, fields, .. } => {
            assert_eq!(*kind, FieldKind::Unsupported(6));
            assert!(fields.is_empty());
        }
        other => panic!("Expected question, got {:?}", other),
    }
    match &decoded.entries[1] {
        RawEntry::PageBreak(marker) => {
            assert_eq!(marker.provider_id, 60);
            assert_eq!(marker.jump_target, Some(60));
        }
        other => panic!("Expected page break, got {:?}", other),
    }
    let upload = decoded.fields().next().unwrap();
    assert_eq!(upload.kind, FieldKind::Unsupported(13));
}

#[test]
fn test_email_collection_flag() {
    let decoded = decode(&form_blob(vec![text_question(1, "Name", 111, true)], true));
    assert!(decoded.collects_email);
}

#[test]
fn test_missing_containers_is_schema_unavailable() {
    for blob in [
        json!(null),
        json!([null]),
        json!([null, [null, null]]),
        json!([null, [null, []]]),
    ] {
        let result = SchemaDecoder::new().decode(&blob);
        assert!(
            matches!(result, Err(SchemaError::MissingContainers)),
            "Expected MissingContainers for {}",
            blob
        );
    }
}

#[test]
fn test_malformed_container_is_reported() {
    let blob = form_blob(vec![json!("not a container")], false);
    match SchemaDecoder::new().decode(&blob) {
        Err(SchemaError::MalformedEntry { position, .. }) => assert_eq!(position, 0),
        other => panic!("Expected MalformedEntry, got {:?}", other),
    }
}

#[test]
fn test_extract_blob_from_page() {
    let blob = single_page_blob();
    let extracted = extract_schema_blob(&html_page(&blob)).expect("Failed to extract");
    assert_eq!(extracted, blob);
}

#[test]
fn test_extract_blob_with_semicolon_in_strings() {
    let blob = form_blob(vec![text_question(1, "Name; surname", 111, true)], false);
    let extracted = extract_schema_blob(&html_page(&blob)).expect("Failed to extract");
    assert_eq!(extracted, blob);
}

#[test]
fn test_extract_fails_without_variable() {
    let result = extract_schema_blob("<html><body>Sign in to continue</body></html>");
    assert!(matches!(result, Err(SchemaError::VariableNotFound(_))));
}

#[test]
fn test_extract_fails_on_invalid_json() {
    let result = extract_schema_blob("<script>var FB_PUBLIC_LOAD_DATA_ = [1, 2,;</script>");
    assert!(matches!(result, Err(SchemaError::InvalidJson { .. })));
}

#[test]
fn test_extract_repeatedly_from_different_pages() {
    let first = single_page_blob();
    let second = branching_blob();
    assert_eq!(extract_schema_blob(&html_page(&first)).unwrap(), first);
    assert_eq!(extract_schema_blob(&html_page(&second)).unwrap(), second);
    assert_eq!(extract_schema_blob(&html_page(&first)).unwrap(), first);
}

#[test]
fn test_extract_named_variable_matches_name_literally() {
    let html = "<script>var aXb = [1];var a.b = [2];</script>";
    assert_eq!(extract_script_variable("a.b", html).unwrap(), json!([2]));
    assert!(matches!(
        extract_script_variable("a.c", html),
        Err(SchemaError::VariableNotFound(name)) if name == "a.c"
    ));
}

#[test]
fn test_field_kind_codes() {
    assert_eq!(FieldKind::from_code(0), FieldKind::ShortAnswer);
    assert_eq!(FieldKind::from_code(4), FieldKind::Checkboxes);
    assert_eq!(FieldKind::from_code(8), FieldKind::SessionMarker);
    assert_eq!(FieldKind::from_code(10), FieldKind::Time);
    assert_eq!(FieldKind::from_code(6), FieldKind::Unsupported(6));
    assert_eq!(FieldKind::Dropdown.code(), Some(3));
    assert_eq!(FieldKind::Bookkeeping.code(), None);
    assert!(FieldKind::Checkboxes.is_multi_select());
    assert!(!FieldKind::Dropdown.is_multi_select());
}

use std::io::Write;

use super::*;
use crate::test_support::{SIMPLE_REFERENCE_JSON, simple_reference};

#[test]
fn test_parse_reference_fields() {
    let reference = simple_reference();
    assert_eq!(reference.analysis_methods(), &["16S".to_string(), "WGS".to_string()]);
    assert_eq!(reference.item_ids().len(), 3);
    assert_eq!(reference.print_name("A"), "Alpha");
    assert_eq!(reference.print_name("Unlisted"), "Unlisted");
    assert_eq!(reference.canonical_name("a_alt"), "A");
    assert_eq!(reference.canonical_name("mystery"), "mystery");

    let lysis = reference.sorting("Lysis Difficulty").unwrap();
    assert_eq!(lysis.direction, SortDirection::Descending);
    assert!(lysis.top_high());
    assert_eq!(lysis.items, vec!["A", "B", "C"]);
    assert!(!reference.sorting("Gram Stain").unwrap().top_high());
}

#[test]
fn test_expected_sources_skip_zero_values() {
    let reference = simple_reference();
    let sources = reference.expected_sources("16S").unwrap();
    assert_eq!(sources.into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(reference.expected_sources("WGS").unwrap().len(), 3);
}

#[test]
fn test_unknown_method_lists_available() {
    let reference = simple_reference();
    match reference.expected_sources("ITS") {
        Err(MiqError::UnknownAnalysisMethod { method, available }) => {
            assert_eq!(method, "ITS");
            assert_eq!(available, vec!["16S", "WGS"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_missing_required_field_rejected() {
    let json = r#"{"nameLookup": {}, "printNames": {}, "itemIDs": [], "sortings": {}}"#;
    assert!(matches!(
        StandardReference::from_json_str(json),
        Err(MiqError::Json(_))
    ));
}

#[test]
fn test_method_without_sources_rejected() {
    let json = r#"{"nameLookup": {}, "printNames": {}, "itemIDs": ["A"], "sortings": {},
        "expectedValues": {"empty": {"A": 0}}}"#;
    assert!(matches!(
        StandardReference::from_json_str(json),
        Err(MiqError::Config(_))
    ));
}

#[test]
fn test_negative_expected_value_rejected() {
    let json = r#"{"nameLookup": {}, "printNames": {}, "itemIDs": ["A"], "sortings": {},
        "expectedValues": {"bad": {"A": -5, "B": 105}}}"#;
    assert!(matches!(
        StandardReference::from_json_str(json),
        Err(MiqError::Config(_))
    ));
}

#[test]
fn test_unknown_sort_direction_rejected() {
    let json = r#"{"nameLookup": {}, "printNames": {}, "itemIDs": ["A"],
        "sortings": {"x": ["sideways", ["A"]]}, "expectedValues": {"m": {"A": 100}}}"#;
    assert!(StandardReference::from_json_str(json).is_err());
}

#[test]
fn test_load_from_file_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.json");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(SIMPLE_REFERENCE_JSON.as_bytes()).unwrap();
    drop(f);

    let reference = StandardReference::load(&path).unwrap();
    assert!(reference.has_analysis_method("WGS"));

    let missing = dir.path().join("nope.json");
    assert!(matches!(
        StandardReference::load(&missing),
        Err(MiqError::NotFound(_))
    ));
}

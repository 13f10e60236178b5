use std::path::Path;

use super::exemplars::{load_example_data, load_reference_composition_from_example_miq};
use super::html::{format_score, generate_read_fate_chart_body, perform_replacement};
use super::json::MiqScoreReport;
use super::*;
use crate::error::MiqError;
use crate::model::ArtifactKind;
use crate::pipeline::{MiqScoreCalculator, ReadCounts, ScoreFloor, ScoringParams};
use crate::reference::StandardReference;
use crate::test_support::{approx_eq, counts, simple_reference};

fn score<'a>(
    reference: &'a StandardReference,
    sample: &ReadCounts,
    id: &str,
    tolerance: f64,
) -> MiqScoreData<'a> {
    MiqScoreCalculator::new(
        reference,
        "16S",
        ScoringParams::new(tolerance, ScoreFloor::Value(0.0)),
    )
    .unwrap()
    .calculate(sample, Some(id))
    .unwrap()
}

fn write_example(dir: &Path, name: &str, result: &MiqScoreData<'_>) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, render_result_json(result).unwrap()).unwrap();
    path
}

#[test]
fn test_json_keys_and_round_trip() {
    let reference = simple_reference();
    let mut result = score(
        &reference,
        &counts(&[("A", 333.0), ("B", 667.0), ("Unmapped", 17.0)]),
        "S1",
        3.5,
    );
    result.make_read_fate_chart(false, None).unwrap();
    let json = render_result_json(&result).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for key in [
        "nonreferenceReadCounts",
        "miqScore",
        "rawMiq",
        "percentToleranceInStandard",
        "plots",
        "readFateTable",
        "referenceReadCounts",
        "sampleID",
        "samplePercentages",
        "samplePercentagesOfExpected",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert!(value["plots"]["readFates"].is_string());

    let parsed = MiqScoreReport::from_json_str(&json).unwrap();
    assert_eq!(parsed, MiqScoreReport::from_result(&result));
    assert_eq!(parsed.raw_miq.to_bits(), result.raw_miq_score().to_bits());
    assert_eq!(
        parsed.sample_percentages_of_expected["A"].to_bits(),
        result.sample_percentages_of_expected()["A"].to_bits()
    );
}

#[test]
fn test_unnamed_sample_serializes_null_id() {
    let reference = simple_reference();
    let result = MiqScoreCalculator::new(&reference, "16S", ScoringParams::default())
        .unwrap()
        .calculate(&counts(&[("A", 1.0), ("B", 1.0)]), None)
        .unwrap();
    let json = render_result_json(&result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["sampleID"].is_null());
    assert_eq!(value["plots"], serde_json::json!({}));
}

#[test]
fn test_combined_read_counts() {
    let report = MiqScoreReport::from_json_str(
        r#"{"nonreferenceReadCounts": {"Unmapped": 5}, "miqScore": 90, "rawMiq": 90,
            "percentToleranceInStandard": 0, "readFateTable": {},
            "referenceReadCounts": {"A": 10, "B": 20}, "sampleID": "x",
            "samplePercentages": {}, "samplePercentagesOfExpected": {}}"#,
    )
    .unwrap();
    assert!(report.plots.is_empty());
    assert_eq!(
        report.combined_read_counts(),
        counts(&[("A", 10.0), ("B", 20.0), ("Unmapped", 5.0)])
    );
}

#[test]
fn test_read_fate_chart_body() {
    let fates = counts(&[("Reference", 800.0), ("Unmapped", 12.3456)]);
    let body =
        generate_read_fate_chart_body(&fates, Some(&default_read_fate_print_names())).unwrap();
    assert!(body.contains(">Aligned To Reference</td>"));
    assert!(body.contains(">800.00</td>"));
    assert!(body.contains(">12.35</td>"));
    assert_eq!(body.matches("<tr").count(), 2);
}

#[test]
fn test_score_display_rounds_half_to_even() {
    assert_eq!(format_score(62.5), "62");
    assert_eq!(format_score(63.5), "64");
    assert_eq!(format_score(62.51), "63");
    assert_eq!(format_score(0.0), "0");
}

#[test]
fn test_report_score_for_tied_half() {
    let dir = tempfile::tempdir().unwrap();
    let reference = simple_reference();
    let ex = score(&reference, &counts(&[("A", 1.0), ("B", 1.0)]), "ex", 0.0);
    let path = write_example(dir.path(), "ex.json", &ex);
    let exemplars = load_example_data(&path, &path, &reference, "16S", DEFAULT_SORTING).unwrap();

    let mut sample = score(&reference, &counts(&[("A", 6875.0), ("B", 3125.0)]), "S1", 0.0);
    assert!(approx_eq(sample.miq_score(), 62.5));
    let paths =
        write_reports(&mut sample, Some(&exemplars), dir.path(), &ReportOptions::default())
            .unwrap();
    let html = std::fs::read_to_string(paths.html.unwrap()).unwrap();
    assert!(html.contains("MIQ score: 62<"));
}

#[test]
fn test_perform_replacement() {
    let mut table = BTreeMap::new();
    table.insert("NAME", "S1".to_string());
    table.insert("SCORE", "88".to_string());
    let out = perform_replacement("%%NAME%% scored %%SCORE%% (%%NAME%%) %%OTHER%%", &table);
    assert_eq!(out, "S1 scored 88 (S1) %%OTHER%%");
}

#[test]
fn test_summary_text_uses_print_names() {
    let reference = simple_reference();
    let result = score(
        &reference,
        &counts(&[("a_raw", 750.0), ("B", 250.0), ("Unmapped", 10.0)]),
        "S1",
        0.0,
    );
    let text = render_summary_text(&result);
    assert!(text.contains("Sample: S1"));
    assert!(text.contains("MIQ score: 50.00"));
    assert!(text.contains("Alpha: 75.00 / 150.00"));
    assert!(text.contains("Unmapped: 10"));
}

#[test]
fn test_exemplars_and_html_report() {
    let dir = tempfile::tempdir().unwrap();
    let reference = simple_reference();
    let good_result = score(&reference, &counts(&[("A", 510.0), ("B", 490.0)]), "good", 2.0);
    let bad_result = score(
        &reference,
        &counts(&[("A", 900.0), ("B", 100.0), ("Unmapped", 40.0)]),
        "bad",
        0.0,
    );
    let good_path = write_example(dir.path(), "good.json", &good_result);
    let bad_path = write_example(dir.path(), "bad.json", &bad_result);

    let exemplars =
        load_example_data(&good_path, &bad_path, &reference, "16S", DEFAULT_SORTING).unwrap();
    assert_eq!(exemplars.good.sample_id(), Some("good"));
    assert_eq!(exemplars.good.percent_tolerance_in_standard(), 2.0);
    assert!(approx_eq(exemplars.bad.miq_score(), bad_result.miq_score()));
    assert!(exemplars.bad.plot(ArtifactKind::RadarPlots).is_some());
    assert!(exemplars.bad.plot(ArtifactKind::CompositionPlot).is_some());

    let (good_comp, bad_comp) =
        load_reference_composition_from_example_miq(&good_path, &bad_path).unwrap();
    assert!(approx_eq(good_comp["A"], 51.0));
    assert!(approx_eq(bad_comp["B"], 10.0));

    let mut sample = score(&reference, &counts(&[("A", 700.0), ("B", 300.0)]), "S1", 0.0);
    let out_dir = dir.path().join("out");
    let paths = write_reports(&mut sample, Some(&exemplars), &out_dir, &ReportOptions::default())
        .unwrap();
    let html = std::fs::read_to_string(paths.html.unwrap()).unwrap();
    assert!(html.contains("<h1>S1</h1>"));
    assert!(html.contains("MIQ score: 60"));
    assert!(!html.contains("%%"));
    assert!(paths.json.is_file());
    assert!(paths.summary.is_file());

    let saved = MiqScoreReport::load(&paths.json).unwrap();
    assert_eq!(saved.sample_id.as_deref(), Some("S1"));
    assert_eq!(saved.plots.len(), 3);
}

#[test]
fn test_report_requires_rendered_charts() {
    let dir = tempfile::tempdir().unwrap();
    let reference = simple_reference();
    let ex = score(&reference, &counts(&[("A", 1.0), ("B", 1.0)]), "ex", 0.0);
    let path = write_example(dir.path(), "ex.json", &ex);
    let exemplars = load_example_data(&path, &path, &reference, "16S", DEFAULT_SORTING).unwrap();

    let sample = score(&reference, &counts(&[("A", 1.0), ("B", 1.0)]), "S1", 0.0);
    let err = html::generate_report(
        html::DEFAULT_TEMPLATE,
        &sample,
        &exemplars,
        DEFAULT_SORTING,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, MiqError::MissingArtifact(_)));
}

#[test]
fn test_write_reports_without_exemplars() {
    let dir = tempfile::tempdir().unwrap();
    let reference = simple_reference();
    let mut sample = score(&reference, &counts(&[("A", 1.0), ("B", 3.0)]), "S1", 0.0);
    let paths = write_reports(&mut sample, None, dir.path(), &ReportOptions::default()).unwrap();
    assert!(paths.html.is_none());
    assert!(dir.path().join("miq_score.json").is_file());
}

#[test]
fn test_missing_exemplar_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = simple_reference();
    let missing = dir.path().join("missing.json");
    let err = load_example_data(&missing, &missing, &reference, "16S", DEFAULT_SORTING)
        .unwrap_err();
    assert!(matches!(err, MiqError::NotFound(_)));
}

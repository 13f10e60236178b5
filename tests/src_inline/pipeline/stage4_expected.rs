use proptest::prelude::*;

use super::*;
use crate::test_support::{approx_eq, counts};

#[test]
fn test_percent_of_expected() {
    let observed = counts(&[("A", 75.0), ("B", 25.0)]);
    let expected = counts(&[("A", 50.0), ("B", 50.0), ("C", 0.0)]);
    let out = observed_percent_of_expected(&observed, &expected).unwrap();
    assert_eq!(out.len(), 2);
    assert!(approx_eq(out["A"], 150.0));
    assert!(approx_eq(out["B"], 50.0));
}

#[test]
fn test_unobserved_expected_source_is_zero() {
    let observed = counts(&[("A", 100.0), ("B", 0.0)]);
    let expected = counts(&[("A", 50.0), ("B", 50.0)]);
    let out = observed_percent_of_expected(&observed, &expected).unwrap();
    assert_eq!(out["B"], 0.0);
    assert!(approx_eq(out["A"], 200.0));
}

#[test]
fn test_unexpected_observed_source_rejected() {
    let observed = counts(&[("A", 60.0), ("Unmapped", 40.0)]);
    let expected = counts(&[("A", 50.0), ("B", 50.0)]);
    match observed_percent_of_expected(&observed, &expected) {
        Err(MiqError::InvariantViolation { observed, expected }) => {
            assert_eq!(observed, vec!["A", "Unmapped"]);
            assert_eq!(expected, vec!["A", "B"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_observed_zero_for_unexpected_is_allowed() {
    let observed = counts(&[("A", 100.0), ("C", 0.0)]);
    let expected = counts(&[("A", 100.0), ("C", 0.0)]);
    let out = observed_percent_of_expected(&observed, &expected).unwrap();
    assert_eq!(out, counts(&[("A", 100.0)]));
}

#[test]
fn test_convert_decimal_percentages() {
    let fractions = counts(&[("A", 0.25), ("B", 0.75)]);
    assert_eq!(
        convert_decimal_percentages(&fractions),
        counts(&[("A", 25.0), ("B", 75.0)])
    );
    let already = counts(&[("A", 25.0), ("B", 75.0)]);
    assert_eq!(convert_decimal_percentages(&already), already);
}

#[test]
fn test_fill_in_missing_percent_portion() {
    let partial = counts(&[("A", 30.0), ("B", 50.0)]);
    let filled = fill_in_missing_percent_portion(&partial);
    assert!(approx_eq(filled["A"], 37.5));
    assert!(approx_eq(filled["B"], 62.5));

    let nearly = counts(&[("A", 49.5), ("B", 50.0)]);
    assert_eq!(fill_in_missing_percent_portion(&nearly), nearly);

    let zeros = counts(&[("A", 0.0)]);
    assert_eq!(fill_in_missing_percent_portion(&zeros), zeros);
}

proptest! {
    #[test]
    fn prop_foreign_observed_key_always_rejected(
        expected in prop::collection::btree_map("[A-E]", 1.0f64..100.0, 1..5),
        extra in 0.1f64..100.0,
    ) {
        let mut observed = expected.clone();
        observed.insert("Z".to_string(), extra);
        let rejected = matches!(
            observed_percent_of_expected(&observed, &expected),
            Err(MiqError::InvariantViolation { .. })
        );
        prop_assert!(rejected);
    }
}

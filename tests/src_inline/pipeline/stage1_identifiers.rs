use super::*;
use crate::pipeline::sum_values;
use crate::test_support::{counts, simple_reference};

#[test]
fn test_lookup_and_identity_fallback() {
    let reference = simple_reference();
    let raw = counts(&[("a_raw", 10.0), ("b_raw", 5.0), ("chimera", 2.0)]);
    let out = convert_to_standard_identifiers(&raw, &reference);
    assert_eq!(out, counts(&[("A", 10.0), ("B", 5.0), ("chimera", 2.0)]));
}

#[test]
fn test_aliases_are_summed_and_total_conserved() {
    let reference = simple_reference();
    let raw = counts(&[("a_raw", 10.0), ("a_alt", 7.0), ("A", 3.0), ("B", 1.0)]);
    let out = convert_to_standard_identifiers(&raw, &reference);
    assert_eq!(out["A"], 20.0);
    assert_eq!(out.len(), 2);
    assert_eq!(sum_values(&out), sum_values(&raw));
}

#[test]
fn test_print_identifiers() {
    let reference = simple_reference();
    let canonical = counts(&[("A", 4.0), ("C", 1.0), ("Unmapped", 9.0)]);
    let out = convert_to_print_identifiers(&canonical, &reference);
    assert_eq!(
        out,
        counts(&[("Alpha", 4.0), ("Gamma", 1.0), ("Unmapped", 9.0)])
    );
}

#[test]
fn test_empty_input() {
    let reference = simple_reference();
    assert!(convert_to_standard_identifiers(&ReadCounts::new(), &reference).is_empty());
}

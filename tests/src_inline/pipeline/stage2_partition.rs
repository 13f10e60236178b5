use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;
use crate::test_support::counts;

fn sources(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_split_with_zero_fill() {
    let observed = counts(&[("A", 10.0), ("Unmapped", 4.0), ("Host", 1.0)]);
    let part = separate_reference_reads(&observed, &sources(&["A", "B"]));
    assert_eq!(part.reference, counts(&[("A", 10.0), ("B", 0.0)]));
    assert_eq!(part.non_reference, counts(&[("Host", 1.0), ("Unmapped", 4.0)]));
}

#[test]
fn test_nothing_observed() {
    let part = separate_reference_reads(&ReadCounts::new(), &sources(&["A", "B"]));
    assert_eq!(part.reference, counts(&[("A", 0.0), ("B", 0.0)]));
    assert!(part.non_reference.is_empty());
}

proptest! {
    #[test]
    fn prop_reference_keys_equal_expected(
        observed in prop::collection::btree_map("[A-F]", 0.0f64..1e6, 0..6),
        expected in prop::collection::btree_set("[A-F]", 1..6),
    ) {
        let part = separate_reference_reads(&observed, &expected);
        let keys: BTreeSet<String> = part.reference.keys().cloned().collect();
        prop_assert_eq!(&keys, &expected);
        for (k, v) in &observed {
            let rebuilt = part.reference.get(k).copied().unwrap_or(0.0)
                + part.non_reference.get(k).copied().unwrap_or(0.0);
            prop_assert_eq!(rebuilt, *v);
        }
        for k in part.non_reference.keys() {
            prop_assert!(!expected.contains(k));
        }
    }
}

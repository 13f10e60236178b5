use std::collections::BTreeSet;

use crate::error::{MiqError, Result};
use crate::pipeline::{Percentages, sum_values};
use crate::reference::ExpectedValues;

fn nonzero_keys(map: &Percentages) -> BTreeSet<String> {
    map.iter()
        .filter(|(_, v)| **v != 0.0)
        .map(|(k, _)| k.clone())
        .collect()
}

/// Observed percentage of each expected source as a percentage of its
/// expected value (100 means a perfect match). Keyed by exactly the sources
/// with a non-zero expected value.
pub fn observed_percent_of_expected(
    observed: &Percentages,
    expected: &ExpectedValues,
) -> Result<Percentages> {
    let observed_sources = nonzero_keys(observed);
    let expected_sources = nonzero_keys(expected);
    if !observed_sources.is_subset(&expected_sources) {
        return Err(MiqError::InvariantViolation {
            observed: observed_sources.into_iter().collect(),
            expected: expected_sources.into_iter().collect(),
        });
    }
    let mut out = Percentages::new();
    for source in expected_sources {
        let value = if observed_sources.contains(&source) {
            observed[&source] / expected[&source] * 100.0
        } else {
            0.0
        };
        out.insert(source, value);
    }
    Ok(out)
}

/// Scales fractional values (total of 2 or less) up to percentages.
pub fn convert_decimal_percentages(values: &Percentages) -> Percentages {
    if sum_values(values) > 2.0 {
        return values.clone();
    }
    values.iter().map(|(k, v)| (k.clone(), v * 100.0)).collect()
}

/// Spreads a missing share (more than one percentage point short of 100)
/// over the present entries in proportion to their weight.
pub fn fill_in_missing_percent_portion(values: &Percentages) -> Percentages {
    let total = sum_values(values);
    if total == 0.0 {
        return values.clone();
    }
    let missing = 100.0 - total;
    if missing <= 1.0 {
        return values.clone();
    }
    values
        .iter()
        .map(|(k, v)| (k.clone(), v + missing * (v / total)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_expected.rs"]
mod tests;

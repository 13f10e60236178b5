use crate::pipeline::{Percentages, ReadCounts, sum_values};

/// Converts absolute counts to percentages of their own total.
///
/// An all-zero (or empty) map is returned unchanged rather than divided.
pub fn convert_to_percentages(counts: &ReadCounts) -> Percentages {
    let total = sum_values(counts);
    if total == 0.0 {
        return counts.clone();
    }
    counts
        .iter()
        .map(|(k, v)| (k.clone(), v / total * 100.0))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_percentages.rs"]
mod tests;

use std::collections::BTreeSet;

use crate::pipeline::ReadCounts;

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPartition {
    /// Keyed by exactly the expected sources, zero-filled when unobserved.
    pub reference: ReadCounts,
    /// Every observed identifier outside the expected sources.
    pub non_reference: ReadCounts,
}

pub fn separate_reference_reads(
    observed: &ReadCounts,
    expected_sources: &BTreeSet<String>,
) -> ReadPartition {
    let mut reference = ReadCounts::new();
    let mut non_reference = ReadCounts::new();
    for (source, count) in observed {
        if expected_sources.contains(source) {
            reference.insert(source.clone(), *count);
        } else {
            non_reference.insert(source.clone(), *count);
        }
    }
    for source in expected_sources {
        reference.entry(source.clone()).or_insert(0.0);
    }
    ReadPartition {
        reference,
        non_reference,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_partition.rs"]
mod tests;

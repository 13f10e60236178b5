use crate::pipeline::ReadCounts;
use crate::reference::StandardReference;

/// Re-keys raw counts by canonical identifier. Labels missing from the
/// reference lookup keep their raw name; colliding labels are summed.
pub fn convert_to_standard_identifiers(
    counts: &ReadCounts,
    reference: &StandardReference,
) -> ReadCounts {
    let mut out = ReadCounts::new();
    for (raw, value) in counts {
        let canonical = reference.canonical_name(raw);
        *out.entry(canonical.to_string()).or_insert(0.0) += value;
    }
    out
}

pub fn convert_to_print_identifiers(
    counts: &ReadCounts,
    reference: &StandardReference,
) -> ReadCounts {
    let mut out = ReadCounts::new();
    for (id, value) in counts {
        let label = reference.print_name(id);
        *out.entry(label.to_string()).or_insert(0.0) += value;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_identifiers.rs"]
mod tests;

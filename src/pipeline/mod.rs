use std::collections::BTreeMap;

pub mod stage1_identifiers;
pub mod stage2_partition;
pub mod stage3_percentages;
pub mod stage4_expected;
pub mod stage5_score;

/// Absolute read counts keyed by identifier (raw or canonical depending on stage).
pub type ReadCounts = BTreeMap<String, f64>;

/// Percentages keyed by identifier, summing to 100 over their own key set
/// unless derived from an all-zero count map.
pub type Percentages = BTreeMap<String, f64>;

pub use stage5_score::{MiqScoreCalculator, ScoreFloor, ScoringParams};

/// Sum of the values in a count or percentage map. The empty-string key is
/// left out of the total but is still carried through conversions.
pub fn sum_values(map: &BTreeMap<String, f64>) -> f64 {
    map.iter()
        .filter(|(key, _)| !key.is_empty())
        .map(|(_, value)| value)
        .sum()
}

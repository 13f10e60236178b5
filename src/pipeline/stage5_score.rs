use std::collections::BTreeSet;

use crate::error::{MiqError, Result};
use crate::model::result::{MiqScoreData, ScoreComponents};
use crate::pipeline::stage1_identifiers::convert_to_standard_identifiers;
use crate::pipeline::stage2_partition::separate_reference_reads;
use crate::pipeline::stage3_percentages::convert_to_percentages;
use crate::pipeline::stage4_expected::observed_percent_of_expected;
use crate::pipeline::{Percentages, ReadCounts};
use crate::reference::StandardReference;

/// Lower bound applied to the raw score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreFloor {
    /// Report the raw score unclamped.
    None,
    Value(f64),
}

impl Default for ScoreFloor {
    fn default() -> Self {
        ScoreFloor::Value(0.0)
    }
}

impl ScoreFloor {
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            ScoreFloor::None => raw,
            ScoreFloor::Value(floor) => raw.max(floor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringParams {
    /// Deviation from the expected composition, in percent-of-expected
    /// points, that is tolerated without penalty.
    pub tolerance_percent: f64,
    pub floor: ScoreFloor,
}

impl ScoringParams {
    pub fn new(tolerance_percent: f64, floor: ScoreFloor) -> Self {
        Self {
            tolerance_percent,
            floor,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(MiqError::Config(format!(
                "percent tolerance must be a non-negative number, got {}",
                self.tolerance_percent
            )));
        }
        if let ScoreFloor::Value(floor) = self.floor {
            if !floor.is_finite() {
                return Err(MiqError::Config(format!(
                    "score floor must be finite, got {floor}"
                )));
            }
        }
        Ok(())
    }
}

/// Squared error contributed by one read source after tolerance banding.
pub fn adjusted_squared_error(unadjusted_error: f64, tolerance_percent: f64) -> f64 {
    if tolerance_percent > 0.0 {
        let magnitude = unadjusted_error.abs();
        if magnitude <= tolerance_percent {
            0.0
        } else {
            (magnitude - tolerance_percent).powi(2)
        }
    } else {
        unadjusted_error.powi(2)
    }
}

/// `100 - RMSE` of the tolerance-adjusted percent-of-expected deviations.
pub fn raw_miq_score(percent_of_expected: &Percentages, tolerance_percent: f64) -> f64 {
    if percent_of_expected.is_empty() {
        return 100.0;
    }
    let total: f64 = percent_of_expected
        .values()
        .map(|v| adjusted_squared_error(100.0 - v, tolerance_percent))
        .sum();
    let mean_squared = total / percent_of_expected.len() as f64;
    100.0 - mean_squared.sqrt()
}

/// Scores samples against one analysis method of a reference standard.
#[derive(Debug, Clone)]
pub struct MiqScoreCalculator<'a> {
    reference: &'a StandardReference,
    analysis_method: String,
    params: ScoringParams,
    expected_sources: BTreeSet<String>,
}

impl<'a> MiqScoreCalculator<'a> {
    pub fn new(
        reference: &'a StandardReference,
        analysis_method: &str,
        params: ScoringParams,
    ) -> Result<Self> {
        if !reference.has_analysis_method(analysis_method) {
            return Err(MiqError::UnknownAnalysisMethod {
                method: analysis_method.to_string(),
                available: reference.analysis_methods().to_vec(),
            });
        }
        params.validate()?;
        let expected_sources = reference.expected_sources(analysis_method)?;
        tracing::debug!(
            "MIQ calculator for {} with {} expected read sources",
            analysis_method,
            expected_sources.len()
        );
        Ok(Self {
            reference,
            analysis_method: analysis_method.to_string(),
            params,
            expected_sources,
        })
    }

    pub fn analysis_method(&self) -> &str {
        &self.analysis_method
    }

    pub fn params(&self) -> ScoringParams {
        self.params
    }

    pub fn expected_sources(&self) -> &BTreeSet<String> {
        &self.expected_sources
    }

    /// Scores absolute read counts keyed by raw identifiers.
    pub fn calculate(
        &self,
        sample_counts: &ReadCounts,
        sample_id: Option<&str>,
    ) -> Result<MiqScoreData<'a>> {
        let normalized = convert_to_standard_identifiers(sample_counts, self.reference);
        let partition = separate_reference_reads(&normalized, &self.expected_sources);
        let sample_percentages = convert_to_percentages(&partition.reference);
        let expected = self.reference.expected_values(&self.analysis_method)?;
        let percent_of_expected = observed_percent_of_expected(&sample_percentages, expected)?;

        let raw_miq_score = raw_miq_score(&percent_of_expected, self.params.tolerance_percent);
        let miq_score = self.params.floor.apply(raw_miq_score);

        tracing::info!(
            "MIQ score for {}: {:.2} (raw {:.2}, method {}, tolerance {})",
            sample_id.unwrap_or("unnamed sample"),
            miq_score,
            raw_miq_score,
            self.analysis_method,
            self.params.tolerance_percent
        );

        let components = ScoreComponents {
            miq_score,
            raw_miq_score,
            partition,
            sample_percentages,
            percent_of_expected,
        };
        Ok(MiqScoreData::new(
            components,
            self.params.tolerance_percent,
            &self.analysis_method,
            self.reference,
            sample_id.map(str::to_string),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_score.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::read_json;
use crate::model::{Artifact, MiqScoreData};
use crate::pipeline::{Percentages, ReadCounts};

/// Serialized form of a scored sample. Key names are part of the exchange
/// format and are read back by exemplar loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiqScoreReport {
    #[serde(rename = "nonreferenceReadCounts")]
    pub nonreference_read_counts: ReadCounts,
    #[serde(rename = "miqScore")]
    pub miq_score: f64,
    #[serde(rename = "rawMiq")]
    pub raw_miq: f64,
    #[serde(rename = "percentToleranceInStandard")]
    pub percent_tolerance_in_standard: f64,
    #[serde(default)]
    pub plots: BTreeMap<String, Artifact>,
    #[serde(rename = "readFateTable")]
    pub read_fate_table: Percentages,
    #[serde(rename = "referenceReadCounts")]
    pub reference_read_counts: ReadCounts,
    #[serde(rename = "sampleID")]
    pub sample_id: Option<String>,
    #[serde(rename = "samplePercentages")]
    pub sample_percentages: Percentages,
    #[serde(rename = "samplePercentagesOfExpected")]
    pub sample_percentages_of_expected: Percentages,
}

impl MiqScoreReport {
    pub fn from_result(result: &MiqScoreData<'_>) -> Self {
        Self {
            nonreference_read_counts: result.nonreference_read_counts().clone(),
            miq_score: result.miq_score(),
            raw_miq: result.raw_miq_score(),
            percent_tolerance_in_standard: result.percent_tolerance_in_standard(),
            plots: result.plots().to_serialized(),
            read_fate_table: result.read_fate_table().clone(),
            reference_read_counts: result.reference_read_counts().clone(),
            sample_id: result.sample_id().map(str::to_string),
            sample_percentages: result.sample_percentages().clone(),
            sample_percentages_of_expected: result.sample_percentages_of_expected().clone(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reference and non-reference counts merged back into one sample.
    pub fn combined_read_counts(&self) -> ReadCounts {
        let mut counts = self.nonreference_read_counts.clone();
        counts.extend(
            self.reference_read_counts
                .iter()
                .map(|(k, v)| (k.clone(), *v)),
        );
        counts
    }
}

pub fn render_result_json(result: &MiqScoreData<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&MiqScoreReport::from_result(
        result,
    ))?)
}

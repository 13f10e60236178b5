use std::path::Path;

use crate::error::Result;
use crate::model::MiqScoreData;
use crate::pipeline::stage3_percentages::convert_to_percentages;
use crate::pipeline::{MiqScoreCalculator, Percentages, ScoreFloor, ScoringParams};
use crate::reference::StandardReference;
use crate::report::json::MiqScoreReport;

/// Previously scored samples showing what a good and a biased run look like.
#[derive(Debug, Clone)]
pub struct Exemplars<'a> {
    pub good: MiqScoreData<'a>,
    pub bad: MiqScoreData<'a>,
}

/// Rescores a serialized result against `reference`, using the tolerance
/// recorded in it and a floor of 0, and renders every chart kind.
fn rescore_example<'a>(
    path: &Path,
    reference: &'a StandardReference,
    analysis_method: &str,
    sorting: &str,
) -> Result<MiqScoreData<'a>> {
    let report = MiqScoreReport::load(path)?;
    let params = ScoringParams::new(report.percent_tolerance_in_standard, ScoreFloor::Value(0.0));
    let calculator = MiqScoreCalculator::new(reference, analysis_method, params)?;
    let mut result =
        calculator.calculate(&report.combined_read_counts(), report.sample_id.as_deref())?;
    result.make_read_fate_chart(false, None)?;
    result.make_radar_plots(false)?;
    result.make_composition_bar_plot(sorting, None, None, false)?;
    tracing::info!(
        "loaded exemplar {} (MIQ {:.2})",
        path.display(),
        result.miq_score()
    );
    Ok(result)
}

pub fn load_example_data<'a>(
    good_path: &Path,
    bad_path: &Path,
    reference: &'a StandardReference,
    analysis_method: &str,
    sorting: &str,
) -> Result<Exemplars<'a>> {
    let good = rescore_example(good_path, reference, analysis_method, sorting)?;
    let bad = rescore_example(bad_path, reference, analysis_method, sorting)?;
    Ok(Exemplars { good, bad })
}

/// Reference-read compositions (percent) of the good and biased exemplars.
pub fn load_reference_composition_from_example_miq(
    good_path: &Path,
    bad_path: &Path,
) -> Result<(Percentages, Percentages)> {
    let good = MiqScoreReport::load(good_path)?;
    let bad = MiqScoreReport::load(bad_path)?;
    Ok((
        convert_to_percentages(&good.reference_read_counts),
        convert_to_percentages(&bad.reference_read_counts),
    ))
}

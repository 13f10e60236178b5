use std::collections::BTreeMap;

use crate::error::{MiqError, Result};
use crate::model::artifacts::{Artifact, ArtifactCache, ArtifactKind};
use crate::pipeline::stage2_partition::ReadPartition;
use crate::pipeline::stage3_percentages::convert_to_percentages;
use crate::pipeline::stage4_expected::{
    convert_decimal_percentages, fill_in_missing_percent_portion,
};
use crate::pipeline::{Percentages, ReadCounts, sum_values};
use crate::plotting::radar::{RadarPlot, render_radar_plot};
use crate::plotting::read_fate::{LEADING_FATE, render_read_fate_chart};
use crate::plotting::encode_svg;
use crate::plotting::stacked_bar::{StackedBar, render_stacked_bar};
use crate::reference::StandardReference;

/// Name of the synthesized read-fate bucket holding all reference reads.
pub const REFERENCE_FATE: &str = "Reference";

/// Label used for the sample bar and titles when no sample ID was given.
pub const UNNAMED_SAMPLE: &str = "Sample";

#[derive(Debug, Clone)]
pub struct ScoreComponents {
    pub miq_score: f64,
    pub raw_miq_score: f64,
    pub partition: ReadPartition,
    pub sample_percentages: Percentages,
    pub percent_of_expected: Percentages,
}

/// What the cached composition plot was drawn from.
#[derive(Debug, Clone, PartialEq)]
struct CompositionInputs {
    sorting: String,
    good_example: Option<Percentages>,
    bad_example: Option<Percentages>,
}

/// Outcome of scoring one sample, with every intermediate mapping and a
/// cache of rendered charts.
#[derive(Debug, Clone)]
pub struct MiqScoreData<'a> {
    miq_score: f64,
    raw_miq_score: f64,
    reference_read_counts: ReadCounts,
    nonreference_read_counts: ReadCounts,
    sample_percentages: Percentages,
    sample_percentages_of_expected: Percentages,
    percent_tolerance_in_standard: f64,
    analysis_method: String,
    reference: &'a StandardReference,
    read_fate_table: Percentages,
    sample_id: Option<String>,
    plots: ArtifactCache,
    composition_inputs: Option<CompositionInputs>,
}

/// Non-reference counts plus one `Reference` bucket with the summed reference reads.
pub fn absolute_read_fates(reference: &ReadCounts, non_reference: &ReadCounts) -> ReadCounts {
    let mut fates = non_reference.clone();
    fates.insert(REFERENCE_FATE.to_string(), sum_values(reference));
    fates
}

impl<'a> MiqScoreData<'a> {
    pub fn new(
        components: ScoreComponents,
        percent_tolerance_in_standard: f64,
        analysis_method: &str,
        reference: &'a StandardReference,
        sample_id: Option<String>,
    ) -> Self {
        let ScoreComponents {
            miq_score,
            raw_miq_score,
            partition,
            sample_percentages,
            percent_of_expected,
        } = components;
        let read_fate_table = convert_to_percentages(&absolute_read_fates(
            &partition.reference,
            &partition.non_reference,
        ));
        Self {
            miq_score,
            raw_miq_score,
            reference_read_counts: partition.reference,
            nonreference_read_counts: partition.non_reference,
            sample_percentages,
            sample_percentages_of_expected: percent_of_expected,
            percent_tolerance_in_standard,
            analysis_method: analysis_method.to_string(),
            reference,
            read_fate_table,
            sample_id,
            plots: ArtifactCache::default(),
            composition_inputs: None,
        }
    }

    /// Disables (or re-enables) caching of rendered charts on this result.
    pub fn with_store_plots(mut self, store: bool) -> Self {
        self.plots = ArtifactCache::new(store);
        self.composition_inputs = None;
        self
    }

    pub fn miq_score(&self) -> f64 {
        self.miq_score
    }

    pub fn raw_miq_score(&self) -> f64 {
        self.raw_miq_score
    }

    pub fn reference_read_counts(&self) -> &ReadCounts {
        &self.reference_read_counts
    }

    pub fn nonreference_read_counts(&self) -> &ReadCounts {
        &self.nonreference_read_counts
    }

    pub fn sample_percentages(&self) -> &Percentages {
        &self.sample_percentages
    }

    pub fn sample_percentages_of_expected(&self) -> &Percentages {
        &self.sample_percentages_of_expected
    }

    pub fn percent_tolerance_in_standard(&self) -> f64 {
        self.percent_tolerance_in_standard
    }

    pub fn analysis_method(&self) -> &str {
        &self.analysis_method
    }

    pub fn reference(&self) -> &'a StandardReference {
        self.reference
    }

    pub fn read_fate_table(&self) -> &Percentages {
        &self.read_fate_table
    }

    pub fn sample_id(&self) -> Option<&str> {
        self.sample_id.as_deref()
    }

    pub fn plots(&self) -> &ArtifactCache {
        &self.plots
    }

    pub fn plot(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.plots.get(kind)
    }

    fn sample_label(&self) -> &str {
        self.sample_id.as_deref().unwrap_or(UNNAMED_SAMPLE)
    }

    /// Pie chart of the read-fate table, optionally relabelled through
    /// `print_names`.
    pub fn make_read_fate_chart(
        &mut self,
        force_redraw: bool,
        print_names: Option<&BTreeMap<String, String>>,
    ) -> Result<String> {
        let table = &self.read_fate_table;
        let sample_id = self.sample_id.as_deref();
        let artifact = self
            .plots
            .get_or_render(ArtifactKind::ReadFates, force_redraw, || {
                let fates: Vec<(String, f64)> = table
                    .iter()
                    .map(|(fate, v)| {
                        let label = print_names
                            .and_then(|names| names.get(fate))
                            .unwrap_or(fate);
                        (label.clone(), *v)
                    })
                    .collect();
                let svg = render_read_fate_chart(&fates, sample_id, &[LEADING_FATE])?;
                Ok(Artifact::Image(encode_svg(&svg)))
            })?;
        into_image(artifact, ArtifactKind::ReadFates)
    }

    /// One radar plot of percent-of-expected per reference sorting.
    pub fn make_radar_plots(&mut self, force_redraw: bool) -> Result<BTreeMap<String, String>> {
        let reference = self.reference;
        let reference_counts = &self.reference_read_counts;
        let percent_of_expected = &self.sample_percentages_of_expected;
        let sample_id = self.sample_id.as_deref();
        let artifact = self
            .plots
            .get_or_render(ArtifactKind::RadarPlots, force_redraw, || {
                let mut plots = BTreeMap::new();
                for (name, sorting) in reference.sortings() {
                    let ordered: Vec<String> = sorting
                        .items
                        .iter()
                        .filter(|item| reference_counts.contains_key(*item))
                        .cloned()
                        .collect();
                    let title = match sample_id {
                        Some(id) => format!("{id}: Sorted By {name}"),
                        None => name.clone(),
                    };
                    let mut data = BTreeMap::new();
                    data.insert(title, percent_of_expected.clone());
                    let svg = render_radar_plot(&RadarPlot {
                        data: &data,
                        rank_order: &ordered,
                        ordered_feature: name,
                        top_high: sorting.top_high(),
                        print_names: Some(reference.print_names()),
                    })?;
                    plots.insert(name.clone(), encode_svg(&svg));
                }
                Ok(Artifact::ImageSet(plots))
            })?;
        match artifact {
            Artifact::ImageSet(set) => Ok(set),
            Artifact::Image(_) => Err(MiqError::MissingArtifact(
                ArtifactKind::RadarPlots.key().to_string(),
            )),
        }
    }

    /// Stacked bars of the theoretical composition against the sample, with
    /// optional good and biased exemplar compositions alongside.
    ///
    /// The cached plot is reused only when drawn from the same sorting and
    /// exemplar compositions.
    pub fn make_composition_bar_plot(
        &mut self,
        sorting: &str,
        good_example: Option<&Percentages>,
        bad_example: Option<&Percentages>,
        force_redraw: bool,
    ) -> Result<String> {
        let reference = self.reference;
        let expected_raw = reference.expected_values(&self.analysis_method)?;
        let order = &reference.sorting(sorting)?.items;
        let value_order: Vec<String> = order
            .iter()
            .filter(|id| self.sample_percentages.contains_key(*id))
            .cloned()
            .collect();
        let expected: Percentages = expected_raw
            .iter()
            .filter(|(_, v)| **v != 0.0)
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        let sample_label = self.sample_label().to_string();
        let mut table = BTreeMap::new();
        table.insert("Theoretical".to_string(), expected);
        table.insert(
            sample_label.clone(),
            convert_to_percentages(&self.reference_read_counts),
        );
        let mut sample_order = vec!["Theoretical".to_string()];
        if let Some(good) = good_example {
            table.insert("Good".to_string(), prepare_exemplar_composition(good));
            sample_order.push("Good".to_string());
        }
        sample_order.push(sample_label.clone());
        if let Some(bad) = bad_example {
            table.insert("Biased".to_string(), prepare_exemplar_composition(bad));
            sample_order.push("Biased".to_string());
        }

        let inputs = CompositionInputs {
            sorting: sorting.to_string(),
            good_example: good_example.cloned(),
            bad_example: bad_example.cloned(),
        };
        let stale = self.composition_inputs.as_ref() != Some(&inputs);

        let title = format!("{sample_label} Composition");
        let artifact =
            self.plots
                .get_or_render(ArtifactKind::CompositionPlot, force_redraw || stale, || {
                    let svg = render_stacked_bar(&StackedBar {
                        data: &table,
                        value_order: &value_order,
                        sample_order: &sample_order,
                        title: &title,
                        print_names: Some(reference.print_names()),
                    })?;
                    Ok(Artifact::Image(encode_svg(&svg)))
                })?;
        if self.plots.is_storing() {
            self.composition_inputs = Some(inputs);
        }
        into_image(artifact, ArtifactKind::CompositionPlot)
    }
}

fn into_image(artifact: Artifact, kind: ArtifactKind) -> Result<String> {
    match artifact {
        Artifact::Image(s) => Ok(s),
        Artifact::ImageSet(_) => Err(MiqError::MissingArtifact(kind.key().to_string())),
    }
}

/// Exemplar compositions may come in as fractions or fall a little short of
/// 100; bring them onto the same scale as the sample before plotting.
fn prepare_exemplar_composition(values: &Percentages) -> Percentages {
    fill_in_missing_percent_portion(&convert_decimal_percentages(values))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/result.rs"]
mod tests;

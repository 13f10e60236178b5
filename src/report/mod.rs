use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::MiqScoreData;
use crate::model::result::REFERENCE_FATE;
use crate::plotting::read_fate::LEADING_FATE;

pub mod exemplars;
pub mod html;
pub mod json;
pub mod text;

use exemplars::Exemplars;
use html::generate_report;
use json::render_result_json;
use text::render_summary_text;

/// Sorting used for the composition plot and the report radar plots.
pub const DEFAULT_SORTING: &str = "Lysis Difficulty";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub sorting: String,
    pub template: String,
    pub read_fate_print_names: BTreeMap<String, String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sorting: DEFAULT_SORTING.to_string(),
            template: html::DEFAULT_TEMPLATE.to_string(),
            read_fate_print_names: default_read_fate_print_names(),
        }
    }
}

/// Displays the synthesized reference bucket as the leading pie slice.
pub fn default_read_fate_print_names() -> BTreeMap<String, String> {
    let mut names = BTreeMap::new();
    names.insert(REFERENCE_FATE.to_string(), LEADING_FATE.to_string());
    names
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub summary: PathBuf,
    pub html: Option<PathBuf>,
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

/// Renders the sample's charts and writes `miq_score.json`, `summary.txt`
/// and, when exemplars are available, `report.html` into `out_dir`.
pub fn write_reports(
    result: &mut MiqScoreData<'_>,
    exemplars: Option<&Exemplars<'_>>,
    out_dir: &Path,
    options: &ReportOptions,
) -> Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;

    result.make_read_fate_chart(false, Some(&options.read_fate_print_names))?;
    result.make_radar_plots(false)?;
    let (good, bad) = match exemplars {
        Some(ex) => (
            Some(ex.good.sample_percentages()),
            Some(ex.bad.sample_percentages()),
        ),
        None => (None, None),
    };
    result.make_composition_bar_plot(&options.sorting, good, bad, false)?;

    let json_path = out_dir.join("miq_score.json");
    write_text(&json_path, &render_result_json(result)?)?;

    let summary_path = out_dir.join("summary.txt");
    write_text(&summary_path, &render_summary_text(result))?;

    let html_path = match exemplars {
        Some(ex) => {
            let report = generate_report(
                &options.template,
                result,
                ex,
                &options.sorting,
                Some(&options.read_fate_print_names),
            )?;
            let path = out_dir.join("report.html");
            write_text(&path, &report)?;
            Some(path)
        }
        None => {
            tracing::warn!("no good/bad exemplars given; skipping HTML report");
            None
        }
    };

    tracing::info!("reports written to {}", out_dir.display());
    Ok(ReportPaths {
        json: json_path,
        summary: summary_path,
        html: html_path,
    })
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{MiqError, Result};
use crate::model::result::absolute_read_fates;
use crate::model::{ArtifactKind, MiqScoreData};
use crate::pipeline::ReadCounts;
use crate::plotting::escape_xml;
use crate::report::exemplars::Exemplars;
use crate::report::format_f64_2;

/// Minimal standalone report. Placeholders are `%%NAME%%`; images are
/// base64 SVG documents.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<title>MIQ score report: %%SAMPLENAME%%</title>
<style>
body{font-family:Arial,Helvetica,sans-serif;margin:20px;color:#222;background:#fff;}
h1{margin:0 0 8px 0;font-size:24px;}
h2{margin:24px 0 8px 0;font-size:20px;}
.score{font-size:48px;font-weight:bold;}
table{border-collapse:collapse;width:100%;max-width:600px;}
td{border:1px solid #ddd;padding:4px 8px;}
.radars img{width:32%;}
</style>
</head>
<body>
<h1>%%SAMPLENAME%%</h1>
<div class="score">MIQ score: %%MIQSCORE%%</div>
<h2>Read fates</h2>
<table>
%%READFATETABLE%%
</table>
<img src="data:image/svg+xml;base64,%%READFATECHART%%" alt="read fates"/>
<h2>Composition</h2>
<img src="data:image/svg+xml;base64,%%COMPOSITIONBARPLOT%%" alt="composition"/>
<h2>Lysis bias</h2>
<div class="radars">
<img src="data:image/svg+xml;base64,%%GOODRADARPLOT%%" alt="good example"/>
<img src="data:image/svg+xml;base64,%%SAMPLERADARPLOT%%" alt="sample"/>
<img src="data:image/svg+xml;base64,%%BADRADARPLOT%%" alt="biased example"/>
</div>
</body>
</html>
"#;

/// Table rows of read fate to value, fixed at two decimals.
pub fn generate_read_fate_chart_body(
    read_fates: &ReadCounts,
    print_names: Option<&BTreeMap<String, String>>,
) -> Result<String> {
    let mut out = String::new();
    for (fate, value) in read_fates {
        let label = print_names
            .and_then(|names| names.get(fate))
            .unwrap_or(fate);
        writeln!(out, "<tr style=\"height: 21px;\">")?;
        writeln!(
            out,
            "<td style=\"width: 50%; height: 21px;\">{}</td>",
            escape_xml(label)
        )?;
        writeln!(
            out,
            "<td style=\"width: 50%; height: 21px;\">{}</td>",
            format_f64_2(*value)
        )?;
        writeln!(out, "</tr>")?;
    }
    Ok(out)
}

/// Whole-number score for display; halves go to the even neighbour.
pub fn format_score(score: f64) -> String {
    format!("{}", score.round_ties_even() as i64)
}

/// Replaces every `%%KEY%%` in `template` with its value.
pub fn perform_replacement(template: &str, replacements: &BTreeMap<&str, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in replacements {
        out = out.replace(&format!("%%{key}%%"), value);
    }
    out
}

fn image(result: &MiqScoreData<'_>, kind: ArtifactKind) -> Result<String> {
    result
        .plot(kind)
        .and_then(|a| a.as_image())
        .map(str::to_string)
        .ok_or_else(|| MiqError::MissingArtifact(kind.key().to_string()))
}

fn radar_image(result: &MiqScoreData<'_>, sorting: &str) -> Result<String> {
    result
        .plot(ArtifactKind::RadarPlots)
        .and_then(|a| a.as_image_set())
        .and_then(|set| set.get(sorting))
        .cloned()
        .ok_or_else(|| {
            MiqError::MissingArtifact(format!("{}/{}", ArtifactKind::RadarPlots.key(), sorting))
        })
}

/// Fills `template` from a sample with rendered charts and two exemplars.
/// Charts are taken from the caches; nothing is rendered here.
pub fn generate_report(
    template: &str,
    sample: &MiqScoreData<'_>,
    exemplars: &Exemplars<'_>,
    sorting: &str,
    read_fate_print_names: Option<&BTreeMap<String, String>>,
) -> Result<String> {
    let fates = absolute_read_fates(
        sample.reference_read_counts(),
        sample.nonreference_read_counts(),
    );
    let mut replacements = BTreeMap::new();
    replacements.insert(
        "SAMPLENAME",
        escape_xml(sample.sample_id().unwrap_or_default()),
    );
    replacements.insert("MIQSCORE", format_score(sample.miq_score()));
    replacements.insert(
        "READFATETABLE",
        generate_read_fate_chart_body(&fates, read_fate_print_names)?,
    );
    replacements.insert("READFATECHART", image(sample, ArtifactKind::ReadFates)?);
    replacements.insert(
        "COMPOSITIONBARPLOT",
        image(sample, ArtifactKind::CompositionPlot)?,
    );
    replacements.insert("GOODRADARPLOT", radar_image(&exemplars.good, sorting)?);
    replacements.insert("SAMPLERADARPLOT", radar_image(sample, sorting)?);
    replacements.insert("BADRADARPLOT", radar_image(&exemplars.bad, sorting)?);
    Ok(perform_replacement(template, &replacements))
}

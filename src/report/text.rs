use crate::model::MiqScoreData;
use crate::pipeline::stage1_identifiers::convert_to_print_identifiers;
use crate::report::format_f64_2;

pub fn render_summary_text(result: &MiqScoreData<'_>) -> String {
    let mut out = String::new();

    out.push_str("MIQ Score Summary\n");
    out.push_str("=================\n\n");
    out.push_str(&format!(
        "Sample: {}\n",
        result.sample_id().unwrap_or("(unnamed)")
    ));
    out.push_str(&format!("Analysis method: {}\n", result.analysis_method()));
    out.push_str(&format!(
        "Percent tolerance in standard: {}\n",
        format_f64_2(result.percent_tolerance_in_standard())
    ));
    out.push_str(&format!("MIQ score: {}\n", format_f64_2(result.miq_score())));
    out.push_str(&format!(
        "Raw MIQ score: {}\n\n",
        format_f64_2(result.raw_miq_score())
    ));

    out.push_str("Composition (observed % / % of expected)\n");
    let reference = result.reference();
    for (id, pct) in result.sample_percentages() {
        let of_expected = result
            .sample_percentages_of_expected()
            .get(id)
            .copied()
            .unwrap_or(0.0);
        out.push_str(&format!(
            "  {}: {} / {}\n",
            reference.print_name(id),
            format_f64_2(*pct),
            format_f64_2(of_expected)
        ));
    }
    out.push('\n');

    out.push_str("Read fates (%)\n");
    for (fate, pct) in result.read_fate_table() {
        out.push_str(&format!("  {}: {}\n", fate, format_f64_2(*pct)));
    }

    if !result.nonreference_read_counts().is_empty() {
        out.push('\n');
        out.push_str("Non-reference reads\n");
        let labelled =
            convert_to_print_identifiers(result.nonreference_read_counts(), reference);
        for (label, count) in &labelled {
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }

    out
}

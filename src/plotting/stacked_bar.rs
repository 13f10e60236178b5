use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::error::{MiqError, Result};
use crate::pipeline::Percentages;
use crate::plotting::{escape_xml, fmt_coord, palette_color, svg_close, svg_open, svg_text};

const WIDTH: u32 = 700;
const HEIGHT: u32 = 500;
const PLOT_LEFT: f64 = 80.0;
const PLOT_RIGHT: f64 = 430.0;
const PLOT_TOP: f64 = 50.0;
const PLOT_BOTTOM: f64 = 400.0;
const BAR_WIDTH: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct StackedBar<'a> {
    /// Bar name to value per stacked segment.
    pub data: &'a BTreeMap<String, Percentages>,
    /// Segment order from the bottom up; every value in `data` must appear here.
    pub value_order: &'a [String],
    /// Bar order from left to right; must name exactly the bars in `data`.
    pub sample_order: &'a [String],
    pub title: &'a str,
    pub print_names: Option<&'a BTreeMap<String, String>>,
}

/// Tick label rotation and anchor for the given number of bars.
fn label_rotation(n_bars: usize) -> (f64, &'static str) {
    if n_bars >= 11 {
        (80.0, "middle")
    } else if n_bars >= 4 {
        (40.0, "end")
    } else if n_bars == 3 {
        (20.0, "end")
    } else {
        (0.0, "middle")
    }
}

fn y_for(value: f64) -> f64 {
    PLOT_BOTTOM - value / 100.0 * (PLOT_BOTTOM - PLOT_TOP)
}

fn validate(bar: &StackedBar<'_>) -> Result<()> {
    let order_set: BTreeSet<&String> = bar.value_order.iter().collect();
    if order_set.len() != bar.value_order.len() {
        return Err(MiqError::Render(format!(
            "value order list was given with duplicate entries: {:?}",
            bar.value_order
        )));
    }
    let values_in_data: BTreeSet<&String> = bar.data.values().flat_map(|m| m.keys()).collect();
    let missing: Vec<&&String> = values_in_data.difference(&order_set).collect();
    if !missing.is_empty() {
        return Err(MiqError::Render(format!(
            "value order list is missing some values relative to data given; missing: {missing:?}, order given: {:?}",
            bar.value_order
        )));
    }
    let samples: BTreeSet<&String> = bar.data.keys().collect();
    let ordered: BTreeSet<&String> = bar.sample_order.iter().collect();
    if samples != ordered || ordered.len() != bar.sample_order.len() {
        let mismatched: Vec<&&String> = samples.symmetric_difference(&ordered).collect();
        return Err(MiqError::Render(format!(
            "different samples in sample order list and provided sample names; mismatched: {mismatched:?}"
        )));
    }
    Ok(())
}

pub fn render_stacked_bar(bar: &StackedBar<'_>) -> Result<String> {
    validate(bar)?;

    let mut out = String::new();
    svg_open(&mut out, WIDTH, HEIGHT)?;
    if !bar.title.is_empty() {
        svg_text(&mut out, (PLOT_LEFT + PLOT_RIGHT) / 2.0, 30.0, 15, "middle", bar.title)?;
    }

    writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#fff\" stroke=\"#999\"/>",
        fmt_coord(PLOT_LEFT),
        fmt_coord(PLOT_TOP),
        fmt_coord(PLOT_RIGHT - PLOT_LEFT),
        fmt_coord(PLOT_BOTTOM - PLOT_TOP)
    )?;
    for tick in (0..=100).step_by(10) {
        let y = y_for(tick as f64);
        writeln!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#666\"/>",
            fmt_coord(PLOT_LEFT - 4.0),
            fmt_coord(y),
            fmt_coord(PLOT_LEFT),
            fmt_coord(y)
        )?;
        svg_text(&mut out, PLOT_LEFT - 7.0, y + 4.0, 10, "end", &tick.to_string())?;
    }
    writeln!(
        out,
        "<text x=\"20\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 20 {})\">Relative Abundance (%)</text>",
        fmt_coord((PLOT_TOP + PLOT_BOTTOM) / 2.0),
        fmt_coord((PLOT_TOP + PLOT_BOTTOM) / 2.0)
    )?;

    let n_bars = bar.sample_order.len();
    let slot = (PLOT_RIGHT - PLOT_LEFT) / n_bars.max(1) as f64;
    let (rotation, anchor) = label_rotation(n_bars);
    for (idx, sample) in bar.sample_order.iter().enumerate() {
        let values = &bar.data[sample];
        let center = PLOT_LEFT + slot * (idx as f64 + 0.5);
        let width = slot * BAR_WIDTH;
        let mut bottom = 0.0;
        for (color_idx, value_name) in bar.value_order.iter().enumerate() {
            let value = values.get(value_name).copied().unwrap_or(0.0);
            if value > 0.0 {
                let y_top = y_for(bottom + value);
                writeln!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                    fmt_coord(center - width / 2.0),
                    fmt_coord(y_top),
                    fmt_coord(width),
                    fmt_coord(y_for(bottom) - y_top),
                    palette_color(color_idx)
                )?;
            }
            bottom += value;
        }
        let ly = PLOT_BOTTOM + 16.0;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"11\" text-anchor=\"{}\" transform=\"rotate(-{} {} {})\">{}</text>",
            fmt_coord(center),
            fmt_coord(ly),
            anchor,
            rotation,
            fmt_coord(center),
            fmt_coord(ly),
            escape_xml(sample)
        )?;
    }

    // Legend lists the top of the stack first.
    let legend_x = PLOT_RIGHT + 20.0;
    for (row, (color_idx, value_name)) in bar.value_order.iter().enumerate().rev().enumerate() {
        let y = PLOT_TOP + 10.0 + row as f64 * 18.0;
        let label = bar
            .print_names
            .and_then(|names| names.get(value_name))
            .unwrap_or(value_name);
        writeln!(
            out,
            "<rect x=\"{}\" y=\"{}\" width=\"12\" height=\"12\" fill=\"{}\"/>",
            fmt_coord(legend_x),
            fmt_coord(y - 10.0),
            palette_color(color_idx)
        )?;
        svg_text(&mut out, legend_x + 18.0, y, 11, "start", label)?;
    }

    svg_close(&mut out)?;
    Ok(out)
}

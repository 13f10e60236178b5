use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;
use std::fmt::Write;

use crate::error::{MiqError, Result};
use crate::pipeline::Percentages;
use crate::plotting::{escape_xml, fmt_coord, svg_close, svg_open, svg_text};

const WIDTH: u32 = 680;
const HEIGHT: u32 = 520;
const CX: f64 = 420.0;
const CY: f64 = 275.0;
const RADIUS: f64 = 180.0;
const RADIAL_MAX: f64 = 200.0;
const RADIAL_TICKS: [f64; 5] = [0.0, 50.0, 100.0, 150.0, 200.0];
const TARGET: f64 = 100.0;
const SERIES_COLORS: [&str; 4] = ["#1f77b4", "#d62728", "#bcbd22", "#2ca02c"];

#[derive(Debug, Clone)]
pub struct RadarPlot<'a> {
    /// Series name to value per variable; every series must cover the same variables.
    pub data: &'a BTreeMap<String, Percentages>,
    pub rank_order: &'a [String],
    pub ordered_feature: &'a str,
    /// Highest-ranked variable at the top of the direction triangle.
    pub top_high: bool,
    pub print_names: Option<&'a BTreeMap<String, String>>,
}

/// Rearranges a ranked list so the ends of the ranking meet at the top of
/// the radar and the middle of the ranking sits at the bottom.
pub fn make_top_down_list(ordered: &[String]) -> Vec<String> {
    let mut top_down: Vec<String> = Vec::with_capacity(ordered.len());
    let mut add_to_end = true;
    for item in ordered.iter().rev() {
        if add_to_end {
            top_down.push(item.clone());
        } else {
            top_down.insert(0, item.clone());
        }
        add_to_end = !add_to_end;
    }
    top_down
}

fn samples_and_variables<'a>(
    data: &'a BTreeMap<String, Percentages>,
) -> Result<(Vec<&'a String>, BTreeSet<&'a String>)> {
    let mut samples = data.keys();
    let first = samples
        .next()
        .ok_or_else(|| MiqError::Render("radar plot needs at least one sample".to_string()))?;
    let variables: BTreeSet<&String> = data[first].keys().collect();
    for (sample, values) in data {
        let keys: BTreeSet<&String> = values.keys().collect();
        if keys != variables {
            return Err(MiqError::Render(format!(
                "all samples must have the same read sources present; sample {sample} differs"
            )));
        }
    }
    Ok((data.keys().collect(), variables))
}

/// Clockwise from twelve o'clock.
fn polar(fraction_of_turn: f64, radius: f64) -> (f64, f64) {
    let angle = fraction_of_turn * 2.0 * PI;
    (CX + radius * angle.sin(), CY - radius * angle.cos())
}

fn scale(value: f64) -> f64 {
    value.clamp(0.0, RADIAL_MAX) / RADIAL_MAX * RADIUS
}

pub fn render_radar_plot(plot: &RadarPlot<'_>) -> Result<String> {
    let (samples, variables) = samples_and_variables(plot.data)?;
    for variable in plot.rank_order {
        if !variables.contains(variable) {
            return Err(MiqError::Render(format!(
                "got a variable in the rank order that is missing from the data: {variable}"
            )));
        }
    }
    if samples.len() > SERIES_COLORS.len() {
        return Err(MiqError::Render(format!(
            "{} samples on one radar plot; at most {} are supported",
            samples.len(),
            SERIES_COLORS.len()
        )));
    }
    let display_order = make_top_down_list(plot.rank_order);
    let n = display_order.len();

    let mut out = String::new();
    svg_open(&mut out, WIDTH, HEIGHT)?;

    // Direction triangle, wide end at the high end of the ranking.
    let (tx0, tx1, ty0, ty1) = (30.0, 90.0, 470.0, 80.0);
    let triangle = if plot.top_high {
        [(tx0, ty0), (tx0, ty1), (tx1, ty1)]
    } else {
        [(tx0, ty0), (tx0, ty1), (tx1, ty0)]
    };
    writeln!(
        out,
        "<polygon points=\"{}\" fill=\"#00ff00\"/>",
        triangle
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_coord(*x), fmt_coord(*y)))
            .collect::<Vec<_>>()
            .join(" ")
    )?;
    svg_text(&mut out, tx0, 60.0, 13, "start", plot.ordered_feature)?;

    for tick in RADIAL_TICKS {
        if tick == 0.0 {
            continue;
        }
        let (stroke, width) = if tick == TARGET {
            ("#000", 2.0)
        } else {
            ("#ccc", 0.8)
        };
        writeln!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            fmt_coord(CX),
            fmt_coord(CY),
            fmt_coord(scale(tick)),
            stroke,
            width
        )?;
        svg_text(
            &mut out,
            CX + 3.0,
            CY - scale(tick) - 2.0,
            9,
            "start",
            &format!("{tick}"),
        )?;
    }

    for (idx, variable) in display_order.iter().enumerate() {
        let turn = idx as f64 / n as f64;
        let (x, y) = polar(turn, RADIUS);
        writeln!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ddd\"/>",
            fmt_coord(CX),
            fmt_coord(CY),
            fmt_coord(x),
            fmt_coord(y)
        )?;
        let label = plot
            .print_names
            .and_then(|names| names.get(variable))
            .unwrap_or(variable);
        let (lx, ly) = polar(turn, RADIUS + 16.0);
        let anchor = if (lx - CX).abs() < 1.0 {
            "middle"
        } else if lx > CX {
            "start"
        } else {
            "end"
        };
        svg_text(&mut out, lx, ly + 4.0, 11, anchor, label)?;
    }

    for (sample_idx, sample) in samples.iter().enumerate() {
        let values = &plot.data[*sample];
        let points = display_order
            .iter()
            .enumerate()
            .map(|(idx, variable)| {
                let (x, y) = polar(idx as f64 / n as f64, scale(values[variable]));
                format!("{},{}", fmt_coord(x), fmt_coord(y))
            })
            .collect::<Vec<_>>()
            .join(" ");
        let color = SERIES_COLORS[sample_idx];
        writeln!(
            out,
            "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"0.1\" stroke=\"{}\" stroke-width=\"1\"/>",
            points, color, color
        )?;
    }

    if samples.len() == 1 {
        svg_text(&mut out, CX, 24.0, 15, "middle", samples[0])?;
    } else {
        for (idx, sample) in samples.iter().enumerate() {
            let y = 24.0 + idx as f64 * 16.0;
            writeln!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"10\" height=\"10\" fill=\"{}\"/><text x=\"{}\" y=\"{}\" font-size=\"11\">{}</text>",
                WIDTH - 170,
                fmt_coord(y - 9.0),
                SERIES_COLORS[idx],
                WIDTH - 155,
                fmt_coord(y),
                escape_xml(sample)
            )?;
        }
    }

    svg_close(&mut out)?;
    Ok(out)
}

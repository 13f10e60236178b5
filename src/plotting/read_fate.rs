use std::f64::consts::PI;
use std::fmt::Write;

use crate::error::Result;
use crate::plotting::{fmt_coord, palette_color, svg_close, svg_open, svg_text};

/// Fate drawn first, starting at twelve o'clock.
pub const LEADING_FATE: &str = "Aligned To Reference";

const WIDTH: u32 = 520;
const HEIGHT: u32 = 440;
const CX: f64 = 260.0;
const CY: f64 = 235.0;
const RADIUS: f64 = 140.0;
const EXPLODE_FRACTION: f64 = 0.1;

/// `unmapped_like_reads` -> `Unmapped-like reads`.
pub fn make_pretty_for_print(label: &str) -> String {
    let replaced = label
        .replace("_like", "-like")
        .replace("_Like", "-like")
        .replace('_', " ");
    let mut chars = replaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Puts [`LEADING_FATE`] first and keeps the remaining fates in given order.
pub fn order_read_fates(fates: &[(String, f64)]) -> Vec<(String, f64)> {
    let mut ordered = Vec::with_capacity(fates.len());
    ordered.extend(fates.iter().filter(|(l, _)| l == LEADING_FATE).cloned());
    ordered.extend(fates.iter().filter(|(l, _)| l != LEADING_FATE).cloned());
    ordered
}

fn point(angle: f64, radius: f64, cx: f64, cy: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy - radius * angle.sin())
}

/// Pie chart of read fates as an SVG document. Slices run counter-clockwise
/// from the top; fates listed in `explode` are offset from the centre.
pub fn render_read_fate_chart(
    fates: &[(String, f64)],
    sample_id: Option<&str>,
    explode: &[&str],
) -> Result<String> {
    let ordered = order_read_fates(fates);
    let total: f64 = ordered.iter().map(|(_, v)| v.max(0.0)).sum();

    let mut out = String::new();
    svg_open(&mut out, WIDTH, HEIGHT)?;
    let title = match sample_id {
        Some(id) => format!("{id} READ FATES"),
        None => "READ FATES".to_string(),
    };
    svg_text(&mut out, CX, 28.0, 16, "middle", &title)?;

    if total <= 0.0 {
        svg_text(&mut out, CX, CY, 13, "middle", "no reads")?;
        svg_close(&mut out)?;
        return Ok(out);
    }

    let mut start = PI / 2.0;
    for (idx, (label, value)) in ordered.iter().enumerate() {
        let frac = value.max(0.0) / total;
        if frac <= 0.0 {
            continue;
        }
        let sweep = frac * 2.0 * PI;
        let mid = start + sweep / 2.0;
        let offset = if explode.contains(&label.as_str()) {
            EXPLODE_FRACTION * RADIUS
        } else {
            0.0
        };
        let (cx, cy) = point(mid, offset, CX, CY);
        let color = palette_color(idx);

        if frac >= 1.0 {
            writeln!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"#fff\"/>",
                fmt_coord(cx),
                fmt_coord(cy),
                fmt_coord(RADIUS),
                color
            )?;
        } else {
            let (x0, y0) = point(start, RADIUS, cx, cy);
            let (x1, y1) = point(start + sweep, RADIUS, cx, cy);
            let large = if sweep > PI { 1 } else { 0 };
            writeln!(
                out,
                "<path d=\"M {} {} L {} {} A {} {} 0 {} 0 {} {} Z\" fill=\"{}\" stroke=\"#fff\"/>",
                fmt_coord(cx),
                fmt_coord(cy),
                fmt_coord(x0),
                fmt_coord(y0),
                fmt_coord(RADIUS),
                fmt_coord(RADIUS),
                large,
                fmt_coord(x1),
                fmt_coord(y1),
                color
            )?;
        }

        let (px, py) = point(mid, RADIUS * 0.6, cx, cy);
        svg_text(&mut out, px, py + 4.0, 11, "middle", &format!("{:.1}%", frac * 100.0))?;
        let (lx, ly) = point(mid, RADIUS * 1.1, cx, cy);
        let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
        svg_text(&mut out, lx, ly + 4.0, 12, anchor, &make_pretty_for_print(label))?;

        start += sweep;
    }

    svg_close(&mut out)?;
    Ok(out)
}

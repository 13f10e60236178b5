use std::fmt::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub mod radar;
pub mod read_fate;
pub mod stacked_bar;

/// Default categorical cycle, one colour per series.
pub const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn palette_color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

/// Base64 of an SVG document, suitable for a `data:image/svg+xml;base64,` URI.
pub fn encode_svg(svg: &str) -> String {
    STANDARD.encode(svg.as_bytes())
}

pub fn decode_svg(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

pub(crate) fn svg_open(out: &mut String, width: u32, height: u32) -> fmt::Result {
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"Arial,Helvetica,sans-serif\">"
    )?;
    writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"#fff\"/>"
    )
}

pub(crate) fn svg_close(out: &mut String) -> fmt::Result {
    writeln!(out, "</svg>")
}

pub(crate) fn svg_text(
    out: &mut String,
    x: f64,
    y: f64,
    size: u32,
    anchor: &str,
    text: &str,
) -> fmt::Result {
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"{}\">{}</text>",
        fmt_coord(x),
        fmt_coord(y),
        size,
        anchor,
        escape_xml(text)
    )
}

pub(crate) fn fmt_coord(v: f64) -> String {
    format!("{:.2}", v)
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/plotting/tests.rs"]
mod tests;

//! SVG markup for one frame of a wave stack.
//!
//! The document uses a `0 0 1 1` viewBox stretched to its container, matching
//! the kernel's normalized coordinates. Band `i` becomes `<path id="wave-{i+1}">`
//! and, when styled with a gradient, references `#gradient-{i+1}`.

use std::fmt::Write;
use wave_stack_core::gradient::padded_stops;
use wave_stack_core::{Background, BandStyle, GradientDirection, LinearGradient, StrokeCap, WaveStack, WaveStackConfig};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const BACKGROUND_GRADIENT_ID: &str = "background-gradient";

/// Renders the current frame of `stack`.
pub fn render_stack(stack: &WaveStack) -> String {
    render_document(stack.config(), &stack.paths())
}

/// Renders a standalone SVG document from a configuration and band paths.
///
/// Paths pair with `config.bands` by index. Extra paths are ignored; a band
/// without a path gets an empty outline.
pub fn render_document(config: &WaveStackConfig, paths: &[&str]) -> String {
    let mut out = String::with_capacity(256 + paths.iter().map(|p| p.len() + 128).sum::<usize>());
    let _ = writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" viewBox="0 0 1 1" preserveAspectRatio="none">"#
    );

    write_defs(&mut out, config);

    match &config.background {
        Background::Fill {
            fill_color: Some(color),
        } => {
            let _ = writeln!(
                out,
                r#"  <rect x="0" y="0" width="1" height="1" fill="{}"/>"#,
                escape_attr(color)
            );
        }
        Background::Fill { fill_color: None } => {}
        Background::Gradient { .. } => {
            let _ = writeln!(
                out,
                r#"  <rect x="0" y="0" width="1" height="1" fill="url(#{BACKGROUND_GRADIENT_ID})"/>"#
            );
        }
    }

    for (i, band) in config.bands.iter().enumerate() {
        let d = paths.get(i).copied().unwrap_or("");
        write_path(&mut out, i + 1, d, band);
    }

    out.push_str("</svg>\n");
    out
}

fn write_defs(out: &mut String, config: &WaveStackConfig) {
    let background = match &config.background {
        Background::Gradient { gradient } => Some(gradient),
        Background::Fill { .. } => None,
    };
    let has_band_gradients = config.bands.iter().any(|b| b.gradient.is_some());
    if background.is_none() && !has_band_gradients {
        return;
    }

    out.push_str("  <defs>\n");
    if let Some(gradient) = background {
        // The background spans the plain viewport, so its stops are not remapped.
        open_gradient(out, BACKGROUND_GRADIENT_ID, gradient.direction);
        for stop in &gradient.stops {
            write_stop(out, &format!("{}", stop.offset * 100.0), &stop.color);
        }
        out.push_str("    </linearGradient>\n");
    }
    for (i, band) in config.bands.iter().enumerate() {
        if let Some(gradient) = &band.gradient {
            write_band_gradient(out, i + 1, gradient);
        }
    }
    out.push_str("  </defs>\n");
}

fn write_band_gradient(out: &mut String, index: usize, gradient: &LinearGradient) {
    open_gradient(out, &format!("gradient-{index}"), gradient.direction);
    for stop in padded_stops(&gradient.stops) {
        write_stop(out, &stop.percent.to_string(), &stop.color);
    }
    out.push_str("    </linearGradient>\n");
}

fn open_gradient(out: &mut String, id: &str, direction: GradientDirection) {
    let flag = |d: GradientDirection| u8::from(direction == d);
    let _ = writeln!(
        out,
        r#"    <linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        flag(GradientDirection::ToLeft),
        flag(GradientDirection::ToTop),
        flag(GradientDirection::ToRight),
        flag(GradientDirection::ToBottom),
    );
}

fn write_stop(out: &mut String, percent: &str, color: &str) {
    let _ = writeln!(
        out,
        r#"      <stop offset="{percent}%" stop-color="{}"/>"#,
        escape_attr(color)
    );
}

fn write_path(out: &mut String, index: usize, d: &str, band: &BandStyle) {
    let _ = write!(out, r#"  <path id="wave-{index}" d="{}""#, escape_attr(d));

    if band.gradient.is_some() {
        let _ = write!(out, r#" fill="url(#gradient-{index})""#);
    } else if let Some(color) = &band.fill_color {
        let _ = write!(out, r#" fill="{}""#, escape_attr(color));
    }
    if let Some(color) = &band.stroke_color {
        let _ = write!(out, r#" stroke="{}""#, escape_attr(color));
    }
    if let Some(width) = band.stroke_width {
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
    if let Some(pattern) = &band.stroke_dash_pattern {
        let _ = write!(out, r#" stroke-dasharray="{}""#, escape_attr(pattern));
    }
    if let Some(offset) = band.stroke_dash_offset {
        let _ = write!(out, r#" stroke-dashoffset="{offset}""#);
    }
    if let Some(cap) = band.stroke_cap {
        let _ = write!(out, r#" stroke-linecap="{}""#, linecap(cap));
    }
    if !band.filters.is_empty() {
        let refs: Vec<String> = band
            .filters
            .iter()
            .map(|id| format!("url(#{})", escape_attr(id)))
            .collect();
        let _ = write!(out, r#" filter="{}""#, refs.join(" "));
    }
    out.push_str("/>\n");
}

fn linecap(cap: StrokeCap) -> &'static str {
    match cap {
        StrokeCap::Butt => "butt",
        StrokeCap::Round => "round",
        StrokeCap::Square => "square",
    }
}

/// Escapes a value for use inside a double-quoted XML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

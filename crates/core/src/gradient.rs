//! Gradient stop remapping for padded wave geometry.
//!
//! Band paths extend [`WAVE_PADDING`] past both viewport edges, so a gradient
//! spanning a path's bounding box also spans the padding. Remapping stop
//! offsets into `[ratio, 1 - ratio]` keeps the configured colors aligned with
//! the visible part of the band.

use crate::config::GradientStop;
use crate::geometry::WAVE_PADDING;

/// A gradient stop positioned in whole percent of the padded span.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentStop {
    pub percent: u32,
    pub color: String,
}

/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Fraction of a padded span taken by the padding on one side, halved.
pub fn padding_ratio() -> f64 {
    WAVE_PADDING / (1.0 + 2.0 * WAVE_PADDING) / 2.0
}

/// Maps a logical stop offset in [0, 1] onto `[padding_ratio, 1 - padding_ratio]`.
pub fn remap_offset(offset: f64, padding_ratio: f64) -> f64 {
    map_range(offset, 0.0, 1.0, padding_ratio, 1.0 - padding_ratio)
}

/// Stops for a band gradient drawn over padded geometry.
///
/// The first and last colors are pinned at the edges of the visible span
/// (rounded outwards) and every configured stop is remapped in between.
/// Returns an empty list for an empty input.
pub fn padded_stops(stops: &[GradientStop]) -> Vec<PercentStop> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Vec::new();
    };
    let ratio = padding_ratio();

    let mut out = Vec::with_capacity(stops.len() + 2);
    out.push(PercentStop {
        percent: to_percent((ratio * 100.0).floor()),
        color: first.color.clone(),
    });
    out.extend(stops.iter().map(|stop| PercentStop {
        percent: to_percent((remap_offset(stop.offset, ratio) * 100.0).round()),
        color: stop.color.clone(),
    }));
    out.push(PercentStop {
        percent: to_percent(((1.0 - ratio) * 100.0).ceil()),
        color: last.color.clone(),
    });
    out
}

fn to_percent(value: f64) -> u32 {
    value.clamp(0.0, 100.0) as u32
}

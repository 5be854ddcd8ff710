//! Smooth cubic paths through ordered point sequences.
//!
//! Control points follow a Catmull-Rom style construction with a tunable
//! tension. Paths are emitted in the SVG path mini-language (`M`, `C`,
//! `L`, `Z`) with comma-separated coordinate pairs.

use crate::error::WaveError;
use crate::geometry::Point2D;
use std::fmt::Write;

/// Default spline tension on the user-facing 0..10 scale (0.2 normalized).
pub const DEFAULT_TENSION: f64 = 2.0;

/// Minimum number of points an open spline needs to emit a curve segment.
pub const MIN_OPEN_SPLINE_POINTS: usize = 4;

/// Builds an open spline through the interior of a padded point sequence.
///
/// The first and last points act only as control context: the path moves
/// to `points[1]` and emits one cubic segment ending at each `points[i]`
/// for `2 <= i < len - 1`. Sequences shorter than
/// [`MIN_OPEN_SPLINE_POINTS`] produce only the move-to.
///
/// Returns `WaveError::GeometryConfiguration` if fewer than two points are
/// given, since there is nothing to move to.
pub fn build_open_spline(points: &[Point2D], tension: f64) -> Result<String, WaveError> {
    if points.len() < 2 {
        return Err(WaveError::GeometryConfiguration(format!(
            "open spline needs at least 2 points, got {}",
            points.len()
        )));
    }
    let mut d = String::with_capacity(points.len() * 64);
    write_open_spline(&mut d, points, tension);
    Ok(d)
}

/// Appends an open spline to `out`, reusing its allocation.
///
/// Writes nothing for fewer than two points; [`build_open_spline`] reports
/// that case as an error.
pub(crate) fn write_open_spline(out: &mut String, points: &[Point2D], tension: f64) {
    let Some(&start) = points.get(1) else {
        return;
    };
    let t = tension / 10.0;
    // Writing into a String is infallible.
    let _ = write!(out, "M {},{}", start.x, start.y);
    for i in 2..points.len().saturating_sub(1) {
        write_segment(out, points[i - 2], points[i - 1], points[i], points[i + 1], t);
    }
}

/// Builds a closed spline looping through every point.
///
/// The sequence is wrapped as `[last, p0, .., pn, first, second]` so every
/// point gets full neighbor context; the path starts at `points[0]`.
pub fn build_closed_spline(points: &[Point2D], tension: f64) -> Result<String, WaveError> {
    let (first, second, last) = match points {
        [first, second, .., last] => (*first, *second, *last),
        [first, second] => (*first, *second, *second),
        _ => {
            return Err(WaveError::GeometryConfiguration(format!(
                "closed spline needs at least 2 points, got {}",
                points.len()
            )))
        }
    };
    let t = tension / 10.0;

    let mut wrapped = Vec::with_capacity(points.len() + 3);
    wrapped.push(last);
    wrapped.extend_from_slice(points);
    wrapped.push(first);
    wrapped.push(second);

    let mut d = String::with_capacity(wrapped.len() * 64);
    let _ = write!(d, "M {},{}", first.x, first.y);
    for i in 2..wrapped.len() - 1 {
        write_segment(&mut d, wrapped[i - 2], wrapped[i - 1], wrapped[i], wrapped[i + 1], t);
    }
    Ok(d)
}

/// One cubic segment from `p1` to `p2`, with `p0`/`p3` as neighbors.
fn write_segment(out: &mut String, p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D, t: f64) {
    let cp1 = p1 + (p2 - p0) * t;
    let cp2 = p2 - (p3 - p1) * t;
    let _ = write!(
        out,
        " C {},{} {},{} {},{}",
        cp1.x, cp1.y, cp2.x, cp2.y, p2.x, p2.y
    );
}

//! Baseline geometry for wave bands.
//!
//! Coordinates live in a normalized unit space where `(0, 0)` is the top-left
//! of the visible viewport and `(1, 1)` the bottom-right. Sampling extends a
//! fixed [`WAVE_PADDING`] beyond both horizontal edges so spline fitting and
//! silhouette closure never produce visible artifacts inside [0, 1].

use crate::error::WaveError;
use glam::DVec2;

/// A point in normalized (padded) wave space.
pub type Point2D = DVec2;

/// Margin added outside the visible viewport, in normalized units.
pub const WAVE_PADDING: f64 = 0.1;

/// User-facing height values are given in [0, 10]; geometry works in [0, 1].
const HEIGHT_SCALE: f64 = 10.0;

/// Endpoints of a band's baseline plus the two off-viewport closure corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCorners {
    pub start: Point2D,
    pub end: Point2D,
    /// Bottom-right closure point, outside the viewport.
    pub corner1: Point2D,
    /// Bottom-left closure point, outside the viewport.
    pub corner2: Point2D,
}

/// Distributes `band_count` baseline heights between `low` and `high`.
///
/// Both bounds are given on the 0..10 scale and normalized by dividing by
/// 10. Band 0 sits at `high`, the last band at `low`. A single band uses
/// `low` exactly.
pub fn heights_for(low: f64, high: f64, band_count: usize) -> Result<Vec<f64>, WaveError> {
    if band_count == 0 {
        return Err(WaveError::GeometryConfiguration(
            "band count must be at least 1".into(),
        ));
    }
    let low = low / HEIGHT_SCALE;
    let high = high / HEIGHT_SCALE;
    if band_count == 1 {
        return Ok(vec![low]);
    }
    let span = high - low;
    let last = (band_count - 1) as f64;
    Ok((0..band_count)
        .map(|i| high - span * (i as f64 / last))
        .collect())
}

/// Baseline endpoints and closure corners for a band at `height`.
pub fn corners_for(height: f64) -> BandCorners {
    BandCorners {
        start: DVec2::new(0.0, 1.0 - height),
        end: DVec2::new(1.0, 1.0 - height),
        corner1: DVec2::new(1.0 + WAVE_PADDING, 1.0 + WAVE_PADDING),
        corner2: DVec2::new(-WAVE_PADDING, 1.0 + WAVE_PADDING),
    }
}

/// Evenly samples `num_points` points along the horizontal segment from
/// `start` towards `end` (the end point itself is not among them).
///
/// With `with_padding`, two context points are prepended at
/// `start.x - 2·PAD` and `start.x - PAD`, and three appended at `end`,
/// `end.x + PAD` and `end.x + 2·PAD`, all at the baseline's y.
pub fn sample_points(
    start: Point2D,
    end: Point2D,
    num_points: usize,
    with_padding: bool,
) -> Result<Vec<Point2D>, WaveError> {
    if num_points == 0 {
        return Err(WaveError::GeometryConfiguration(
            "num_points must be at least 1".into(),
        ));
    }
    let step = (end.x - start.x) / num_points as f64;
    let mut points = Vec::with_capacity(num_points + if with_padding { 5 } else { 0 });

    if with_padding {
        points.push(DVec2::new(start.x - WAVE_PADDING * 2.0, start.y));
        points.push(DVec2::new(start.x - WAVE_PADDING, start.y));
    }

    points.extend((0..num_points).map(|i| DVec2::new(start.x + step * i as f64, start.y)));

    if with_padding {
        points.push(end);
        points.push(DVec2::new(end.x + WAVE_PADDING, end.y));
        points.push(DVec2::new(end.x + WAVE_PADDING * 2.0, end.y));
    }

    Ok(points)
}

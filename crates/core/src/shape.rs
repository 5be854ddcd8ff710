//! Per-band wave shapes: one-time construction and per-frame update.
//!
//! Building a shape samples the band's baseline and derives its noise
//! coordinates once. Every animation frame afterwards only re-samples the
//! noise field, displaces the cached origins and refits the spline, writing
//! the new path into the shape's existing buffers.

use crate::error::WaveError;
use crate::geometry::{corners_for, sample_points, Point2D};
use crate::noise::NoiseSource;
use crate::spline::{write_open_spline, DEFAULT_TENSION};
use glam::DVec2;
use std::fmt::Write;

/// Amplitude and synchronicity are given on a 0..10 scale.
const PARAM_SCALE: f64 = 10.0;

/// Motion parameters applied on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveMotion {
    /// Vertical displacement radius (0..10 scale).
    pub amplitude: f64,
    /// Spatial frequency multiplier for noise sampling.
    pub complexity: f64,
}

/// Geometry of a single wave band.
///
/// `origins`, `noise_coords` and `corners` are fixed when the shape is built;
/// only `positions` and `path` change from frame to frame. All three point
/// sequences always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveShape {
    origins: Vec<Point2D>,
    noise_coords: Vec<Point2D>,
    positions: Vec<Point2D>,
    path: String,
    corners: [Point2D; 2],
}

impl WaveShape {
    /// Undisplaced baseline sample locations, padding points included.
    pub fn origins(&self) -> &[Point2D] {
        &self.origins
    }

    /// Origins remapped into noise-sampling space.
    pub fn noise_coords(&self) -> &[Point2D] {
        &self.noise_coords
    }

    /// Current noise-displaced point locations.
    pub fn positions(&self) -> &[Point2D] {
        &self.positions
    }

    /// Current closed outline in SVG path syntax.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Off-viewport closure points: bottom-right, then bottom-left.
    pub fn corners(&self) -> [Point2D; 2] {
        self.corners
    }
}

/// Builds the shape of a band whose baseline sits at `height` (0..1).
///
/// `synchronicity` scales the y component of the noise coordinates, which
/// shifts this band's phase within the shared noise field.
///
/// Returns `WaveError::GeometryConfiguration` if `num_points` is zero.
pub fn create_static(
    height: f64,
    num_points: usize,
    motion: WaveMotion,
    synchronicity: f64,
    noise_timeline: f64,
    noise: &dyn NoiseSource,
) -> Result<WaveShape, WaveError> {
    let corners = corners_for(height);
    let origins = sample_points(corners.start, corners.end, num_points, true)?;

    let sync = synchronicity / PARAM_SCALE;
    let noise_coords: Vec<Point2D> = origins.iter().map(|p| DVec2::new(p.x, p.y * sync)).collect();

    let mut shape = WaveShape {
        positions: Vec::with_capacity(origins.len()),
        path: String::with_capacity(origins.len() * 64),
        origins,
        noise_coords,
        corners: [corners.corner1, corners.corner2],
    };
    refresh(&mut shape, motion, noise_timeline, noise);
    Ok(shape)
}

/// Recomputes `positions` and `path` for a new noise time.
///
/// Origins, noise coordinates and corners are reused untouched. Calling this
/// twice with the same arguments yields the same path.
pub fn update(shape: &mut WaveShape, motion: WaveMotion, noise_timeline: f64, noise: &dyn NoiseSource) {
    refresh(shape, motion, noise_timeline, noise);
}

fn refresh(shape: &mut WaveShape, motion: WaveMotion, noise_timeline: f64, noise: &dyn NoiseSource) {
    let amplitude = motion.amplitude / PARAM_SCALE;
    let complexity = motion.complexity;

    shape.positions.clear();
    shape.positions.extend(shape.origins.iter().zip(&shape.noise_coords).map(|(origin, nc)| {
        let value = noise.sample(nc.x * complexity, nc.y * complexity, noise_timeline);
        displace(*origin, amplitude, value)
    }));

    let [corner1, corner2] = shape.corners;
    shape.path.clear();
    write_open_spline(&mut shape.path, &shape.positions, DEFAULT_TENSION);
    let _ = write!(
        shape.path,
        " L {},{} L {},{} Z",
        corner1.x, corner1.y, corner2.x, corner2.y
    );
}

/// Moves `point` vertically by half the scaled noise value.
fn displace(point: Point2D, amplitude: f64, noise_value: f64) -> Point2D {
    DVec2::new(point.x, point.y + noise_value * amplitude / 2.0)
}

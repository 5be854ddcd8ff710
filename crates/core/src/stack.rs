//! The wave stack: every band of one configuration plus its animation clock.
//!
//! A stack owns all mutable kernel state. Structural operations
//! ([`WaveStack::initialize`], [`WaveStack::reconfigure`],
//! [`WaveStack::apply`]) validate first and rebuild band geometry; the
//! per-frame [`WaveStack::tick`] only displaces cached geometry.

use crate::clock::AnimationClock;
use crate::config::{ConfigChanges, WaveStackConfig};
use crate::error::WaveError;
use crate::geometry::heights_for;
use crate::noise::{NoiseField, NoiseSource};
use crate::shape::{self, WaveShape};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Outcome of copying band paths into a fixed set of rendering slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotReport {
    /// Slots that received a path.
    pub written: usize,
    /// Bands with no slot to go to.
    pub ignored_shapes: usize,
    /// Slots with no band to fill them, left untouched.
    pub unfilled_slots: usize,
}

impl SlotReport {
    /// True when band count and slot count differ.
    pub fn is_mismatch(&self) -> bool {
        self.ignored_shapes != 0 || self.unfilled_slots != 0
    }
}

/// All bands of one wave configuration.
pub struct WaveStack {
    config: WaveStackConfig,
    noise: Arc<dyn NoiseSource>,
    clock: AnimationClock,
    shapes: Vec<WaveShape>,
}

impl std::fmt::Debug for WaveStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveStack")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("bands", &self.shapes.len())
            .finish_non_exhaustive()
    }
}

impl WaveStack {
    /// Validates `config` and builds one shape per band at noise time 0.
    #[tracing::instrument(skip_all, fields(bands = config.bands.len()))]
    pub fn initialize(
        config: WaveStackConfig,
        noise: Arc<dyn NoiseSource>,
    ) -> Result<Self, WaveError> {
        config.validate()?;
        let clock = AnimationClock::new(config.speed);
        let shapes = build_shapes(&config, clock.noise_timeline(), noise.as_ref())?;
        debug!(points = config.points, "wave stack initialized");
        Ok(Self {
            config,
            noise,
            clock,
            shapes,
        })
    }

    /// Builds a stack over a freshly seeded [`NoiseField`].
    pub fn with_seed(config: WaveStackConfig, seed: u32) -> Result<Self, WaveError> {
        Self::initialize(config, Arc::new(NoiseField::new(seed)))
    }

    /// Replaces the configuration and rebuilds every band at the current
    /// noise time. On error the stack is left unchanged.
    #[tracing::instrument(skip_all, fields(bands = config.bands.len()))]
    pub fn reconfigure(&mut self, config: WaveStackConfig) -> Result<&[WaveShape], WaveError> {
        self.apply(config, ConfigChanges::all())
    }

    /// Replaces the configuration, rebuilding band geometry only when
    /// `changes` or a different band count require it.
    ///
    /// Motion-only changes keep every cached origin and refresh the current
    /// paths in place. On error the stack is left unchanged.
    pub fn apply(
        &mut self,
        config: WaveStackConfig,
        changes: ConfigChanges,
    ) -> Result<&[WaveShape], WaveError> {
        config.validate()?;
        let time = self.clock.noise_timeline();

        if changes.touches_geometry() || config.bands.len() != self.shapes.len() {
            self.shapes = build_shapes(&config, time, self.noise.as_ref())?;
            debug!(bands = self.shapes.len(), noise_timeline = time, "band geometry rebuilt");
        } else if changes.amplitude || changes.complexity {
            let motion = config.motion();
            let noise = self.noise.as_ref();
            for shape in &mut self.shapes {
                shape::update(shape, motion, time, noise);
            }
            debug!(?changes, "motion refreshed on cached geometry");
        }

        self.clock.set_speed(config.speed);
        self.config = config;
        Ok(&self.shapes)
    }

    /// Advances the clock to `timestamp_ms` and updates every band.
    ///
    /// Returns one path per band, in band order.
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<&str> {
        self.advance(timestamp_ms);
        self.paths()
    }

    /// Advances the clock to `timestamp_ms` and updates every band in place
    /// without allocating. Read the result through [`path_iter`](Self::path_iter)
    /// or [`fill_slots`](Self::fill_slots).
    pub fn advance(&mut self, timestamp_ms: f64) {
        let time = self.clock.tick(timestamp_ms);
        let motion = self.config.motion();
        let noise = self.noise.as_ref();
        for shape in &mut self.shapes {
            shape::update(shape, motion, time, noise);
        }
        trace!(timestamp_ms, noise_timeline = time, "frame");
    }

    /// Current path of every band, in band order.
    pub fn paths(&self) -> Vec<&str> {
        self.path_iter().collect()
    }

    /// Borrowing iterator over the current band paths, in band order.
    pub fn path_iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.shapes.iter().map(WaveShape::path)
    }

    /// Copies band paths into `slots` in order.
    ///
    /// Extra bands are ignored and extra slots left as they are; the
    /// mismatch is reported rather than treated as a failure.
    pub fn fill_slots(&self, slots: &mut [String]) -> SlotReport {
        for (slot, shape) in slots.iter_mut().zip(&self.shapes) {
            slot.clear();
            slot.push_str(shape.path());
        }
        let written = slots.len().min(self.shapes.len());
        let report = SlotReport {
            written,
            ignored_shapes: self.shapes.len() - written,
            unfilled_slots: slots.len() - written,
        };
        if report.is_mismatch() {
            warn!(
                bands = self.shapes.len(),
                slots = slots.len(),
                "band count does not match rendering slots"
            );
        }
        report
    }

    /// Forgets the last frame timestamp, so the gap before the next frame is
    /// not credited to the noise timeline.
    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn shapes(&self) -> &[WaveShape] {
        &self.shapes
    }

    pub fn config(&self) -> &WaveStackConfig {
        &self.config
    }

    pub fn noise_timeline(&self) -> f64 {
        self.clock.noise_timeline()
    }
}

/// One shape per band; band `i` gets `i` times the configured synchronicity
/// so phase offsets grow down the stack.
fn build_shapes(
    config: &WaveStackConfig,
    noise_timeline: f64,
    noise: &dyn NoiseSource,
) -> Result<Vec<WaveShape>, WaveError> {
    let (low, high) = config.height_range;
    let motion = config.motion();
    heights_for(low, high, config.bands.len())?
        .into_iter()
        .enumerate()
        .map(|(i, height)| {
            shape::create_static(
                height,
                config.points,
                motion,
                config.synchronicity * i as f64,
                noise_timeline,
                noise,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandStyle;

    fn config_with_bands(n: usize) -> WaveStackConfig {
        WaveStackConfig {
            bands: vec![BandStyle::default(); n],
            ..WaveStackConfig::default()
        }
    }

    fn flat_noise() -> Arc<dyn NoiseSource> {
        Arc::new(|_x: f64, _y: f64, _z: f64| 0.0)
    }

    #[test]
    fn initialize_builds_one_shape_per_band() {
        let stack = WaveStack::with_seed(config_with_bands(4), 42).unwrap();
        assert_eq!(stack.shapes().len(), 4);
        assert_eq!(stack.paths().len(), 4);
        assert_eq!(stack.noise_timeline(), 0.0);
    }

    #[test]
    fn bands_are_stacked_from_high_to_low() {
        let stack = WaveStack::initialize(config_with_bands(3), flat_noise()).unwrap();
        // Default height range (2, 8) -> heights 0.8, 0.5, 0.2 -> y = 1 - h.
        let ys: Vec<f64> = stack.shapes().iter().map(|s| s.origins()[0].y).collect();
        assert!((ys[0] - 0.2).abs() < 1e-12);
        assert!((ys[1] - 0.5).abs() < 1e-12);
        assert!((ys[2] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn synchronicity_grows_with_band_index() {
        let stack = WaveStack::initialize(config_with_bands(3), flat_noise()).unwrap();
        for (i, shape) in stack.shapes().iter().enumerate() {
            let factor = 3.0 * i as f64 / 10.0;
            for (origin, nc) in shape.origins().iter().zip(shape.noise_coords()) {
                assert!((nc.y - origin.y * factor).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn initialize_rejects_invalid_config() {
        let result = WaveStack::with_seed(config_with_bands(0), 1);
        assert!(matches!(result, Err(WaveError::GeometryConfiguration(_))));
    }

    #[test]
    fn tick_returns_a_path_per_band_and_advances_time() {
        let mut stack = WaveStack::with_seed(config_with_bands(2), 7).unwrap();
        let first: Vec<String> = stack.tick(0.0).into_iter().map(String::from).collect();
        assert_eq!(first.len(), 2);
        let second: Vec<String> = stack.tick(16.0).into_iter().map(String::from).collect();
        assert!(stack.noise_timeline() > 0.0);
        assert_ne!(first, second);
    }

    #[test]
    fn same_seed_gives_identical_frames() {
        let mut a = WaveStack::with_seed(WaveStackConfig::default(), 99).unwrap();
        let mut b = WaveStack::with_seed(WaveStackConfig::default(), 99).unwrap();
        for frame in 0..30 {
            let ts = frame as f64 * 16.0;
            assert_eq!(a.tick(ts), b.tick(ts), "frames diverged at {frame}");
        }
    }

    #[test]
    fn shared_noise_field_keeps_stacks_independent() {
        let noise: Arc<dyn NoiseSource> = Arc::new(NoiseField::new(5));
        let mut a = WaveStack::initialize(WaveStackConfig::default(), Arc::clone(&noise)).unwrap();
        let b = WaveStack::initialize(WaveStackConfig::default(), noise).unwrap();
        a.tick(0.0);
        a.tick(16.0);
        assert!(a.noise_timeline() > 0.0);
        assert_eq!(b.noise_timeline(), 0.0);
    }

    #[test]
    fn reconfigure_rebuilds_geometry_at_current_time() {
        let mut stack = WaveStack::with_seed(config_with_bands(2), 3).unwrap();
        stack.tick(0.0);
        stack.tick(16.0);
        let time = stack.noise_timeline();

        let shapes = stack.reconfigure(config_with_bands(5)).unwrap();
        assert_eq!(shapes.len(), 5);
        assert_eq!(stack.noise_timeline(), time);
        assert_eq!(stack.config().bands.len(), 5);
    }

    #[test]
    fn failed_reconfigure_leaves_stack_unchanged() {
        let mut stack = WaveStack::with_seed(config_with_bands(2), 3).unwrap();
        let before = stack.shapes().to_vec();
        let bad = WaveStackConfig {
            speed: -1.0,
            ..config_with_bands(4)
        };
        assert!(stack.reconfigure(bad).is_err());
        assert_eq!(stack.shapes(), before.as_slice());
        assert_eq!(stack.config().bands.len(), 2);
    }

    #[test]
    fn motion_changes_keep_cached_origins() {
        let mut stack = WaveStack::with_seed(WaveStackConfig::default(), 12).unwrap();
        let origins_ptr = stack.shapes()[0].origins().as_ptr();
        let before = stack.paths().iter().map(|p| p.to_string()).collect::<Vec<_>>();

        let old = stack.config().clone();
        let new = WaveStackConfig {
            amplitude: 6.0,
            speed: 9.0,
            ..old.clone()
        };
        let changes = ConfigChanges::between(&old, &new);
        stack.apply(new, changes).unwrap();

        assert_eq!(stack.shapes()[0].origins().as_ptr(), origins_ptr);
        let after = stack.paths().iter().map(|p| p.to_string()).collect::<Vec<_>>();
        assert_ne!(before, after, "amplitude change should refresh the paths");
    }

    #[test]
    fn style_only_band_change_keeps_geometry() {
        let mut stack = WaveStack::with_seed(WaveStackConfig::default(), 12).unwrap();
        let origins_ptr = stack.shapes()[1].origins().as_ptr();

        let old = stack.config().clone();
        let mut new = old.clone();
        new.bands[1].fill_color = Some("tomato".into());
        let changes = ConfigChanges::between(&old, &new);
        assert!(changes.bands);
        stack.apply(new, changes).unwrap();

        assert_eq!(stack.shapes()[1].origins().as_ptr(), origins_ptr);
    }

    #[test]
    fn band_count_change_rebuilds_even_without_flag() {
        let mut stack = WaveStack::with_seed(config_with_bands(2), 12).unwrap();
        stack.apply(config_with_bands(3), ConfigChanges::default()).unwrap();
        assert_eq!(stack.shapes().len(), 3);
    }

    #[test]
    fn synchronicity_change_rebuilds_noise_coords() {
        let mut stack = WaveStack::with_seed(config_with_bands(2), 12).unwrap();
        let before = stack.shapes()[1].noise_coords().to_vec();
        let old = stack.config().clone();
        let new = WaveStackConfig {
            synchronicity: 7.0,
            ..old.clone()
        };
        stack.apply(new.clone(), ConfigChanges::between(&old, &new)).unwrap();
        assert_ne!(stack.shapes()[1].noise_coords(), before.as_slice());
    }

    #[test]
    fn speed_change_applies_to_the_clock() {
        let mut stack = WaveStack::with_seed(config_with_bands(1), 1).unwrap();
        let new = WaveStackConfig {
            speed: 10_000.0,
            ..config_with_bands(1)
        };
        stack.apply(new, ConfigChanges { speed: true, ..ConfigChanges::default() }).unwrap();
        stack.tick(0.0);
        stack.tick(10.0);
        assert!((stack.noise_timeline() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn fill_slots_reports_excess_bands() {
        let stack = WaveStack::with_seed(config_with_bands(3), 1).unwrap();
        let mut slots = vec![String::new(); 2];
        let report = stack.fill_slots(&mut slots);
        assert_eq!(
            report,
            SlotReport {
                written: 2,
                ignored_shapes: 1,
                unfilled_slots: 0
            }
        );
        assert!(report.is_mismatch());
        assert_eq!(slots[0], stack.paths()[0]);
        assert_eq!(slots[1], stack.paths()[1]);
    }

    #[test]
    fn fill_slots_leaves_missing_slots_untouched() {
        let stack = WaveStack::with_seed(config_with_bands(1), 1).unwrap();
        let mut slots = vec!["old".to_string(), "keep".to_string()];
        let report = stack.fill_slots(&mut slots);
        assert_eq!(report.written, 1);
        assert_eq!(report.unfilled_slots, 1);
        assert_eq!(slots[1], "keep");
    }

    #[test]
    fn fill_slots_with_matching_counts_is_not_a_mismatch() {
        let stack = WaveStack::with_seed(config_with_bands(2), 1).unwrap();
        let mut slots = vec![String::new(); 2];
        assert!(!stack.fill_slots(&mut slots).is_mismatch());
    }

    #[test]
    fn advance_matches_tick() {
        let mut ticked = WaveStack::with_seed(config_with_bands(3), 8).unwrap();
        let mut advanced = WaveStack::with_seed(config_with_bands(3), 8).unwrap();
        advanced.advance(0.0);
        advanced.advance(16.0);
        advanced.advance(32.0);

        ticked.tick(0.0);
        ticked.tick(16.0);
        let expected: Vec<String> = ticked.tick(32.0).into_iter().map(String::from).collect();

        assert_eq!(advanced.path_iter().len(), 3);
        assert!(advanced.path_iter().eq(expected.iter().map(String::as_str)));
        assert_eq!(advanced.noise_timeline(), ticked.noise_timeline());
    }

    #[test]
    fn resume_skips_the_paused_gap() {
        let mut stack = WaveStack::with_seed(config_with_bands(1), 1).unwrap();
        stack.tick(0.0);
        stack.tick(16.0);
        let time = stack.noise_timeline();
        stack.resume();
        stack.tick(60_000.0);
        assert_eq!(stack.noise_timeline(), time);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_shape_keeps_matching_lengths(
                bands in 1_usize..8,
                points in 1_usize..40,
                seed: u32,
                frames in 1_usize..10,
            ) {
                let config = WaveStackConfig {
                    points,
                    ..config_with_bands(bands)
                };
                let mut stack = WaveStack::with_seed(config, seed).unwrap();
                for frame in 0..frames {
                    let paths = stack.tick(frame as f64 * 16.0);
                    prop_assert_eq!(paths.len(), bands);
                }
                for shape in stack.shapes() {
                    prop_assert_eq!(shape.origins().len(), points + 5);
                    prop_assert_eq!(shape.noise_coords().len(), shape.origins().len());
                    prop_assert_eq!(shape.positions().len(), shape.origins().len());
                }
            }
        }
    }
}

#![deny(unsafe_code)]
//! Wave geometry and animation kernel for wave-stack.
//!
//! Turns a [`WaveStackConfig`] into a stack of noise-deformed wave bands and
//! recomputes their closed outlines every frame: baseline sampling
//! ([`geometry`]), a seeded 3D noise field ([`noise`]), spline fitting
//! ([`spline`]), per-band shapes ([`shape`]), a clamped frame clock
//! ([`clock`]) and gradient stop remapping ([`gradient`]). [`WaveStack`] ties
//! them together and [`WaveAnimator`] drives a stack from an injected
//! [`FrameScheduler`].

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod noise;
pub mod scheduler;
pub mod shape;
pub mod spline;
pub mod stack;

pub use clock::AnimationClock;
pub use config::{
    Background, BandStyle, ConfigChanges, GradientDirection, GradientStop, LinearGradient,
    StrokeCap, WaveStackConfig,
};
pub use error::WaveError;
pub use geometry::{Point2D, WAVE_PADDING};
pub use noise::{NoiseField, NoiseSource};
pub use scheduler::{FrameHandle, FrameScheduler, QueuedScheduler, WaveAnimator};
pub use shape::{WaveMotion, WaveShape};
pub use stack::{SlotReport, WaveStack};

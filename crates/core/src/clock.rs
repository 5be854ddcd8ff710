//! Virtual noise-time driven by wall-clock frame timestamps.
//!
//! Each frame advances the noise timeline by the elapsed wall time scaled by
//! speed. The per-frame advance is capped so a long stall (a backgrounded
//! host, a debugger pause) never causes a visible jump.

/// Largest wall-clock delta, in milliseconds, credited to a single frame.
/// Roughly one frame at 60 Hz.
pub const MAX_FRAME_DELTA_MS: f64 = 17.0;

/// Speed is given on a user-facing scale; noise time advances by
/// `elapsed_ms * speed / SPEED_SCALE`.
const SPEED_SCALE: f64 = 10_000.0;

/// Monotonic noise-time accumulator owned by one wave stack.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    noise_timeline: f64,
    last_frame_timestamp: Option<f64>,
    speed: f64,
}

impl AnimationClock {
    /// Creates a clock at noise time 0 with no frame seen yet.
    pub fn new(speed: f64) -> Self {
        Self {
            noise_timeline: 0.0,
            last_frame_timestamp: None,
            speed,
        }
    }

    /// Advances the clock to the frame at `timestamp_ms` and returns the new
    /// noise timeline.
    ///
    /// The first frame only records its timestamp. Deltas are clamped to
    /// `[0, MAX_FRAME_DELTA_MS]`, so a timestamp that moves backwards
    /// advances nothing.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let last = *self.last_frame_timestamp.get_or_insert(timestamp_ms);
        let elapsed = timestamp_ms - last;
        self.last_frame_timestamp = Some(timestamp_ms);

        let capped = elapsed.clamp(0.0, MAX_FRAME_DELTA_MS);
        self.noise_timeline += capped * (self.speed / SPEED_SCALE);
        self.noise_timeline
    }

    /// Forgets the last frame timestamp so the next tick advances nothing.
    pub fn resume(&mut self) {
        self.last_frame_timestamp = None;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn noise_timeline(&self) -> f64 {
        self.noise_timeline
    }

    pub fn last_frame_timestamp(&self) -> Option<f64> {
        self.last_frame_timestamp
    }
}

//! Continuous 3D noise used to displace wave baselines.
//!
//! A [`NoiseSource`] maps `(x, y, z)` to a value in [-1, 1]. The kernel
//! samples it with `x`/`y` taken from a band's noise coordinates and `z` set
//! to the current noise timeline, so the field flows smoothly over time.
//!
//! All implementations must be deterministic: same inputs produce the same
//! output for the lifetime of the source.

use noise::{NoiseFn, OpenSimplex};

/// A source of scalar 3D noise.
///
/// Closures of the form `Fn(f64, f64, f64) -> f64` implement this trait,
/// which makes stub noise trivial to inject in tests.
pub trait NoiseSource: Send + Sync {
    /// Samples the field at `(x, y, z)`. Returns a value in [-1, 1].
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync,
{
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self(x, y, z)
    }
}

/// Seeded simplex noise field shared read-only by every band of a stack.
///
/// Permutation tables are built once in the constructor; sampling is a pure
/// function afterwards.
pub struct NoiseField {
    noise: OpenSimplex,
    seed: u32,
}

impl NoiseField {
    /// Creates a noise field whose output is fully determined by `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            seed,
        }
    }

    /// Creates a noise field with an unpredictable seed.
    ///
    /// The drawn seed is available through [`seed`](Self::seed), so a run can
    /// be reproduced later with [`new`](Self::new).
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish()
    }
}

impl NoiseSource for NoiseField {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        // OpenSimplex can overshoot the unit range by a hair near lattice peaks.
        self.noise.get([x, y, z]).clamp(-1.0, 1.0)
    }
}

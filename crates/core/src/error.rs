//! Error types for the wave-stack kernel.

use thiserror::Error;

/// Errors produced by kernel operations.
///
/// All of these are raised while building or reconfiguring a stack. The
/// per-frame path (`tick`/`update`) never fails.
#[derive(Debug, Error)]
pub enum WaveError {
    /// Structural geometry input was unusable (zero points, zero bands,
    /// too few points for a spline).
    #[error("geometry configuration error: {0}")]
    GeometryConfiguration(String),

    /// A numeric configuration value was outside its accepted range.
    #[error("parameter '{name}' out of range: {value} (expected {expected})")]
    ParamOutOfRange {
        name: String,
        value: f64,
        expected: String,
    },

    /// A gradient had no stops or a stop offset outside [0, 1].
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    /// Configuration JSON could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl WaveError {
    pub(crate) fn out_of_range(name: &str, value: f64, expected: &str) -> Self {
        WaveError::ParamOutOfRange {
            name: name.to_string(),
            value,
            expected: expected.to_string(),
        }
    }
}

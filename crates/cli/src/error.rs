//! Failures of the `wave-stack` binary and their exit codes.
//!
//! - 0:  success
//! - 2:  bad arguments (reported by clap before `run` starts)
//! - 10: the kernel refused to build the stack
//! - 11: reading the config file or writing the SVG failed
//! - 12: the config file or `--fps` was rejected
//! - 13: JSON output could not be produced

use std::fmt;
use std::path::PathBuf;
use wave_stack_core::WaveError;

pub enum CliError {
    /// Stack construction failed after the inputs were accepted.
    Kernel(WaveError),
    /// Config read or SVG write failure.
    Io(String),
    /// The config file parsed badly or failed validation.
    Config { path: PathBuf, source: WaveError },
    /// `--fps` was zero, negative or not finite.
    FrameRate(f64),
    /// JSON output failure.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Kernel(_) => 10,
            CliError::Io(_) => 11,
            CliError::Config { .. } | CliError::FrameRate(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Kernel(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Serialization(msg) => write!(f, "{msg}"),
            CliError::Config { path, source } => write!(f, "{}: {source}", path.display()),
            CliError::FrameRate(fps) => write!(f, "--fps must be a positive number, got {fps}"),
        }
    }
}

impl From<WaveError> for CliError {
    fn from(e: WaveError) -> Self {
        match e {
            WaveError::Io(msg) => CliError::Io(msg),
            other => CliError::Kernel(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#![deny(unsafe_code)]
//! CLI binary for wave-stack.
//!
//! Subcommands:
//! - `render`: play N frames and write the last one as SVG
//! - `paths`: print every frame's band paths
//! - `defaults`: print the default configuration

mod error;
mod pump;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{debug, Level};
use wave_stack_core::{NoiseField, QueuedScheduler, WaveAnimator, WaveStack, WaveStackConfig};

#[derive(Parser)]
#[command(name = "wave-stack", about = "Animated noise-wave stack renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log kernel activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every frame-producing subcommand.
#[derive(clap::Args)]
struct FrameArgs {
    /// Configuration JSON file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to play.
    #[arg(short, long, default_value_t = 60)]
    frames: usize,

    /// Virtual frame rate used to derive frame timestamps.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Noise seed for deterministic output. Random when omitted.
    #[arg(long)]
    seed: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Play frames and write the final frame as an SVG document.
    Render {
        #[command(flatten)]
        frames: FrameArgs,

        /// Output file path.
        #[arg(short, long, default_value = "waves.svg")]
        output: PathBuf,
    },
    /// Play frames and print every band path of every frame.
    Paths {
        #[command(flatten)]
        frames: FrameArgs,
    },
    /// Print the default configuration as JSON.
    Defaults,
}

fn load_config(path: Option<&Path>) -> Result<WaveStackConfig, CliError> {
    let Some(path) = path else {
        return Ok(WaveStackConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    WaveStackConfig::from_json_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds an idle animator for the requested config and seed.
fn build_animator(args: &FrameArgs) -> Result<(WaveAnimator<QueuedScheduler>, u32), CliError> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(CliError::FrameRate(args.fps));
    }
    let config = load_config(args.config.as_deref())?;
    let noise = match args.seed {
        Some(seed) => NoiseField::new(seed),
        None => NoiseField::from_entropy(),
    };
    let seed = noise.seed();
    debug!(seed, bands = config.bands.len(), "building wave stack");
    let stack = WaveStack::initialize(config, Arc::new(noise))?;
    Ok((WaveAnimator::new(stack, QueuedScheduler::new()), seed))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&WaveStackConfig::default())?);
        }
        Command::Render { frames, output } => {
            let (mut animator, seed) = build_animator(&frames)?;
            pump::pump_frames(&mut animator, frames.frames, frames.fps, |_, _, _| {});
            wave_stack_svg::write_stack_svg(animator.stack(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "frames": frames.frames,
                    "fps": frames.fps,
                    "seed": seed,
                    "bands": animator.stack().shapes().len(),
                    "noiseTimeline": animator.stack().noise_timeline(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} bands ({} frames at {} fps, seed {seed}) -> {}",
                    animator.stack().shapes().len(),
                    frames.frames,
                    frames.fps,
                    output.display()
                );
            }
        }
        Command::Paths { frames } => {
            let (mut animator, seed) = build_animator(&frames)?;
            let mut records = Vec::new();
            pump::pump_frames(&mut animator, frames.frames, frames.fps, |frame, timestamp, stack| {
                if cli.json {
                    records.push(serde_json::json!({
                        "frame": frame,
                        "timestamp": timestamp,
                        "paths": stack.paths(),
                    }));
                } else {
                    for (band, path) in stack.path_iter().enumerate() {
                        println!("frame {frame} band {band}: {path}");
                    }
                }
            });
            if cli.json {
                let info = serde_json::json!({ "seed": seed, "frames": records });
                println!("{}", serde_json::to_string_pretty(&info)?);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

//! Writing rendered SVG documents to disk.

use std::fs;
use std::path::Path;
use tracing::debug;
use wave_stack_core::{WaveError, WaveStack};

use crate::document::render_stack;

/// Writes an SVG document to `path`, replacing any existing file.
///
/// Returns `WaveError::Io` on write failure.
pub fn write_svg(document: &str, path: &Path) -> Result<(), WaveError> {
    fs::write(path, document).map_err(|e| WaveError::Io(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = document.len(), "svg written");
    Ok(())
}

/// Renders the current frame of `stack` and writes it to `path`.
pub fn write_stack_svg(stack: &WaveStack, path: &Path) -> Result<(), WaveError> {
    write_svg(&render_stack(stack), path)
}

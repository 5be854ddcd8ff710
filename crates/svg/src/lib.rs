#![deny(unsafe_code)]
//! SVG output for wave-stack.
//!
//! Sits on top of `wave-stack-core`: takes a configuration plus the kernel's
//! current band paths and lays them out as a standalone SVG document with
//! background, per-band styling and padded gradients. The kernel itself never
//! renders; this crate is one consumer of its output.

pub mod document;
pub mod snapshot;

pub use document::{render_document, render_stack};
pub use snapshot::{write_stack_svg, write_svg};

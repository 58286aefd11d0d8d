//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. [`operations`](super::operations)
//! decides which file to write and hands a [`ResizeParams`] to the
//! [`backend`](super::backend), which does the pixel work.
//!
//! - [`Quality`] — JPEG quality (1–100, default 75). Clamped on construction.
//! - [`ResizeParams`] — source, output path, detected kind, square edge, quality.

use crate::format::ImageKind;
use std::path::PathBuf;

/// Largest edge a baseline JPEG can store.
pub const MAX_EDGE: u32 = u16::MAX as u32;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    /// Matches the quality most JPEG encoders pick when none is given.
    fn default() -> Self {
        Self(75)
    }
}

/// Parameters for a square resize into a JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Decoder to use; never [`ImageKind::Other`].
    pub kind: ImageKind,
    /// Output is exactly `size × size`.
    pub size: u32,
    pub quality: Quality,
}

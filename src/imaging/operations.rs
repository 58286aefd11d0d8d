//! High-level resize operation.
//!
//! [`resize_image`] is the whole resize pipeline: sniff the content, skip what
//! cannot be decoded, derive the output name, make sure the output directory
//! exists, then let the backend do the pixel work.

use super::backend::{BackendError, ImageBackend};
use super::params::{MAX_EDGE, Quality, ResizeParams};
use crate::format::{self, ImageKind};
use crate::naming::output_file_name;
use crate::storage::{OutputDir, StorageError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} has no file name to derive an output name from")]
    NoFileName(PathBuf),
    #[error("output size {0} is outside 1-{MAX_EDGE}")]
    InvalidSize(u32),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// What a resize call did.
///
/// Unsupported input is not an error: it is reported as [`ResizeOutcome::Skipped`]
/// and nothing is written.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeOutcome {
    Written {
        output: PathBuf,
        width: u32,
        height: u32,
    },
    Skipped {
        source: PathBuf,
        kind: ImageKind,
    },
}

impl ResizeOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ResizeOutcome::Skipped { .. })
    }
}

/// Options for a resize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Edge length of the square output.
    pub size: u32,
    pub quality: Quality,
}

/// Plan a resize without touching pixels or the filesystem.
///
/// Returns `None` for unsupported kinds. A supported kind with a `size` the
/// JPEG encoder cannot store is an error.
pub fn plan_resize(
    source: &Path,
    kind: ImageKind,
    output_dir: &OutputDir,
    options: ResizeOptions,
) -> Result<Option<ResizeParams>, ResizeError> {
    if !kind.is_supported() {
        return Ok(None);
    }
    if !(1..=MAX_EDGE).contains(&options.size) {
        return Err(ResizeError::InvalidSize(options.size));
    }
    let name =
        output_file_name(source).ok_or_else(|| ResizeError::NoFileName(source.to_path_buf()))?;
    Ok(Some(ResizeParams {
        source: source.to_path_buf(),
        output: output_dir.join(&name),
        kind,
        size: options.size,
        quality: options.quality,
    }))
}

/// Resize `source` into `<output_dir>/<stem>.jpg` as a `size × size` JPEG.
pub fn resize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &OutputDir,
    options: ResizeOptions,
) -> Result<ResizeOutcome, ResizeError> {
    let kind = format::detect_file(source).map_err(|e| ResizeError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let Some(params) = plan_resize(source, kind, output_dir, options)? else {
        info!("Skipping {}: unsupported format", source.display());
        return Ok(ResizeOutcome::Skipped {
            source: source.to_path_buf(),
            kind,
        });
    };

    output_dir.ensure()?;
    debug!(
        "Resizing {} ({kind}) → {} at {}px",
        source.display(),
        params.output.display(),
        params.size
    );
    let dims = backend.resize(&params)?;
    info!("Wrote {}", params.output.display());

    Ok(ResizeOutcome::Written {
        output: params.output,
        width: dims.width,
        height: dims.height,
    })
}

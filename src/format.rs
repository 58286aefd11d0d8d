//! Coarse image-type classification.
//!
//! Two independent views of "what kind of image is this":
//!
//! | Function | Looks at | Accepts |
//! |---|---|---|
//! | [`is_image`] | file name only, case-sensitive | `jpg`, `png` |
//! | [`detect_signature`] / [`detect_file`] | magic bytes | JPEG, PNG |
//!
//! The two disagree on purpose for `photo.jpeg`: [`is_image`] rejects the
//! `jpeg` extension while the resize path, which trusts content, accepts the
//! file. Callers that pre-filter with [`is_image`] and then resize must keep
//! that in mind.

use image::ImageFormat;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const JPG_EXTENSION: &str = "jpg";
pub const JPEG_EXTENSION: &str = "jpeg";
pub const PNG_EXTENSION: &str = "png";

/// Longest magic number [`detect_signature`] needs (the PNG signature).
const SIGNATURE_LEN: usize = 8;

/// Format tag for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Other,
}

impl ImageKind {
    /// Map an extension (without the dot) to a kind. Case-sensitive.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            JPG_EXTENSION | JPEG_EXTENSION => ImageKind::Jpeg,
            PNG_EXTENSION => ImageKind::Png,
            _ => ImageKind::Other,
        }
    }

    /// Whether the resize path can decode this kind.
    pub fn is_supported(self) -> bool {
        !matches!(self, ImageKind::Other)
    }

    /// The `image` crate format used to decode this kind.
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            ImageKind::Jpeg => Some(ImageFormat::Jpeg),
            ImageKind::Png => Some(ImageFormat::Png),
            ImageKind::Other => None,
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Jpeg => JPEG_EXTENSION,
            ImageKind::Png => PNG_EXTENSION,
            ImageKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Everything after the last `.` in `name`, or all of `name` if it has none.
///
/// Operates on the raw string, so `dir.v2/file` yields `v2/file`.
///
/// ```
/// use thumbcard::format::file_extend;
/// assert_eq!(file_extend("a.b.c"), "c");
/// assert_eq!(file_extend("noext"), "noext");
/// ```
pub fn file_extend(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// `true` iff the extension is exactly `jpg` or `png`.
///
/// `jpeg` and `JPG` are rejected. A name without a dot is its own extension,
/// so a bare `jpg` or `png` counts as an image while `README` does not.
pub fn is_image(name: &str) -> bool {
    matches!(file_extend(name), JPG_EXTENSION | PNG_EXTENSION)
}

/// Classify raw bytes by their magic number.
pub fn detect_signature(bytes: &[u8]) -> ImageKind {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => ImageKind::Jpeg,
        Ok(ImageFormat::Png) => ImageKind::Png,
        _ => ImageKind::Other,
    }
}

/// Classify a file by reading only its header.
pub fn detect_file(path: &Path) -> io::Result<ImageKind> {
    let mut header = Vec::with_capacity(SIGNATURE_LEN);
    File::open(path)?
        .take(SIGNATURE_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(detect_signature(&header))
}

//! Pure Rust image backend built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::load_from_memory_with_format` |
//! | Resample | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! Lanczos3 is the slowest of the `image` filters and the sharpest. Inputs are
//! single interactive conversions, so quality wins.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Quality, ResizeParams};
use crate::format::ImageKind;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode `bytes` with the decoder for `kind`.
pub fn decode(bytes: &[u8], kind: ImageKind) -> Result<DynamicImage, BackendError> {
    let format = kind
        .image_format()
        .ok_or_else(|| BackendError::Decode(format!("no decoder for {kind} input")))?;
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| BackendError::Decode(format!("{kind}: {e}")))
}

/// Encode `img` as JPEG at `path`, replacing any existing file.
///
/// JPEG has no alpha channel; RGBA input is flattened to RGB by dropping alpha.
/// Encoding happens in memory, so a failed encode leaves `path` untouched.
pub fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, quality.value());
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(format!("{}: {}", path.display(), e)))?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&encoded)?;
    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
        let bytes = std::fs::read(&params.source)?;
        let img = decode(&bytes, params.kind)?;
        debug!(
            "Decoded {} ({}x{})",
            params.source.display(),
            img.width(),
            img.height()
        );

        let resized = img.resize_exact(params.size, params.size, FilterType::Lanczos3);
        save_jpeg(&resized, &params.output, params.quality)?;

        let (width, height) = resized.dimensions();
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage, RgbaImage};
    use std::path::PathBuf;

    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
        });
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = File::create(path).unwrap();
        let writer = BufWriter::new(file);
        JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn params(source: PathBuf, output: PathBuf, kind: ImageKind, size: u32) -> ResizeParams {
        ResizeParams {
            source,
            output,
            kind,
            size,
            quality: Quality::default(),
        }
    }

    #[test]
    fn resize_png_to_square_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        create_test_png(&source, 120, 80);
        let output = tmp.path().join("source.jpg");

        let dims = RustBackend::new()
            .resize(&params(source, output.clone(), ImageKind::Png, 32))
            .unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 32,
                height: 32
            }
        );

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (32, 32));
    }

    #[test]
    fn resize_jpeg_can_upscale() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("small.jpg");
        create_test_jpeg(&source, 16, 16);
        let output = tmp.path().join("out.jpg");

        RustBackend::new()
            .resize(&params(source, output.clone(), ImageKind::Jpeg, 48))
            .unwrap();
        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.dimensions(), (48, 48));
    }

    #[test]
    fn resize_missing_source_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = RustBackend::new().resize(&params(
            tmp.path().join("missing.png"),
            tmp.path().join("missing.jpg"),
            ImageKind::Png,
            10,
        ));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn resize_corrupt_source_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.png");
        // Valid PNG signature followed by garbage
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(b"garbage that is not a chunk");
        std::fs::write(&source, bytes).unwrap();
        let output = tmp.path().join("broken.jpg");

        let result = RustBackend::new().resize(&params(source, output.clone(), ImageKind::Png, 10));
        assert!(matches!(result, Err(BackendError::Decode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn decode_rejects_other_kind() {
        assert!(matches!(
            decode(b"anything", ImageKind::Other),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn save_jpeg_flattens_rgba() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("flat.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            10,
            10,
            image::Rgba([255, 0, 0, 128]),
        ));

        save_jpeg(&img, &path, Quality::new(90)).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.dimensions(), (10, 10));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn save_jpeg_failed_encode_leaves_no_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("empty.jpg");
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));

        let result = save_jpeg(&img, &path, Quality::default());
        assert!(matches!(result, Err(BackendError::Encode(_))));
        assert!(!path.exists());
    }

    #[test]
    fn save_jpeg_failed_encode_keeps_previous_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("keep.jpg");
        let good = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        save_jpeg(&good, &path, Quality::default()).unwrap();
        let before = std::fs::read(&path).unwrap();

        let bad = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(save_jpeg(&bad, &path, Quality::default()).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn save_jpeg_into_missing_dir_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let result = save_jpeg(&img, &tmp.path().join("nope/x.jpg"), Quality::default());
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}

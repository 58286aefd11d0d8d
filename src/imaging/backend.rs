//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between resize planning and pixel
//! work. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use a recording
//! mock so operation logic can be checked without encoding anything.

use super::params::ResizeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Pixel dimensions of a produced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Read, decode, resample and write `params.output` as JPEG.
    ///
    /// Returns the dimensions of the written image.
    fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::format::ImageKind;
    use crate::imaging::Quality;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    #[derive(Default)]
    pub struct MockBackend {
        pub operations: Mutex<Vec<RecordedOp>>,
        /// When set, every resize fails with a decode error carrying this message.
        pub fail_with: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Resize {
            source: String,
            output: String,
            kind: ImageKind,
            size: u32,
            quality: u8,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn resize(&self, params: &ResizeParams) -> Result<Dimensions, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                kind: params.kind,
                size: params.size,
                quality: params.quality.value(),
            });
            if let Some(message) = &self.fail_with {
                return Err(BackendError::Decode(message.clone()));
            }
            Ok(Dimensions {
                width: params.size,
                height: params.size,
            })
        }
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        let dims = backend
            .resize(&ResizeParams {
                source: "/source.png".into(),
                output: "/out/source.jpg".into(),
                kind: ImageKind::Png,
                size: 64,
                quality: Quality::new(80),
            })
            .unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 64,
                height: 64
            }
        );

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                size: 64,
                quality: 80,
                kind: ImageKind::Png,
                ..
            }
        ));
    }

    #[test]
    fn failing_mock_still_records() {
        let backend = MockBackend::failing("corrupt");
        let result = backend.resize(&ResizeParams {
            source: "/bad.jpg".into(),
            output: "/out/bad.jpg".into(),
            kind: ImageKind::Jpeg,
            size: 10,
            quality: Quality::default(),
        });
        assert!(matches!(result, Err(BackendError::Decode(m)) if m == "corrupt"));
        assert_eq!(backend.get_operations().len(), 1);
    }
}

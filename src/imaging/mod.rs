//! Image resizing — decode, resample, re-encode as JPEG.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Sniff** | [`crate::format::detect_file`] |
//! | **Decode** | `image` (JPEG, PNG) |
//! | **Resample** | Lanczos3, exact square |
//! | **Encode** | `JpegEncoder`, quality 75 unless configured |
//!
//! The module is split into:
//! - **Parameters**: what to resize, where to
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`resize_image`], which plans and calls the backend

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{ResizeError, ResizeOptions, ResizeOutcome, plan_resize, resize_image};
pub use params::{MAX_EDGE, Quality, ResizeParams};
pub use rust_backend::{RustBackend, save_jpeg};

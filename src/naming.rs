//! Output naming conventions.
//!
//! Every file thumbcard writes lands in one managed directory under the
//! storage root:
//!
//! ```text
//! <root>/
//! └── .images/
//!     ├── dawn.jpg        # resize of any `dawn.png` / `dawn.jpeg` / `dawn.jpg`
//!     └── out.jpeg        # latest text render, overwritten each time
//! ```
//!
//! Resized images keep their base name up to the first dot, so the same source
//! always maps to the same output. Two sources sharing that prefix
//! (`a/dawn.png`, `b/dawn.v2.jpg`) collide and the later resize wins.

use std::path::Path;

/// Name of the managed subdirectory under the storage root.
pub const IMAGE_DIR_NAME: &str = ".images";

/// Fixed output name for rendered text cards.
pub const RENDER_FILE_NAME: &str = "out.jpeg";

/// Extension given to every resized image.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Derive the resized output name: base name cut at its first `.`, then `.jpg`.
///
/// - `"/photos/dawn.png"` → `"dawn.jpg"`
/// - `"dawn.v2.jpeg"` → `"dawn.jpg"` (everything from the first dot goes)
/// - `"README"` → `"README.jpg"`
/// - `".png"` → `".jpg"` (nothing precedes the dot)
///
/// Returns `None` when the path has no file name component (e.g. `"/"` or `".."`).
pub fn output_file_name(source: &Path) -> Option<String> {
    let base = source.file_name()?.to_string_lossy();
    let stem = base.split('.').next().unwrap_or_default();
    Some(format!("{}.{}", stem, OUTPUT_EXTENSION))
}

//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! ```text
//! $ thumbcard resize shots/dawn.png
//! dawn.png → .images/dawn.jpg (128x128)
//!
//! $ thumbcard resize notes.txt
//! notes.txt skipped: unsupported format (other)
//!
//! $ thumbcard render "Notes" notes.txt
//! Notes → .images/out.jpeg
//!     Body lines: 12
//!
//! $ thumbcard classify a.jpeg b.png
//! a.jpeg
//!     Extension: jpeg (is_image: no)
//!     Signature: jpeg
//! ```

use crate::format::ImageKind;
use crate::imaging::ResizeOutcome;
use crate::render::RenderReport;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Last two components of `path` (`.images/dawn.jpg`), or the whole path.
fn short_path(path: &Path) -> String {
    let parent = path.parent().and_then(|p| p.file_name());
    match (parent, path.file_name()) {
        (Some(dir), Some(name)) => format!("{}/{}", dir.to_string_lossy(), name.to_string_lossy()),
        _ => path.display().to_string(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

// ============================================================================
// resize
// ============================================================================

pub fn format_resize_outcome(source: &Path, outcome: &ResizeOutcome) -> Vec<String> {
    match outcome {
        ResizeOutcome::Written {
            output,
            width,
            height,
        } => vec![format!(
            "{} → {} ({}x{})",
            file_label(source),
            short_path(output),
            width,
            height
        )],
        ResizeOutcome::Skipped { kind, .. } => vec![format!(
            "{} skipped: unsupported format ({})",
            file_label(source),
            kind
        )],
    }
}

pub fn print_resize_outcome(source: &Path, outcome: &ResizeOutcome) {
    for line in format_resize_outcome(source, outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// render
// ============================================================================

pub fn format_render_report(caption: &str, report: &RenderReport) -> Vec<String> {
    vec![
        format!("{} → {}", caption, short_path(&report.output)),
        format!("{}Body lines: {}", indent(1), report.lines_drawn),
    ]
}

pub fn print_render_report(caption: &str, report: &RenderReport) {
    for line in format_render_report(caption, report) {
        println!("{}", line);
    }
}

// ============================================================================
// classify
// ============================================================================

/// One classified path: name-based and content-based views side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub extension: String,
    pub is_image: bool,
    /// `None` when the file could not be read.
    pub signature: Option<ImageKind>,
}

pub fn format_classification(path: &Path, c: &Classification) -> Vec<String> {
    let signature = match c.signature {
        Some(kind) => kind.to_string(),
        None => "unreadable".to_string(),
    };
    vec![
        path.display().to_string(),
        format!(
            "{}Extension: {} (is_image: {})",
            indent(1),
            c.extension,
            yes_no(c.is_image)
        ),
        format!("{}Signature: {}", indent(1), signature),
    ]
}

pub fn print_classification(path: &Path, c: &Classification) {
    for line in format_classification(path, c) {
        println!("{}", line);
    }
}

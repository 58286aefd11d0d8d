//! # thumbcard
//!
//! A small image utility with two independent jobs:
//!
//! - **Resize**: sniff a file, and if it is a JPEG or PNG, resample it to an
//!   exact square with Lanczos3 and write it as `<root>/.images/<stem>.jpg`.
//! - **Render**: draw a caption and the first 12 lines of a text file onto a
//!   300×300 card and write it as `<root>/.images/out.jpeg`.
//!
//! ```text
//! resize:  path ─► format::detect_file ─► imaging::resize_image ─► .images/<stem>.jpg
//!                         │
//!                         └─ not JPEG/PNG ─► ResizeOutcome::Skipped (nothing written)
//!
//! render:  caption + text ─► render::render_text_image ─► .images/out.jpeg
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | Extension and magic-byte classification |
//! | [`imaging`] | Decode → Lanczos3 resample → JPEG encode |
//! | [`render`] | Text card layout and glyph rasterization |
//! | [`storage`] | The managed `.images` output directory |
//! | [`naming`] | Output file names and fixed directory/file names |
//! | [`config`] | `thumbcard.toml` loading, merging, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Errors
//!
//! Every operation returns a `Result`; nothing in the library panics on bad
//! input. The one deliberate non-error is an unsupported resize input, which
//! comes back as [`imaging::ResizeOutcome::Skipped`] so callers can tell it
//! apart from a write.
//!
//! # Concurrency
//!
//! Calls are synchronous and share no state, but there is no file locking:
//! concurrent resizes of same-stem inputs, or concurrent renders, race on the
//! output file and the last writer wins.

pub mod config;
pub mod format;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod render;
pub mod storage;

//! Text cards: a caption plus the head of a text file, rendered to JPEG.
//!
//! ```text
//! caption + text file
//!     │
//!     ├─ load font ─────────► FontFace (size, dpi, hinting; bundled DejaVu Sans by default)
//!     ├─ read ≤ 12 lines
//!     ├─ draw_card ─────────► 300×300 canvas: background, ruler, caption, body
//!     └─ save_jpeg ─────────► <root>/.images/out.jpeg
//! ```
//!
//! Every render overwrites the same `out.jpeg`. Lines are never wrapped; a
//! line wider than the canvas, or a baseline below it, is simply clipped.
//! Only the first [`MAX_LINE_BYTES`] of a line are read.

mod face;
pub mod layout;

pub use face::{BUNDLED_FONT, FontFace, TextFace};
pub use layout::{BODY_LEFT_MARGIN, CANVAS_SIZE, LineMetrics, MAX_BODY_LINES, RULER_INSET};

use crate::config::RenderConfig;
use crate::imaging::{BackendError, Quality, save_jpeg};
use crate::naming::RENDER_FILE_NAME;
use crate::storage::{OutputDir, StorageError};
use image::{DynamicImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Bytes kept from a single text line; the rest of the line is skipped.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("font not found: {0}")]
    FontNotFound(PathBuf),
    #[error("failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse font {font}: {source}")]
    FontParse {
        font: String,
        #[source]
        source: ab_glyph::InvalidFont,
    },
    #[error("failed to read text file {path}: {source}")]
    TextFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to write card: {0}")]
    Encode(#[from] BackendError),
}

/// Foreground, background and ruler colors of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    pub ruler: Rgba<u8>,
}

impl ColorScheme {
    pub fn black_on_white() -> Self {
        Self {
            foreground: Rgba([0x00, 0x00, 0x00, 0xff]),
            background: Rgba([0xff, 0xff, 0xff, 0xff]),
            ruler: Rgba([0xdd, 0xdd, 0xdd, 0xff]),
        }
    }

    pub fn white_on_black() -> Self {
        Self {
            foreground: Rgba([0xff, 0xff, 0xff, 0xff]),
            background: Rgba([0x00, 0x00, 0x00, 0xff]),
            ruler: Rgba([0x22, 0x22, 0x22, 0xff]),
        }
    }

    pub fn for_config(config: &RenderConfig) -> Self {
        if config.white_on_black {
            Self::white_on_black()
        } else {
            Self::black_on_white()
        }
    }
}

/// A drawn, not yet encoded, card.
#[derive(Debug, Clone)]
pub struct Card {
    pub canvas: RgbaImage,
    /// Left edge of the caption.
    pub caption_x: f32,
    /// Body lines drawn below the caption.
    pub lines_drawn: usize,
}

/// What a render call wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub output: PathBuf,
    pub caption_x: f32,
    pub lines_drawn: usize,
}

/// Load the font named by `config.font_path`, or the bundled one when unset.
pub fn load_face(config: &RenderConfig) -> Result<FontFace, RenderError> {
    let Some(path) = &config.font_path else {
        return FontFace::bundled(config).map_err(|source| RenderError::FontParse {
            font: "bundled DejaVu Sans".to_string(),
            source,
        });
    };
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RenderError::FontNotFound(path.clone()),
        _ => RenderError::FontRead {
            path: path.clone(),
            source,
        },
    })?;
    FontFace::from_bytes(bytes, config).map_err(|source| RenderError::FontParse {
        font: path.display().to_string(),
        source,
    })
}

/// Read at most `max` lines from `path`.
///
/// Line endings (`\n` or `\r\n`) are stripped and invalid UTF-8 is replaced
/// rather than rejected. Lines longer than [`MAX_LINE_BYTES`] are truncated.
/// Reading stops as soon as `max` lines are collected.
pub fn read_head_lines(path: &Path, max: usize) -> io::Result<Vec<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::with_capacity(max);
    let mut buf = Vec::new();

    while lines.len() < max {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if read == MAX_LINE_BYTES {
            skip_line(&mut reader)?;
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }

    Ok(lines)
}

/// Consume input up to and including the next `\n` without buffering it.
fn skip_line(reader: &mut impl BufRead) -> io::Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let n = available.len();
                reader.consume(n);
            }
        }
    }
}

/// Draw a full card: background, ruler, centered caption, body lines.
///
/// Only the first [`MAX_BODY_LINES`] entries of `body` are drawn.
pub fn draw_card<F: TextFace + ?Sized>(
    face: &F,
    colors: &ColorScheme,
    metrics: LineMetrics,
    caption: &str,
    body: &[String],
) -> Card {
    let mut canvas = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, colors.background);
    for (x, y) in layout::ruler_pixels(CANVAS_SIZE, CANVAS_SIZE) {
        canvas.put_pixel(x, y, colors.ruler);
    }

    let caption_x = layout::centered_x(CANVAS_SIZE, face.measure(caption));
    face.draw(
        &mut canvas,
        caption,
        caption_x,
        metrics.baseline(0) as f32,
        colors.foreground,
    );

    let mut lines_drawn = 0;
    for (i, line) in body.iter().take(MAX_BODY_LINES).enumerate() {
        debug!("Body line {}: {}", i + 1, line);
        face.draw(
            &mut canvas,
            line,
            BODY_LEFT_MARGIN as f32,
            metrics.baseline(i + 1) as f32,
            colors.foreground,
        );
        lines_drawn += 1;
    }

    Card {
        canvas,
        caption_x,
        lines_drawn,
    }
}

/// Render with an already-loaded face and write `out.jpeg`.
pub fn render_with_face<F: TextFace + ?Sized>(
    face: &F,
    config: &RenderConfig,
    caption: &str,
    text_path: &Path,
    output_dir: &OutputDir,
) -> Result<RenderReport, RenderError> {
    let body = read_head_lines(text_path, MAX_BODY_LINES).map_err(|source| {
        RenderError::TextFile {
            path: text_path.to_path_buf(),
            source,
        }
    })?;

    let metrics = LineMetrics::new(config.size, config.spacing, config.dpi);
    let card = draw_card(face, &ColorScheme::for_config(config), metrics, caption, &body);

    output_dir.ensure()?;
    let output = output_dir.join(RENDER_FILE_NAME);
    save_jpeg(
        &DynamicImage::ImageRgba8(card.canvas),
        &output,
        Quality::default(),
    )?;
    info!(
        "Rendered {} with {} body lines → {}",
        text_path.display(),
        card.lines_drawn,
        output.display()
    );

    Ok(RenderReport {
        output,
        caption_x: card.caption_x,
        lines_drawn: card.lines_drawn,
    })
}

/// Render `caption` and the head of `text_path` to `<output_dir>/out.jpeg`.
pub fn render_text_image(
    config: &RenderConfig,
    caption: &str,
    text_path: &Path,
    output_dir: &OutputDir,
) -> Result<RenderReport, RenderError> {
    let face = load_face(config)?;
    render_with_face(&face, config, caption, text_path, output_dir)
}

//! Text faces: something that can measure and draw a single line of text.
//!
//! [`FontFace`] is the real implementation over a TrueType font parsed by
//! `ab_glyph`. Layout is deliberately simple: one glyph per `char`, pair
//! kerning, left to right, no shaping or fallback fonts.

use super::layout::pixels_per_em;
use crate::config::{Hinting, RenderConfig};
use ab_glyph::{Font, FontVec, GlyphId, InvalidFont, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};

/// DejaVu Sans, used whenever no font file is configured.
///
/// Bitstream Vera license; see `assets/DejaVuSans-LICENSE.txt`.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Tab stops are this many spaces wide.
const TAB_WIDTH: usize = 4;

/// A drawing surface for single lines of text.
pub trait TextFace {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str) -> f32;

    /// Draw `text` with its pen origin at `x` and its baseline at `baseline`.
    ///
    /// Pixels falling outside the canvas are dropped.
    fn draw(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, color: Rgba<u8>);
}

/// A TrueType font at a fixed size, DPI and hinting mode.
pub struct FontFace {
    font: FontVec,
    scale: PxScale,
    hinting: Hinting,
}

impl FontFace {
    /// Parse the bundled DejaVu Sans and size it from `config`.
    pub fn bundled(config: &RenderConfig) -> Result<Self, InvalidFont> {
        Self::from_bytes(BUNDLED_FONT.to_vec(), config)
    }

    /// Parse `bytes` and size the face from `config`.
    pub fn from_bytes(bytes: Vec<u8>, config: &RenderConfig) -> Result<Self, InvalidFont> {
        let font = FontVec::try_from_vec(bytes)?;
        let em = pixels_per_em(config.size, config.dpi) as f32;
        // ab_glyph scales by ascent-to-descent height, not by the em square
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let scale = PxScale::from(em * font.height_unscaled() / units_per_em);
        Ok(Self {
            font,
            scale,
            hinting: config.hinting,
        })
    }

    fn snap(&self, v: f32) -> f32 {
        match self.hinting {
            Hinting::None => v,
            Hinting::Full => v.round(),
        }
    }

    /// Pen position of every glyph in `text` starting at `x`, plus the final pen position.
    ///
    /// A tab advances like [`TAB_WIDTH`] spaces; other control characters are dropped.
    fn layout(&self, text: &str, x: f32) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = self.snap(x);
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        let chars = text.chars().flat_map(|c| {
            let n = if c == '\t' { TAB_WIDTH } else { 1 };
            std::iter::repeat_n(if c == '\t' { ' ' } else { c }, n)
        });
        for ch in chars.filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                caret += self.snap(scaled.kern(prev, id));
            }
            glyphs.push((id, caret));
            caret += self.snap(scaled.h_advance(id));
            prev = Some(id);
        }

        (glyphs, caret)
    }
}

impl TextFace for FontFace {
    fn measure(&self, text: &str) -> f32 {
        let (_, end) = self.layout(text, 0.0);
        end
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, color: Rgba<u8>) {
        let (width, height) = canvas.dimensions();
        let (glyphs, _) = self.layout(text, x);

        for (id, pen_x) in glyphs {
            let glyph = id.with_scale_and_position(self.scale, point(pen_x, baseline));
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue; // whitespace
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let dst = canvas.get_pixel_mut(px as u32, py as u32);
                *dst = blend(*dst, color, coverage);
            });
        }
    }
}

/// Composite `src` over `dst` with `coverage` in `0.0..=1.0`.
fn blend(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let c = coverage.clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| (d as f32 * (1.0 - c) + s as f32 * c).round() as u8;
    Rgba([
        mix(dst[0], src[0]),
        mix(dst[1], src[1]),
        mix(dst[2], src[2]),
        dst[3].max(src[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_with(hinting: Hinting) -> FontFace {
        let config = RenderConfig {
            hinting,
            ..RenderConfig::default()
        };
        FontFace::bundled(&config).unwrap()
    }

    #[test]
    fn blend_endpoints() {
        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        assert_eq!(blend(white, black, 0.0), white);
        assert_eq!(blend(white, black, 1.0), black);
        assert_eq!(blend(white, black, 0.5), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let result = FontFace::from_bytes(b"definitely not a font".to_vec(), &RenderConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn measure_grows_with_text() {
        let face = face_with(Hinting::None);
        assert_eq!(face.measure(""), 0.0);
        let short = face.measure("ab");
        let long = face.measure("abcdef");
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn full_hinting_measures_whole_pixels() {
        let face = face_with(Hinting::Full);
        let w = face.measure("Hinted caption");
        assert_eq!(w, w.round());
    }

    #[test]
    fn draw_marks_pixels_near_baseline() {
        let face = face_with(Hinting::None);
        let white = Rgba([255, 255, 255, 255]);
        let mut canvas = RgbaImage::from_pixel(100, 40, white);
        face.draw(&mut canvas, "Hi", 5.0, 30.0, Rgba([0, 0, 0, 255]));

        let inked: Vec<_> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != white)
            .collect();
        assert!(!inked.is_empty());
        // Glyphs sit above the baseline for "Hi"
        assert!(inked.iter().all(|(_, y, _)| *y <= 31));
    }

    #[test]
    fn draw_off_canvas_is_clipped() {
        let face = face_with(Hinting::None);
        let white = Rgba([255, 255, 255, 255]);
        let mut canvas = RgbaImage::from_pixel(20, 20, white);
        face.draw(&mut canvas, "Far away", 5.0, 500.0, Rgba([0, 0, 0, 255]));
        face.draw(&mut canvas, "Left", -200.0, 10.0, Rgba([0, 0, 0, 255]));
        assert!(canvas.pixels().all(|p| *p == white));
    }

    #[test]
    fn tab_advances_like_spaces() {
        let face = face_with(Hinting::None);
        let tabbed = face.measure("\tx");
        let spaced = face.measure(&format!("{}x", " ".repeat(TAB_WIDTH)));
        assert!((tabbed - spaced).abs() < 0.001, "{tabbed} vs {spaced}");
        assert!(tabbed > face.measure("x"));
    }

    #[test]
    fn other_control_chars_take_no_space() {
        let face = face_with(Hinting::None);
        assert_eq!(face.measure("a\u{7}b"), face.measure("ab"));
    }
}

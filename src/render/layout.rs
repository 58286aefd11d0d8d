//! Pure layout math for the text card.
//!
//! All functions here are pure and testable without fonts or pixels.
//!
//! ```text
//!  0,0 ┌──────────────────────────────┐
//!      │ 10,10 ┌──────────────────┐   │
//!      │       │     Caption      │   │  ← baseline_start, centered
//!      │       │ body line 1      │   │  ← + line_advance, x = 20
//!      │       │ ...  (max 12)    │   │
//!      │       └──────────────────┘ 290,290
//!      └──────────────────────────────┘ 300,300
//! ```

/// Canvas edge in pixels; the card is always square.
pub const CANVAS_SIZE: u32 = 300;

/// Inset of the ruler from every canvas edge.
pub const RULER_INSET: u32 = 10;

/// Left edge of body lines.
pub const BODY_LEFT_MARGIN: u32 = 20;

/// Body lines drawn below the caption, however long the file.
pub const MAX_BODY_LINES: usize = 12;

/// Points per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Pixels per em for a font of `size` points at `dpi`.
pub fn pixels_per_em(size: f64, dpi: f64) -> f64 {
    size * dpi / POINTS_PER_INCH
}

/// Vertical placement of successive baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMetrics {
    /// Baseline of the caption.
    pub first_baseline: i32,
    /// Distance between consecutive baselines.
    pub advance: i32,
}

impl LineMetrics {
    /// `first_baseline = 10 + ceil(size·dpi/72)`, `advance = ceil(size·spacing·dpi/72)`.
    pub fn new(size: f64, spacing: f64, dpi: f64) -> Self {
        Self {
            first_baseline: RULER_INSET as i32 + pixels_per_em(size, dpi).ceil() as i32,
            advance: (size * spacing * dpi / POINTS_PER_INCH).ceil() as i32,
        }
    }

    /// Baseline of line `index`, where the caption is line 0.
    pub fn baseline(&self, index: usize) -> i32 {
        self.first_baseline + self.advance * index as i32
    }
}

/// Left edge that horizontally centers text of `measured` width.
///
/// Negative when the text is wider than the canvas; the overflow is clipped
/// evenly on both sides.
pub fn centered_x(canvas_width: u32, measured: f32) -> f32 {
    (canvas_width as f32 - measured) / 2.0
}

/// Pixels of the ruler rectangle for a `width × height` canvas.
///
/// Vertical edges at `x = 10` and `x = width - 10` cover `y` in
/// `10..height - 10`; horizontal edges at `y = 10` and `y = height - 10` cover
/// `x` in `10..width - 10`. The far corner `(width - 10, height - 10)` is
/// therefore left unset.
pub fn ruler_pixels(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let inset = RULER_INSET;
    let right = width.saturating_sub(inset);
    let bottom = height.saturating_sub(inset);
    let vertical = (inset..bottom).flat_map(move |y| [(inset, y), (right, y)]);
    let horizontal = (inset..right).flat_map(move |x| [(x, inset), (x, bottom)]);
    vertical.chain(horizontal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_per_em_scales_with_dpi() {
        assert_eq!(pixels_per_em(14.0, 72.0), 14.0);
        assert_eq!(pixels_per_em(14.0, 144.0), 28.0);
        assert_eq!(pixels_per_em(12.0, 96.0), 16.0);
    }

    #[test]
    fn default_line_metrics() {
        // size 14, spacing 1.5, 72 dpi
        let m = LineMetrics::new(14.0, 1.5, 72.0);
        assert_eq!(m.first_baseline, 24);
        assert_eq!(m.advance, 21);
        assert_eq!(m.baseline(0), 24);
        assert_eq!(m.baseline(1), 45);
        assert_eq!(m.baseline(12), 24 + 12 * 21);
    }

    #[test]
    fn line_metrics_round_up() {
        // 10.5 * 72/72 → 11; 10.5 * 1.1 = 11.55 → 12
        let m = LineMetrics::new(10.5, 1.1, 72.0);
        assert_eq!(m.first_baseline, 21);
        assert_eq!(m.advance, 12);
    }

    #[test]
    fn centered_x_balances_margins() {
        let measured = 123.0;
        let x = centered_x(CANVAS_SIZE, measured);
        assert_eq!(measured + 2.0 * x, CANVAS_SIZE as f32);
    }

    #[test]
    fn centered_x_negative_when_too_wide() {
        assert_eq!(centered_x(300, 400.0), -50.0);
    }

    #[test]
    fn ruler_covers_expected_edges() {
        let pixels: Vec<_> = ruler_pixels(300, 300).collect();
        assert_eq!(pixels.len(), 4 * 280);
        assert!(pixels.contains(&(10, 10)));
        assert!(pixels.contains(&(290, 10)));
        assert!(pixels.contains(&(10, 290)));
        assert!(pixels.contains(&(10, 289)));
        assert!(pixels.contains(&(289, 290)));
        assert!(!pixels.contains(&(290, 290)));
        assert!(!pixels.contains(&(9, 10)));
        assert!(pixels.iter().all(|&(x, y)| x < 300 && y < 300));
    }

    #[test]
    fn ruler_on_tiny_canvas_is_empty() {
        assert_eq!(ruler_pixels(15, 15).count(), 0);
    }
}

//! Text measurement and glyph rasterization.
//!
//! The engine never touches fonts directly. It asks a [`TextRenderer`] for
//! the metrics of a label and later asks it to draw the label at a baseline.
//! [`FontdueText`] is the bundled implementation.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{BadgeError, Result};
use crate::raster::composite_over;

/// Metrics of a run of text at a given pixel size.
///
/// `width` and `height` describe the tight ink box of the glyphs; `advance`
/// is the horizontal distance the pen moves. `ascent` and `descent` are the
/// font's line metrics as positive distances above and below the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// A text shaping and rasterization service.
pub trait TextRenderer: Send + Sync {
    /// Measures `text` at `px` pixels per em.
    fn measure(&self, text: &str, px: f32) -> TextBounds;

    /// Draws `text` onto `target` with its pen starting at `x` and its
    /// baseline at `baseline`, blending `color` source-over.
    fn draw(&self, text: &str, px: f32, color: Rgba<u8>, target: &mut RgbaImage, x: f32, baseline: f32);
}

// ============================================================================
// FontdueText
// ============================================================================

/// [`TextRenderer`] backed by a single `fontdue` font.
pub struct FontdueText {
    font: fontdue::Font,
}

impl FontdueText {
    /// Loads a TrueType or OpenType font from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| BadgeError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    /// Loads a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Pen position of each glyph, kerning applied, plus the total advance.
    fn layout(&self, text: &str, px: f32) -> (Vec<(char, f32)>, f32) {
        let mut pen = 0.0;
        let mut prev: Option<char> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for ch in text.chars() {
            if let Some(left) = prev {
                pen += self.font.horizontal_kern(left, ch, px).unwrap_or(0.0);
            }
            glyphs.push((ch, pen));
            pen += self.font.metrics(ch, px).advance_width;
            prev = Some(ch);
        }

        (glyphs, pen)
    }
}

impl TextRenderer for FontdueText {
    fn measure(&self, text: &str, px: f32) -> TextBounds {
        let (glyphs, advance) = self.layout(text, px);

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;

        for (ch, pen) in glyphs {
            let m = self.font.metrics(ch, px);
            if m.width == 0 || m.height == 0 {
                continue;
            }
            let left = pen + m.xmin as f32;
            min_x = min_x.min(left);
            max_x = max_x.max(left + m.width as f32);
            min_y = min_y.min(m.ymin as f32);
            max_y = max_y.max((m.ymin + m.height as i32) as f32);
        }

        let (width, height) = if max_x >= min_x {
            (max_x - min_x, max_y - min_y)
        } else {
            (0.0, 0.0)
        };

        let (ascent, descent) = match self.font.horizontal_line_metrics(px) {
            Some(line) => (line.ascent, -line.descent),
            None => (px * 0.8, px * 0.2),
        };

        TextBounds { width, height, advance, ascent, descent }
    }

    fn draw(&self, text: &str, px: f32, color: Rgba<u8>, target: &mut RgbaImage, x: f32, baseline: f32) {
        let (glyphs, _) = self.layout(text, px);

        for (ch, pen) in glyphs {
            let (m, coverage) = self.font.rasterize(ch, px);
            if m.width == 0 || m.height == 0 {
                continue;
            }

            let glyph = RgbaImage::from_fn(m.width as u32, m.height as u32, |col, row| {
                let cov = coverage[row as usize * m.width + col as usize] as u16;
                Rgba([color[0], color[1], color[2], (cov * color[3] as u16 / 255) as u8])
            });
            let gx = (x + pen).round() as i32 + m.xmin;
            let gy = baseline.round() as i32 - (m.ymin + m.height as i32);
            composite_over(target, &glyph, gx, gy);
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

/// Deterministic renderer for tests: every character is a solid block
/// `0.5em` wide and `0.7em` tall sitting on the baseline.
#[cfg(test)]
pub(crate) struct BlockText;

#[cfg(test)]
impl TextRenderer for BlockText {
    fn measure(&self, text: &str, px: f32) -> TextBounds {
        let n = text.chars().count() as f32;
        let height = if n > 0.0 { px * 0.7 } else { 0.0 };
        TextBounds {
            width: n * px * 0.5,
            height,
            advance: n * px * 0.5,
            ascent: px * 0.8,
            descent: px * 0.2,
        }
    }

    fn draw(&self, text: &str, px: f32, color: Rgba<u8>, target: &mut RgbaImage, x: f32, baseline: f32) {
        let width = text.chars().count() as f32 * px * 0.5;
        let x0 = x.round().max(0.0) as u32;
        let x1 = ((x + width).round().max(0.0) as u32).min(target.width());
        let y0 = (baseline - px * 0.7).round().max(0.0) as u32;
        let y1 = (baseline.round().max(0.0) as u32).min(target.height());
        for y in y0..y1 {
            for x in x0..x1 {
                target.put_pixel(x, y, color);
            }
        }
    }
}

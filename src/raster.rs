//! Rasterization of a [`BadgePlan`] using tiny-skia (via resvg).
//!
//! Shapes are drawn on a premultiplied tiny-skia [`Pixmap`]; the public API
//! deals in straight-alpha [`RgbaImage`]s, so this module also owns the
//! conversions between the two.

use image::{Rgba, RgbaImage};
use log::{trace, warn};
use resvg::tiny_skia::{
    ColorU8, FillRule, IntSize, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::engine::{BadgePlan, DrawOp, ShapeOutline};
use crate::error::{BadgeError, Result};
use crate::geometry::RectF;
use crate::text::TextRenderer;

/// Cubic Bézier control distance for a quarter circle of unit radius.
const KAPPA: f32 = 0.552_284_8;

// ============================================================================
// Plan execution
// ============================================================================

/// Executes `plan` against `source`, returning the composited image.
pub fn render_plan(plan: &BadgePlan, source: &RgbaImage, text: &dyn TextRenderer) -> Result<RgbaImage> {
    let canvas = plan.canvas();
    let mut pixmap = Pixmap::new(canvas.width, canvas.height).ok_or(BadgeError::EmptyCanvas {
        width: canvas.width,
        height: canvas.height,
    })?;

    for op in &plan.ops {
        trace!("draw {:?}", op);
        match op {
            DrawOp::Image { offset_x } => {
                let Some(base) = rgba_image_to_pixmap(source) else {
                    continue;
                };
                pixmap.draw_pixmap(
                    offset_x.round() as i32,
                    0,
                    base.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
            DrawOp::Stroke { outline, rect, color, width } => {
                let Some(path) = outline_path(*outline, *rect) else {
                    warn!("skipping border for degenerate badge {:?}", rect);
                    continue;
                };
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint(*color), &stroke, Transform::identity(), None);
            }
            DrawOp::Fill { outline, rect, color } => {
                let Some(path) = outline_path(*outline, *rect) else {
                    warn!("skipping fill for degenerate badge {:?}", rect);
                    continue;
                };
                pixmap.fill_path(&path, &paint(*color), FillRule::Winding, Transform::identity(), None);
            }
            DrawOp::Label { text: label, size, color, x, baseline } => {
                let mut layer = RgbaImage::new(canvas.width, canvas.height);
                text.draw(label, *size, *color, &mut layer, *x, *baseline);
                if let Some(glyphs) = rgba_image_to_pixmap(&layer) {
                    pixmap.draw_pixmap(0, 0, glyphs.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
                }
            }
        }
    }

    Ok(pixmap_to_rgba_image(&pixmap))
}

fn paint(color: Rgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

// ============================================================================
// Paths
// ============================================================================

/// Builds the path for a badge outline. Returns `None` for empty rectangles.
fn outline_path(outline: ShapeOutline, rect: RectF) -> Option<Path> {
    let rect = rect.to_skia()?;
    match outline {
        ShapeOutline::Oval => PathBuilder::from_oval(rect),
        ShapeOutline::RoundRect { radius } => rounded_rect_path(rect, radius),
    }
}

/// Rounded rectangle with the corner radius clamped to half the short side.
fn rounded_rect_path(rect: resvg::tiny_skia::Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() * 0.5).min(rect.height() * 0.5);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let k = r * KAPPA;
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

// ============================================================================
// Pixel conversion
// ============================================================================

/// Converts a straight-alpha image to a premultiplied pixmap.
///
/// Returns `None` for zero-sized images.
fn rgba_image_to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(img.width(), img.height())?;
    let mut data = Vec::with_capacity(img.as_raw().len());
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        let c = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, size)
}

/// Converts a premultiplied pixmap back to a straight-alpha image.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `src` onto `dest` with its top-left corner at `(x, y)`.
///
/// Uses standard alpha blending (source over destination). Pixels falling
/// outside `dest` are dropped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let (dest_width, dest_height) = (dest.width() as i32, dest.height() as i32);

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;
        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }
        let dst = dest.get_pixel_mut(dx as u32, dy as u32);
        *dst = blend_pixel(*src_pixel, *dst);
    }
}

/// Blends one straight-alpha pixel over another.
fn blend_pixel(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let out = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        out.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

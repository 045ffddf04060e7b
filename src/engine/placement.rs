//! Badge rectangle and output canvas size.
//!
//! Inner badges sit flush in a corner of the image and never change the
//! canvas. Outer badges widen the canvas by a margin of one badge width on
//! each side; the image is drawn after the left margin, right badges start
//! at the image's three-quarter line and left badges end at its quarter line.

use log::warn;

use super::metrics::BadgeGeometry;
use crate::error::{BadgeError, Result};
use crate::geometry::{RectF, SizePx};
use crate::style::{BadgeStyle, Placement};

/// Fully resolved layout of a composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgePlacement {
    /// Badge bounds in canvas coordinates.
    pub badge_rect: RectF,

    /// Output canvas size.
    pub canvas: SizePx,

    /// Horizontal offset at which the source image is drawn.
    pub image_offset_x: f32,
}

/// Places a badge of `geometry` on an image of size `image`.
///
/// Fails only for outer badges whose canvas would not fit in `u32`.
pub fn resolve(geometry: &BadgeGeometry, image: SizePx, style: &BadgeStyle) -> Result<BadgePlacement> {
    match style.placement {
        Placement::Inner => Ok(resolve_inner(geometry, image, style)),
        Placement::Outer => resolve_outer(geometry, image, style),
    }
}

fn resolve_inner(geometry: &BadgeGeometry, image: SizePx, style: &BadgeStyle) -> BadgePlacement {
    let (w, h) = (image.width as f32, image.height as f32);
    let bw = geometry.width.min(w);
    let bh = geometry.height.min(h);
    if bw < geometry.width || bh < geometry.height {
        warn!(
            "badge {}x{} larger than {}x{} image, clamping",
            geometry.width, geometry.height, image.width, image.height
        );
    }

    let (left, right) = if style.position.is_left() { (0.0, bw) } else { (w - bw, w) };
    let (top, bottom) = if style.position.is_top() { (0.0, bh) } else { (h - bh, h) };

    BadgePlacement {
        badge_rect: RectF::from_ltrb(left, top, right, bottom),
        canvas: image,
        image_offset_x: 0.0,
    }
}

fn resolve_outer(geometry: &BadgeGeometry, image: SizePx, style: &BadgeStyle) -> Result<BadgePlacement> {
    let (bw, bh) = (geometry.width, geometry.height);
    let margin = bw.ceil();
    let too_large = || BadgeError::CanvasTooLarge {
        badge_width: bw,
        badge_height: bh,
        max: u32::MAX,
    };

    let width = u64::from(image.width) + 2 * to_u64(margin).ok_or_else(too_large)?;
    let height = u64::from(image.height).max(to_u64(bh.ceil()).ok_or_else(too_large)?);
    let canvas = SizePx::new(
        u32::try_from(width).map_err(|_| too_large())?,
        u32::try_from(height).map_err(|_| too_large())?,
    );

    let w = image.width as f32;
    let (left, right) = if style.position.is_left() {
        let right = margin + w * 0.25;
        (right - bw, right)
    } else {
        let left = margin + w * 0.75;
        (left, left + bw)
    };
    let ch = canvas.height as f32;
    let (top, bottom) = if style.position.is_top() { (0.0, bh) } else { (ch - bh, ch) };

    Ok(BadgePlacement {
        badge_rect: RectF::from_ltrb(left, top, right, bottom),
        canvas,
        image_offset_x: margin,
    })
}

/// Whole-pixel extent as `u64`, or `None` if it is negative, non-finite or
/// beyond `u32`.
fn to_u64(extent: f32) -> Option<u64> {
    (extent.is_finite() && extent >= 0.0 && extent <= u32::MAX as f32).then(|| extent as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::metrics::ShapeOutline;
    use crate::style::BadgePosition;

    const POSITIONS: [BadgePosition; 4] = [
        BadgePosition::TopLeft,
        BadgePosition::TopRight,
        BadgePosition::BottomLeft,
        BadgePosition::BottomRight,
    ];

    fn geometry(width: f32, height: f32) -> BadgeGeometry {
        BadgeGeometry { width, height, outline: ShapeOutline::Oval }
    }

    fn style(position: BadgePosition, placement: Placement) -> BadgeStyle {
        BadgeStyle { position, placement, ..BadgeStyle::default() }
    }

    #[test]
    fn inner_corners() {
        let g = geometry(20.0, 20.0);
        let image = SizePx::new(100, 100);
        let rect = |p| resolve(&g, image, &style(p, Placement::Inner)).unwrap().badge_rect;

        assert_eq!(rect(BadgePosition::TopRight), RectF::from_ltrb(80.0, 0.0, 100.0, 20.0));
        assert_eq!(rect(BadgePosition::BottomRight), RectF::from_ltrb(80.0, 80.0, 100.0, 100.0));
        assert_eq!(rect(BadgePosition::TopLeft), RectF::from_ltrb(0.0, 0.0, 20.0, 20.0));
        assert_eq!(rect(BadgePosition::BottomLeft), RectF::from_ltrb(0.0, 80.0, 20.0, 100.0));
    }

    #[test]
    fn inner_keeps_canvas() {
        for position in POSITIONS {
            let p = resolve(&geometry(30.0, 14.0), SizePx::new(64, 48), &style(position, Placement::Inner)).unwrap();
            assert_eq!(p.canvas, SizePx::new(64, 48));
            assert_eq!(p.image_offset_x, 0.0);
        }
    }

    #[test]
    fn inner_clamps_oversized_badge() {
        let p = resolve(&geometry(40.0, 40.0), SizePx::new(16, 16), &style(BadgePosition::BottomRight, Placement::Inner)).unwrap();
        assert_eq!(p.badge_rect, RectF::from_ltrb(0.0, 0.0, 16.0, 16.0));
    }

    #[test]
    fn outer_widens_canvas() {
        let p = resolve(&geometry(20.0, 20.0), SizePx::new(100, 100), &style(BadgePosition::TopRight, Placement::Outer)).unwrap();
        assert_eq!(p.canvas, SizePx::new(140, 100));
        assert_eq!(p.image_offset_x, 20.0);
        assert_eq!(p.badge_rect, RectF::from_ltrb(95.0, 0.0, 115.0, 20.0));
    }

    #[test]
    fn outer_left_mirrors_right() {
        let p = resolve(&geometry(20.0, 20.0), SizePx::new(100, 100), &style(BadgePosition::BottomLeft, Placement::Outer)).unwrap();
        assert_eq!(p.badge_rect, RectF::from_ltrb(25.0, 80.0, 45.0, 100.0));
    }

    #[test]
    fn outer_grows_height_for_tall_badge() {
        let p = resolve(&geometry(20.0, 20.0), SizePx::new(8, 8), &style(BadgePosition::BottomRight, Placement::Outer)).unwrap();
        assert_eq!(p.canvas.height, 20);
        assert!(p.badge_rect.is_within(p.canvas.width, p.canvas.height));
    }

    #[test]
    fn outer_canvas_overflow_is_an_error() {
        let huge = geometry(3.0e9, 3.0e9);
        let result = resolve(&huge, SizePx::new(10, 10), &style(BadgePosition::TopRight, Placement::Outer));
        assert!(matches!(result, Err(BadgeError::CanvasTooLarge { .. })));

        let tall = geometry(10.0, 5.0e9);
        let result = resolve(&tall, SizePx::new(10, 10), &style(BadgePosition::BottomLeft, Placement::Outer));
        assert!(matches!(result, Err(BadgeError::CanvasTooLarge { .. })));
    }

    #[test]
    fn inner_never_overflows() {
        let huge = geometry(3.0e9, 3.0e9);
        let p = resolve(&huge, SizePx::new(10, 10), &style(BadgePosition::TopLeft, Placement::Inner)).unwrap();
        assert_eq!(p.badge_rect, RectF::from_ltrb(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn badge_always_inside_canvas() {
        let sizes = [(1, 1), (8, 30), (48, 48), (100, 100), (513, 77)];
        let geometries = [geometry(10.0, 10.0), geometry(20.0, 20.0), geometry(37.3, 13.6)];

        for (w, h) in sizes {
            for g in &geometries {
                for position in POSITIONS {
                    for placement in [Placement::Inner, Placement::Outer] {
                        let image = SizePx::new(w, h);
                        let p = resolve(g, image, &style(position, placement)).unwrap();
                        assert!(
                            p.badge_rect.is_within(p.canvas.width, p.canvas.height),
                            "{:?} outside {:?} for {:?}/{:?}",
                            p.badge_rect,
                            p.canvas,
                            position,
                            placement
                        );
                        assert!(p.canvas.width >= w && p.canvas.height >= h);
                        match placement {
                            Placement::Inner => assert_eq!(p.canvas, image),
                            Placement::Outer => assert!(p.canvas.width > w),
                        }
                    }
                }
            }
        }
    }
}

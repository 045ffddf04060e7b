//! Geometry types shared by the layout stages.
//!
//! Badge layout works in floating point pixel coordinates ([`RectF`]),
//! while output canvases are whole pixels ([`SizePx`]).

/// A rectangle defined by its edges in pixel coordinates.
///
/// Edges are stored rather than origin and size so that corner-anchored
/// layouts can be written the way they are reasoned about: "from the right
/// edge minus the badge width, to the right edge".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge (exclusive)
    pub right: f32,
    /// Bottom edge (exclusive)
    pub bottom: f32,
}

impl RectF {
    /// Creates a rectangle from its four edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    /// Returns true if the rectangle lies fully inside `[0, width] x [0, height]`.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.right <= width as f32
            && self.bottom <= height as f32
            && self.left <= self.right
            && self.top <= self.bottom
    }

    /// Converts to a tiny-skia rectangle. Returns `None` for empty or
    /// non-finite rectangles.
    pub(crate) fn to_skia(self) -> Option<resvg::tiny_skia::Rect> {
        if !(self.width() > 0.0 && self.height() > 0.0) {
            return None;
        }
        resvg::tiny_skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_and_center() {
        let rect = RectF::from_ltrb(80.0, 0.0, 100.0, 20.0);
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 20.0);
        assert_eq!(rect.center_x(), 90.0);
        assert_eq!(rect.center_y(), 10.0);
    }

    #[test]
    fn empty_rect_has_no_skia_rect() {
        assert!(RectF::from_ltrb(5.0, 5.0, 5.0, 9.0).to_skia().is_none());
        assert!(RectF::from_ltrb(5.0, 5.0, 9.0, 5.0).to_skia().is_none());
        assert!(RectF::from_ltrb(9.0, 5.0, 5.0, 9.0).to_skia().is_none());
        assert!(RectF::from_ltrb(0.0, 0.0, f32::NAN, 9.0).to_skia().is_none());
        assert!(RectF::from_ltrb(1.0, 2.0, 3.0, 4.0).to_skia().is_some());
    }

    #[test]
    fn rect_containment() {
        assert!(RectF::from_ltrb(0.0, 0.0, 100.0, 100.0).is_within(100, 100));
        assert!(!RectF::from_ltrb(-0.5, 0.0, 10.0, 10.0).is_within(100, 100));
        assert!(!RectF::from_ltrb(90.0, 0.0, 100.5, 10.0).is_within(100, 100));
    }

    #[test]
    fn size_px_is_empty() {
        assert!(SizePx::new(0, 10).is_empty());
        assert!(!SizePx::new(1, 1).is_empty());
    }
}

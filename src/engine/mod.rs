//! Badge layout and compositing engine.
//!
//! A composite runs as a single pass through four stages:
//!
//! ```text
//! count ──► label ──► metrics ──► placement ──► draw ops ──► raster
//!           "12"      24x14       rect+canvas   image        RgbaImage
//!                                               border
//!                                               fill
//!                                               label
//! ```
//!
//! [`compose_plan`] runs the pure layout stages and returns a [`BadgePlan`]
//! that can be inspected without touching any pixels. [`compose`] plans and
//! then rasterizes the plan.

pub mod label;
pub mod metrics;
pub mod placement;

pub use label::{BadgeLabel, format_label};
pub use metrics::{BadgeGeometry, ShapeOutline};
pub use placement::BadgePlacement;

use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::{BadgeError, Result};
use crate::geometry::{RectF, SizePx};
use crate::raster::render_plan;
use crate::style::BadgeStyle;
use crate::text::{TextBounds, TextRenderer};

// ============================================================================
// Draw operations
// ============================================================================

/// One step of a composite, in the order it must be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Draw the source image at `(offset_x, 0)`.
    Image { offset_x: f32 },

    /// Stroke the badge outline. The stroke is centered on the outline.
    Stroke {
        outline: ShapeOutline,
        rect: RectF,
        color: Rgba<u8>,
        width: f32,
    },

    /// Fill the badge outline.
    Fill {
        outline: ShapeOutline,
        rect: RectF,
        color: Rgba<u8>,
    },

    /// Draw the label with its pen at `x` and baseline at `baseline`.
    Label {
        text: String,
        size: f32,
        color: Rgba<u8>,
        x: f32,
        baseline: f32,
    },
}

/// The fully resolved composite: layout results plus ordered draw ops.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgePlan {
    pub label: BadgeLabel,
    pub geometry: BadgeGeometry,
    pub placement: BadgePlacement,
    pub ops: Vec<DrawOp>,
}

impl BadgePlan {
    /// Output canvas size.
    pub fn canvas(&self) -> SizePx {
        self.placement.canvas
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Lays out a badge for an image of size `image`.
///
/// Returns `Ok(None)` when the style hides the badge (negative count); a
/// hidden style is not validated. Otherwise the style is validated first.
pub fn compose_plan(image: SizePx, style: &BadgeStyle, text: &dyn TextRenderer) -> Result<Option<BadgePlan>> {
    if style.is_hidden() {
        return Ok(None);
    }
    style.validate()?;

    let label = format_label(style.count as u32, style.count_ceiling);
    let size = metrics::text_size(style);
    let bounds = if label.is_dot {
        TextBounds::default()
    } else {
        text.measure(&label.text, size)
    };

    let geometry = metrics::measure(&label, &bounds, style);
    let placement = placement::resolve(&geometry, image, style)?;
    let rect = placement.badge_rect;

    debug!(
        "badge {:?} label={:?} rect={:?} canvas={}x{}",
        style.shape, label.text, rect, placement.canvas.width, placement.canvas.height
    );

    let mut ops = vec![DrawOp::Image {
        offset_x: placement.image_offset_x,
    }];

    if style.border_width > 0.0 {
        ops.push(DrawOp::Stroke {
            outline: geometry.outline,
            rect,
            color: style.border_color,
            width: style.border_width,
        });
    }

    ops.push(DrawOp::Fill {
        outline: geometry.outline,
        rect,
        color: style.fill_color,
    });

    if !label.is_dot {
        ops.push(DrawOp::Label {
            text: label.text.clone(),
            size,
            color: style.text_color,
            x: rect.center_x() - bounds.advance * 0.5,
            baseline: rect.center_y() + (bounds.ascent - bounds.descent) * 0.5,
        });
    }

    Ok(Some(BadgePlan { label, geometry, placement, ops }))
}

/// Composites a badge onto `source`.
///
/// A negative count returns a copy of `source` untouched, without checking
/// the rest of the style. Otherwise the style is validated first and an
/// empty source is rejected.
pub fn compose(source: &RgbaImage, style: &BadgeStyle, text: &dyn TextRenderer) -> Result<RgbaImage> {
    if style.is_hidden() {
        debug!("badge hidden (count {}), passing image through", style.count);
        return Ok(source.clone());
    }

    let image = SizePx::new(source.width(), source.height());
    if image.is_empty() {
        return Err(BadgeError::EmptyCanvas {
            width: image.width,
            height: image.height,
        });
    }

    match compose_plan(image, style, text)? {
        Some(plan) => render_plan(&plan, source, text),
        None => Ok(source.clone()),
    }
}

// ============================================================================
// Tests
// ============================================================================

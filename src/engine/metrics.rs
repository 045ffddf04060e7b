//! Badge size and outline from a label and its text metrics.

use super::label::BadgeLabel;
use crate::style::{BadgeShape, BadgeStyle, CORNER_RADIUS_RATIO, MIDDLE_COUNT};
use crate::text::TextBounds;

/// Dot diameter as a fraction of the badge size.
pub const DOT_RATIO: f32 = 0.5;

/// How the badge outline is traced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeOutline {
    /// Ellipse inscribed in the badge rectangle.
    Oval,
    /// Rectangle with rounded corners.
    RoundRect { radius: f32 },
}

/// Measured footprint of a badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeGeometry {
    pub width: f32,
    pub height: f32,
    pub outline: ShapeOutline,
}

/// Fraction of the usable badge size given to the label text.
pub fn text_size_percent(style: &BadgeStyle) -> f32 {
    let count = style.count.max(0) as u32;
    match style.shape {
        BadgeShape::Circle if count > style.count_ceiling => 0.4,
        BadgeShape::Circle if count > MIDDLE_COUNT => 0.5,
        _ => 0.6,
    }
}

/// Label text size in pixels.
pub fn text_size(style: &BadgeStyle) -> f32 {
    text_size_percent(style) * (style.badge_size - style.border_width)
}

/// Computes the badge footprint for `label`, whose ink box is `bounds`.
pub fn measure(label: &BadgeLabel, bounds: &TextBounds, style: &BadgeStyle) -> BadgeGeometry {
    let size = style.badge_size;

    if label.is_dot {
        let d = size * DOT_RATIO;
        return BadgeGeometry { width: d, height: d, outline: ShapeOutline::Oval };
    }

    match style.shape {
        BadgeShape::Circle => BadgeGeometry {
            width: size,
            height: size,
            outline: ShapeOutline::Oval,
        },
        BadgeShape::Pill if label.is_single_char() => {
            let d = bounds.height + style.digit_padding;
            BadgeGeometry { width: d, height: d, outline: ShapeOutline::Oval }
        }
        BadgeShape::Pill => {
            let pad = style.pill_padding;
            let height = bounds.height + pad;
            BadgeGeometry {
                width: (bounds.width + pad).max(height),
                height,
                outline: ShapeOutline::RoundRect {
                    radius: size * CORNER_RADIUS_RATIO,
                },
            }
        }
    }
}

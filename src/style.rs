//! Badge style configuration.
//!
//! A [`BadgeStyle`] is a frozen, `Copy` snapshot of everything the engine
//! needs to know about how a badge looks and where it goes. Each composite
//! call receives its own snapshot, so styles can be shared across threads
//! without synchronization.

use image::Rgba;

use crate::error::{BadgeError, Result};

/// Counts above this use a smaller label on circular badges.
pub const MIDDLE_COUNT: u32 = 99;

/// Default count above which the label becomes `"999+"`.
pub const DEFAULT_COUNT_CEILING: u32 = 999;

/// Default badge size in density-independent units.
pub const DEFAULT_BADGE_SIZE_DP: f32 = 20.0;

/// Default border width in density-independent units.
pub const DEFAULT_BORDER_SIZE_DP: f32 = 2.0;

/// Padding around single-character labels, in density-independent units.
pub const DEFAULT_DIGIT_PADDING_DP: f32 = 8.0;

/// Padding around multi-character labels, in density-independent units.
pub const DEFAULT_PILL_PADDING_DP: f32 = 6.0;

/// Corner radius of multi-character pills, as a fraction of the badge size.
pub const CORNER_RADIUS_RATIO: f32 = 0.4;

/// Default label color (white).
pub const DEFAULT_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default fill color, the platform's light red accent (`#FF4444`).
pub const DEFAULT_FILL_COLOR: Rgba<u8> = Rgba([255, 68, 68, 255]);

/// Default border color (white).
pub const DEFAULT_BORDER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ============================================================================
// Enums
// ============================================================================

/// Corner of the source image the badge is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgePosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BadgePosition {
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// Outline of the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeShape {
    /// Fixed-size circle of diameter `badge_size`. Long labels may clip.
    Circle,
    /// Oval for single characters, widening rounded rectangle otherwise.
    #[default]
    Pill,
}

/// Whether the badge overlaps the image or sits beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Overlaps the image; the canvas keeps the image's size.
    #[default]
    Inner,
    /// Extends beyond the image; the canvas is widened.
    Outer,
}

// ============================================================================
// BadgeStyle
// ============================================================================

/// Immutable description of a badge, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeStyle {
    pub text_color: Rgba<u8>,
    pub fill_color: Rgba<u8>,
    pub border_color: Rgba<u8>,

    /// Diameter of circular badges and the basis for the label size.
    pub badge_size: f32,

    /// Border stroke width. Zero disables the border.
    pub border_width: f32,

    /// Added to the text height of single-character pills.
    pub digit_padding: f32,

    /// Added to the text extent of multi-character pills.
    pub pill_padding: f32,

    pub position: BadgePosition,
    pub shape: BadgeShape,
    pub placement: Placement,

    /// Negative hides the badge, zero draws a dot, positive draws digits.
    pub count: i32,

    /// Counts above this are shown as `"<ceiling>+"`.
    pub count_ceiling: u32,
}

impl Default for BadgeStyle {
    /// The default style at a display density of 1.0.
    fn default() -> Self {
        Self {
            text_color: DEFAULT_TEXT_COLOR,
            fill_color: DEFAULT_FILL_COLOR,
            border_color: DEFAULT_BORDER_COLOR,
            badge_size: DEFAULT_BADGE_SIZE_DP,
            border_width: DEFAULT_BORDER_SIZE_DP,
            digit_padding: DEFAULT_DIGIT_PADDING_DP,
            pill_padding: DEFAULT_PILL_PADDING_DP,
            position: BadgePosition::default(),
            shape: BadgeShape::default(),
            placement: Placement::default(),
            count: 0,
            count_ceiling: DEFAULT_COUNT_CEILING,
        }
    }
}

impl BadgeStyle {
    /// Returns true if the badge should not be drawn at all.
    pub fn is_hidden(&self) -> bool {
        self.count < 0
    }

    /// Checks the numeric invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        let paddings_usable = [self.digit_padding, self.pill_padding]
            .iter()
            .all(|p| p.is_finite() && *p >= 0.0);
        let sizes_usable = self.badge_size.is_finite()
            && self.border_width.is_finite()
            && self.border_width >= 0.0
            && paddings_usable;
        if !sizes_usable || self.badge_size <= self.border_width {
            return Err(BadgeError::InvalidStyleConfiguration {
                badge_size: self.badge_size,
                border_width: self.border_width,
            });
        }
        if self.count_ceiling == 0 {
            return Err(BadgeError::InvalidCountCeiling(0));
        }
        Ok(())
    }
}

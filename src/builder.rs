//! Fluent badge builder.

use std::path::PathBuf;

use image::RgbaImage;
use log::debug;

use crate::context::BadgeContext;
use crate::engine::compose;
use crate::error::{BadgeError, Result};
use crate::profile::BadgeProfile;
use crate::style::{
    BadgePosition, BadgeShape, BadgeStyle, DEFAULT_BADGE_SIZE_DP, DEFAULT_BORDER_SIZE_DP,
    DEFAULT_COUNT_CEILING, DEFAULT_DIGIT_PADDING_DP, DEFAULT_PILL_PADDING_DP, Placement,
};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`BadgeProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &BadgeProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> BadgeProfile;
}

// ============================================================================
// Sources and slots
// ============================================================================

/// Where the image to decorate comes from.
#[derive(Debug, Clone)]
pub enum BadgeSource {
    /// An already decoded image.
    Image(RgbaImage),
    /// Encoded bytes in any format `image` can sniff.
    Encoded(Vec<u8>),
    /// A file on disk.
    Path(PathBuf),
}

impl BadgeSource {
    /// Decodes the source into straight-alpha RGBA.
    pub fn load(self) -> Result<RgbaImage> {
        match self {
            Self::Image(image) => Ok(image),
            Self::Encoded(bytes) => Ok(image::load_from_memory(&bytes)?.to_rgba8()),
            Self::Path(path) => Ok(image::open(path)?.to_rgba8()),
        }
    }
}

impl From<RgbaImage> for BadgeSource {
    fn from(image: RgbaImage) -> Self {
        Self::Image(image)
    }
}

impl From<Vec<u8>> for BadgeSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Encoded(bytes)
    }
}

impl From<PathBuf> for BadgeSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Something that displays an image and can have it replaced.
pub trait ImageSlot {
    /// The image currently shown, if any.
    fn image(&self) -> Option<&RgbaImage>;

    /// Replaces the shown image.
    fn set_image(&mut self, image: RgbaImage);
}

impl ImageSlot for Option<RgbaImage> {
    fn image(&self) -> Option<&RgbaImage> {
        self.as_ref()
    }

    fn set_image(&mut self, image: RgbaImage) {
        *self = Some(image);
    }
}

// ============================================================================
// BadgeBuilder
// ============================================================================

/// Collects badge settings and composites them onto a source image.
///
/// Colors are kept as tokens and sizes in density-independent units until
/// [`style`](Self::style) resolves them against the [`BadgeContext`]. The
/// builder is a plain value: clone it to keep a template around.
///
/// # Example
///
/// ```no_run
/// use badge_renderer::{BadgeBuilder, BadgeContext, BadgePosition, FontdueText};
/// # fn main() -> badge_renderer::Result<()> {
/// let ctx = BadgeContext::new(FontdueText::from_file("DejaVuSans.ttf")?);
///
/// let icon = BadgeBuilder::new(ctx)
///     .source(std::path::PathBuf::from("icon.png"))
///     .count(12)
///     .badge_position(BadgePosition::BottomRight)
///     .badge_color("#2196f3")
///     .build()?;
/// icon.save("icon-badged.png")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BadgeBuilder {
    ctx: BadgeContext,
    text_color: String,
    badge_color: String,
    border_color: String,
    badge_size: f32,
    border_size: f32,
    position: BadgePosition,
    shape: BadgeShape,
    placement: Placement,
    count: i32,
    count_ceiling: i32,
    source: Option<BadgeSource>,
}

impl BadgeBuilder {
    /// Creates a builder with the default look: a white-bordered light red
    /// pill in the top-right corner showing a dot.
    pub fn new(ctx: BadgeContext) -> Self {
        Self {
            ctx,
            text_color: "white".into(),
            badge_color: "holo_red_light".into(),
            border_color: "white".into(),
            badge_size: DEFAULT_BADGE_SIZE_DP,
            border_size: DEFAULT_BORDER_SIZE_DP,
            position: BadgePosition::default(),
            shape: BadgeShape::default(),
            placement: Placement::default(),
            count: 0,
            count_ceiling: DEFAULT_COUNT_CEILING as i32,
            source: None,
        }
    }

    /// Creates a builder seeded from a profile.
    pub fn with_profile(ctx: BadgeContext, profile: &BadgeProfile) -> Self {
        let mut builder = Self::new(ctx);
        builder.apply_profile(profile);
        builder
    }

    pub fn text_color(mut self, token: impl Into<String>) -> Self {
        self.text_color = token.into();
        self
    }

    pub fn badge_color(mut self, token: impl Into<String>) -> Self {
        self.badge_color = token.into();
        self
    }

    pub fn badge_border_color(mut self, token: impl Into<String>) -> Self {
        self.border_color = token.into();
        self
    }

    /// Badge size in density-independent units.
    pub fn badge_size(mut self, dp: f32) -> Self {
        self.badge_size = dp;
        self
    }

    /// Border width in density-independent units. Zero disables the border.
    pub fn badge_border_size(mut self, dp: f32) -> Self {
        self.border_size = dp;
        self
    }

    pub fn badge_position(mut self, position: BadgePosition) -> Self {
        self.position = position;
        self
    }

    /// `true` selects [`BadgeShape::Circle`], `false` [`BadgeShape::Pill`].
    pub fn circle(mut self, circle: bool) -> Self {
        self.shape = if circle { BadgeShape::Circle } else { BadgeShape::Pill };
        self
    }

    /// `true` selects [`Placement::Inner`], `false` [`Placement::Outer`].
    pub fn inner(mut self, inner: bool) -> Self {
        self.placement = if inner { Placement::Inner } else { Placement::Outer };
        self
    }

    pub fn shape(mut self, shape: BadgeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Negative hides the badge, zero shows a dot.
    pub fn count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    /// Must be positive; checked when the style is resolved.
    pub fn count_ceiling(mut self, ceiling: i32) -> Self {
        self.count_ceiling = ceiling;
        self
    }

    pub fn source(mut self, source: impl Into<BadgeSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Resolves the current settings into a validated style snapshot.
    pub fn style(&self) -> Result<BadgeStyle> {
        if self.count_ceiling <= 0 {
            return Err(BadgeError::InvalidCountCeiling(self.count_ceiling.into()));
        }

        let colors = self.ctx.colors();
        let resolve = |token: &str| {
            colors
                .resolve(token)
                .ok_or_else(|| BadgeError::UnknownColor(token.to_string()))
        };
        let metrics = self.ctx.metrics;

        let style = BadgeStyle {
            text_color: resolve(&self.text_color)?,
            fill_color: resolve(&self.badge_color)?,
            border_color: resolve(&self.border_color)?,
            badge_size: metrics.dp_to_px(self.badge_size),
            border_width: metrics.dp_to_px(self.border_size),
            digit_padding: metrics.dp_to_px(DEFAULT_DIGIT_PADDING_DP),
            pill_padding: metrics.dp_to_px(DEFAULT_PILL_PADDING_DP),
            position: self.position,
            shape: self.shape,
            placement: self.placement,
            count: self.count,
            count_ceiling: self.count_ceiling as u32,
        };
        style.validate()?;
        Ok(style)
    }

    /// Composites the badge onto the configured source.
    pub fn build(mut self) -> Result<RgbaImage> {
        let source = self.source.take().ok_or(BadgeError::MissingSourceImage)?;
        let style = self.style()?;
        let image = source.load()?;
        debug!("building badge over {}x{} source", image.width(), image.height());
        compose(&image, &style, self.ctx.text())
    }

    /// Composites the badge and writes the result into `slot`.
    ///
    /// Without an explicit source the slot's current image is decorated.
    /// On error the slot is left untouched.
    pub fn build_into<S: ImageSlot + ?Sized>(self, slot: &mut S) -> Result<()> {
        if self.source.is_none() && slot.image().is_none() {
            return Err(BadgeError::MissingSourceImage);
        }
        let style = self.style()?;
        let image = match self.source {
            Some(source) => source.load()?,
            None => slot.image().cloned().ok_or(BadgeError::MissingSourceImage)?,
        };
        let output = compose(&image, &style, self.ctx.text())?;
        slot.set_image(output);
        Ok(())
    }
}

impl Configurable for BadgeBuilder {
    /// Applies every setting in the profile. The source image is kept.
    fn apply_profile(&mut self, profile: &BadgeProfile) {
        self.text_color = profile.text_color.clone();
        self.badge_color = profile.badge_color.clone();
        self.border_color = profile.border_color.clone();
        self.badge_size = profile.badge_size;
        self.border_size = profile.border_size;
        self.position = profile.position.into();
        self.shape = profile.shape.into();
        self.placement = profile.placement.into();
        self.count = profile.count;
        self.count_ceiling = profile.count_ceiling;
    }

    fn export_profile(&self) -> BadgeProfile {
        BadgeProfile {
            text_color: self.text_color.clone(),
            badge_color: self.badge_color.clone(),
            border_color: self.border_color.clone(),
            badge_size: self.badge_size,
            border_size: self.border_size,
            position: self.position.into(),
            shape: self.shape.into(),
            placement: self.placement.into(),
            count: self.count,
            count_ceiling: self.count_ceiling,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba};

    use super::*;
    use crate::context::{DisplayMetrics, ThemeColors};
    use crate::profile::{SerializablePlacement, SerializableShape};
    use crate::text::BlockText;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn builder() -> BadgeBuilder {
        BadgeBuilder::new(BadgeContext::new(BlockText))
    }

    fn blue_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, BLUE)
    }

    #[test]
    fn default_style() {
        assert_eq!(builder().style().unwrap(), BadgeStyle::default());
    }

    #[test]
    fn sizes_scale_with_density() {
        let ctx = BadgeContext::new(BlockText).with_metrics(DisplayMetrics::new(2.0));
        let style = BadgeBuilder::new(ctx).style().unwrap();
        assert_eq!(style.badge_size, 40.0);
        assert_eq!(style.border_width, 4.0);
    }

    #[test]
    fn setters_reach_style() {
        let style = builder()
            .text_color("black")
            .badge_color("#00ff00")
            .badge_border_color("transparent")
            .badge_size(30.0)
            .badge_border_size(0.0)
            .badge_position(BadgePosition::BottomLeft)
            .circle(true)
            .inner(false)
            .count(7)
            .count_ceiling(9)
            .style()
            .unwrap();

        assert_eq!(style.text_color, Rgba([0, 0, 0, 255]));
        assert_eq!(style.fill_color, Rgba([0, 255, 0, 255]));
        assert_eq!(style.border_color[3], 0);
        assert_eq!(style.badge_size, 30.0);
        assert_eq!(style.border_width, 0.0);
        assert_eq!(style.position, BadgePosition::BottomLeft);
        assert_eq!(style.shape, BadgeShape::Circle);
        assert_eq!(style.placement, Placement::Outer);
        assert_eq!(style.count, 7);
        assert_eq!(style.count_ceiling, 9);
    }

    #[test]
    fn custom_color_tokens() {
        let colors = ThemeColors::new().with_color("brand", Rgba([1, 2, 3, 255]));
        let ctx = BadgeContext::new(BlockText).with_colors(colors);
        let style = BadgeBuilder::new(ctx).badge_color("brand").style().unwrap();
        assert_eq!(style.fill_color, Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn unknown_color_rejected() {
        let result = builder().badge_color("not-a-color").style();
        assert!(matches!(result, Err(BadgeError::UnknownColor(token)) if token == "not-a-color"));
    }

    #[test]
    fn invalid_sizes_rejected() {
        let result = builder().badge_size(2.0).badge_border_size(2.0).style();
        assert!(matches!(result, Err(BadgeError::InvalidStyleConfiguration { .. })));
    }

    #[test]
    fn non_positive_ceiling_rejected() {
        assert!(matches!(
            builder().count_ceiling(0).style(),
            Err(BadgeError::InvalidCountCeiling(0))
        ));
        assert!(matches!(
            builder().count_ceiling(-5).style(),
            Err(BadgeError::InvalidCountCeiling(-5))
        ));
    }

    #[test]
    fn missing_source_rejected() {
        assert!(matches!(builder().count(3).build(), Err(BadgeError::MissingSourceImage)));
    }

    #[test]
    fn hidden_badge_returns_source() {
        let source = blue_image(24, 24);
        let out = builder().source(source.clone()).count(-1).build().unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn builds_from_encoded_bytes() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(blue_image(40, 40))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let out = builder().source(bytes).count(3).build().unwrap();
        assert_eq!(out.dimensions(), (40, 40));
        assert_eq!(*out.get_pixel(0, 39), BLUE);
        assert_ne!(*out.get_pixel(30, 10), BLUE);
    }

    #[test]
    fn undecodable_bytes_rejected() {
        let result = builder().source(b"garbage".to_vec()).count(1).build();
        assert!(matches!(result, Err(BadgeError::Decode(_))));
    }

    #[test]
    fn build_into_decorates_slot_image() {
        let mut slot = Some(blue_image(100, 100));
        builder().count(5).inner(false).build_into(&mut slot).unwrap();
        // single-digit oval: 0.7 * 10.8 + 8 = 15.56, margin 16 on each side
        assert_eq!(slot.unwrap().dimensions(), (132, 100));

        let mut slot = Some(blue_image(100, 100));
        builder().count(5).circle(true).inner(false).build_into(&mut slot).unwrap();
        assert_eq!(slot.unwrap().dimensions(), (140, 100));
    }

    #[test]
    fn build_into_prefers_explicit_source() {
        let mut slot = Some(blue_image(100, 100));
        builder().source(blue_image(30, 30)).build_into(&mut slot).unwrap();
        assert_eq!(slot.unwrap().dimensions(), (30, 30));
    }

    #[test]
    fn build_into_empty_slot_fails_untouched() {
        let mut slot: Option<RgbaImage> = None;
        let result = builder().count(2).build_into(&mut slot);
        assert!(matches!(result, Err(BadgeError::MissingSourceImage)));
        assert!(slot.is_none());
    }

    #[test]
    fn missing_source_reported_before_style_errors() {
        let broken = builder().count(2).badge_color("not-a-color").count_ceiling(0);

        let result = broken.clone().build();
        assert!(matches!(result, Err(BadgeError::MissingSourceImage)));

        let mut slot: Option<RgbaImage> = None;
        let result = broken.build_into(&mut slot);
        assert!(matches!(result, Err(BadgeError::MissingSourceImage)));
    }

    #[test]
    fn paddings_scale_with_density_only() {
        let ctx = BadgeContext::new(BlockText).with_metrics(DisplayMetrics::new(2.0));
        let style = BadgeBuilder::new(ctx).badge_size(40.0).style().unwrap();
        assert_eq!(style.badge_size, 80.0);
        assert_eq!(style.digit_padding, 16.0);
        assert_eq!(style.pill_padding, 12.0);
    }

    #[test]
    fn profile_roundtrip_through_builder() {
        let profile = BadgeProfile::new()
            .with_count(42)
            .with_shape(SerializableShape::Circle)
            .with_placement(SerializablePlacement::Outer);

        let builder = BadgeBuilder::with_profile(BadgeContext::new(BlockText), &profile);
        assert_eq!(builder.export_profile(), profile);

        let style = builder.style().unwrap();
        assert_eq!(style.count, 42);
        assert_eq!(style.shape, BadgeShape::Circle);
        assert_eq!(style.placement, Placement::Outer);
    }

    #[test]
    fn cloned_builders_are_independent() {
        let template = builder().badge_color("black");
        let a = template.clone().count(1);
        let b = template.count(2);
        assert_eq!(a.style().unwrap().count, 1);
        assert_eq!(b.style().unwrap().count, 2);
        assert_eq!(a.style().unwrap().fill_color, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn concurrent_builds_share_context() {
        let ctx = BadgeContext::new(BlockText);
        let source = blue_image(48, 48);

        let outputs: Vec<RgbaImage> = std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4)
                .map(|count| {
                    let builder = BadgeBuilder::new(ctx.clone()).source(source.clone()).count(count);
                    scope.spawn(move || builder.build().unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(outputs.len(), 4);
        for out in outputs {
            assert_eq!(out.dimensions(), (48, 48));
        }
    }
}

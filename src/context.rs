//! External services the builder depends on.
//!
//! Nothing here is global: a [`BadgeContext`] is constructed by the caller
//! and handed to each [`BadgeBuilder`](crate::BadgeBuilder).

use std::collections::HashMap;
use std::sync::Arc;

use image::Rgba;
use palette::Srgb;

use crate::text::TextRenderer;

// ============================================================================
// DisplayMetrics
// ============================================================================

/// Converts density-independent units to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Device pixels per density-independent unit.
    pub density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl DisplayMetrics {
    pub fn new(density: f32) -> Self {
        Self { density }
    }

    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.density
    }
}

// ============================================================================
// Color resolution
// ============================================================================

/// Resolves a color token to an RGBA value.
pub trait ColorResolver: Send + Sync {
    /// Returns `None` if the token is unknown.
    fn resolve(&self, token: &str) -> Option<Rgba<u8>>;
}

/// Default [`ColorResolver`].
///
/// Tokens are matched case-insensitively, in this order:
///
/// 1. colors registered with [`ThemeColors::with_color`]
/// 2. platform theme tokens (`white`, `holo_red_light`, ...), optionally
///    written as resource references such as `@android:color/white`
/// 3. hex literals: `#rgb`, `#rrggbb`, `#aarrggbb`
/// 4. CSS color names
#[derive(Debug, Clone, Default)]
pub struct ThemeColors {
    custom: HashMap<String, Rgba<u8>>,
}

impl ThemeColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overrides) a named color.
    pub fn with_color(mut self, token: impl AsRef<str>, color: Rgba<u8>) -> Self {
        self.custom.insert(token.as_ref().trim().to_lowercase(), color);
        self
    }
}

impl ColorResolver for ThemeColors {
    fn resolve(&self, token: &str) -> Option<Rgba<u8>> {
        let token = token.trim().to_lowercase();
        if let Some(color) = self.custom.get(&token) {
            return Some(*color);
        }

        let name = token.rsplit('/').next().unwrap_or(token.as_str());
        if let Some(color) = theme_color(name) {
            return Some(color);
        }

        if token.starts_with('#') {
            return parse_hex(&token);
        }

        palette::named::from_str(name).map(|c| Rgba([c.red, c.green, c.blue, 255]))
    }
}

/// Platform theme colors that have no CSS equivalent.
fn theme_color(name: &str) -> Option<Rgba<u8>> {
    let color = match name {
        "white" => Rgba([255, 255, 255, 255]),
        "black" => Rgba([0, 0, 0, 255]),
        "transparent" => Rgba([0, 0, 0, 0]),
        "holo_red_light" => Rgba([255, 68, 68, 255]),
        "holo_red_dark" => Rgba([204, 0, 0, 255]),
        "holo_blue_light" => Rgba([51, 181, 229, 255]),
        "holo_green_light" => Rgba([153, 204, 0, 255]),
        "holo_orange_light" => Rgba([255, 187, 51, 255]),
        _ => return None,
    };
    Some(color)
}

/// Parses `#rgb`, `#rrggbb` or `#aarrggbb`.
fn parse_hex(token: &str) -> Option<Rgba<u8>> {
    let hex = token.strip_prefix('#').filter(|h| h.is_ascii())?;
    let (alpha, rgb) = match hex.len() {
        8 => (u8::from_str_radix(&hex[..2], 16).ok()?, &hex[2..]),
        3 | 6 => (255, hex),
        _ => return None,
    };
    let c: Srgb<u8> = rgb.parse().ok()?;
    Some(Rgba([c.red, c.green, c.blue, alpha]))
}

// ============================================================================
// BadgeContext
// ============================================================================

/// The services a builder needs: unit conversion, color resolution and text.
///
/// Cloning is cheap; the resolver and text renderer are shared.
#[derive(Clone)]
pub struct BadgeContext {
    pub metrics: DisplayMetrics,
    colors: Arc<dyn ColorResolver>,
    text: Arc<dyn TextRenderer>,
}

impl BadgeContext {
    /// Creates a context with density 1.0 and the default [`ThemeColors`].
    pub fn new(text: impl TextRenderer + 'static) -> Self {
        Self {
            metrics: DisplayMetrics::default(),
            colors: Arc::new(ThemeColors::new()),
            text: Arc::new(text),
        }
    }

    pub fn with_metrics(mut self, metrics: DisplayMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_colors(mut self, colors: impl ColorResolver + 'static) -> Self {
        self.colors = Arc::new(colors);
        self
    }

    pub fn colors(&self) -> &dyn ColorResolver {
        self.colors.as_ref()
    }

    pub fn text(&self) -> &dyn TextRenderer {
        self.text.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_conversion() {
        assert_eq!(DisplayMetrics::default().dp_to_px(20.0), 20.0);
        assert_eq!(DisplayMetrics::new(2.75).dp_to_px(20.0), 55.0);
    }

    #[test]
    fn theme_tokens() {
        let colors = ThemeColors::new();
        assert_eq!(colors.resolve("white"), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(colors.resolve("holo_red_light"), Some(Rgba([255, 68, 68, 255])));
        assert_eq!(
            colors.resolve("@android:color/holo_blue_light"),
            Some(Rgba([51, 181, 229, 255]))
        );
        assert_eq!(colors.resolve(" WHITE "), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn hex_tokens() {
        let colors = ThemeColors::new();
        assert_eq!(colors.resolve("#ff0000"), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(colors.resolve("#0f0"), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(colors.resolve("#800000ff"), Some(Rgba([0, 0, 255, 128])));
        assert_eq!(colors.resolve("#12345"), None);
        assert_eq!(colors.resolve("#zzzzzz"), None);
    }

    #[test]
    fn css_names_and_custom_tokens() {
        let colors = ThemeColors::new().with_color("Brand", Rgba([1, 2, 3, 255]));
        assert_eq!(colors.resolve("brand"), Some(Rgba([1, 2, 3, 255])));
        assert_eq!(colors.resolve("orange"), Some(Rgba([255, 165, 0, 255])));
        assert_eq!(colors.resolve("not-a-color"), None);
    }
}

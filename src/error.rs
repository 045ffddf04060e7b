//! Error types for badge composition.

use thiserror::Error;

/// Errors raised while building a badge.
///
/// Every error is detected synchronously when the builder is asked to
/// produce an image; no partial output is ever returned alongside one.
#[derive(Error, Debug)]
pub enum BadgeError {
    /// `build()` was called without a source image, and the target slot
    /// (if any) carried none either.
    #[error("no source image was set and the target carries none")]
    MissingSourceImage,

    /// The badge is not larger than its border, so the label text size
    /// would collapse to zero or below.
    #[error("invalid style configuration: badge size {badge_size}px must exceed border width {border_width}px")]
    InvalidStyleConfiguration { badge_size: f32, border_width: f32 },

    /// The count ceiling must be strictly positive.
    #[error("invalid count ceiling {0}: must be greater than zero")]
    InvalidCountCeiling(i64),

    /// A color token could not be resolved.
    #[error("unknown color token: {0:?}")]
    UnknownColor(String),

    /// The source image could not be decoded.
    #[error("failed to decode source image: {0}")]
    Decode(#[from] image::ImageError),

    /// The font could not be loaded.
    #[error("failed to load font: {0}")]
    Font(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("profile error: {0}")]
    Profile(#[from] serde_json::Error),

    /// An outer badge would widen the canvas past what a pixel buffer can hold.
    #[error("badge {badge_width}x{badge_height}px needs a canvas larger than {max}px per side")]
    CanvasTooLarge { badge_width: f32, badge_height: f32, max: u32 },

    /// The output canvas would have a zero dimension.
    #[error("cannot allocate a {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = BadgeError> = std::result::Result<T, E>;

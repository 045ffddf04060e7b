//! badge-renderer: count badges composited onto images
//!
//! This crate draws notification-style count badges (a dot, a digit in a
//! circle, or a `"999+"` pill) onto the corner of a source image, either
//! overlapping it or extending beyond it.
//!
//! # Example
//!
//! ```no_run
//! use badge_renderer::{BadgeBuilder, BadgeContext, FontdueText};
//! # fn main() -> badge_renderer::Result<()> {
//! let ctx = BadgeContext::new(FontdueText::from_file("DejaVuSans.ttf")?);
//! let icon = image::open("icon.png")?.to_rgba8();
//!
//! let badged = BadgeBuilder::new(ctx)
//!     .source(icon)
//!     .count(1500)
//!     .circle(false)
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Profiles
//!
//! Builder settings can be saved and restored as JSON with
//! [`BadgeProfile`] and the [`Configurable`] trait:
//!
//! ```no_run
//! use badge_renderer::{BadgeBuilder, BadgeContext, BadgeProfile, Configurable, FontdueText};
//! # fn main() -> badge_renderer::Result<()> {
//! let ctx = BadgeContext::new(FontdueText::from_file("DejaVuSans.ttf")?);
//!
//! let mut builder = BadgeBuilder::new(ctx);
//! builder.apply_profile(&BadgeProfile::from_json(r#"{"count": 3, "shape": "circle"}"#)?);
//!
//! let json = builder.export_profile().to_json_pretty()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Lower-level API
//!
//! [`compose_plan`] exposes the layout without rasterizing, and [`compose`]
//! works directly on a [`BadgeStyle`] in device pixels.

mod builder;
mod context;
mod engine;
mod error;
mod geometry;
mod profile;
mod raster;
mod style;
mod text;

pub use builder::{BadgeBuilder, BadgeSource, Configurable, ImageSlot};
pub use context::{BadgeContext, ColorResolver, DisplayMetrics, ThemeColors};
pub use engine::{
    BadgeGeometry, BadgeLabel, BadgePlacement, BadgePlan, DrawOp, ShapeOutline, compose,
    compose_plan, format_label,
};
pub use error::{BadgeError, Result};
pub use geometry::{RectF, SizePx};
pub use profile::{BadgeProfile, SerializablePlacement, SerializablePosition, SerializableShape};
pub use raster::composite_over;
pub use style::{
    BadgePosition, BadgeShape, BadgeStyle, DEFAULT_BADGE_SIZE_DP, DEFAULT_BORDER_SIZE_DP,
    DEFAULT_COUNT_CEILING, DEFAULT_DIGIT_PADDING_DP, DEFAULT_PILL_PADDING_DP, MIDDLE_COUNT, Placement,
};
pub use text::{FontdueText, TextBounds, TextRenderer};

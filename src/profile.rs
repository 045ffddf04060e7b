//! Serializable badge profile.
//!
//! A [`BadgeProfile`] captures builder settings in a JSON-friendly form:
//! colors stay as tokens and sizes stay in density-independent units, so a
//! profile can be written once and applied on displays of any density.
//!
//! # Example
//!
//! ```
//! use badge_renderer::{BadgeProfile, SerializablePosition, SerializableShape};
//!
//! let profile = BadgeProfile::new()
//!     .with_count(12)
//!     .with_shape(SerializableShape::Circle)
//!     .with_position(SerializablePosition::BottomLeft);
//!
//! let json = profile.to_json().unwrap();
//! let restored = BadgeProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::style::{
    BadgePosition, BadgeShape, DEFAULT_BADGE_SIZE_DP, DEFAULT_BORDER_SIZE_DP,
    DEFAULT_COUNT_CEILING, Placement,
};

// ============================================================================
// Serializable enums
// ============================================================================

/// Serializable version of [`BadgePosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SerializablePosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<BadgePosition> for SerializablePosition {
    fn from(pos: BadgePosition) -> Self {
        match pos {
            BadgePosition::TopLeft => Self::TopLeft,
            BadgePosition::TopRight => Self::TopRight,
            BadgePosition::BottomLeft => Self::BottomLeft,
            BadgePosition::BottomRight => Self::BottomRight,
        }
    }
}

impl From<SerializablePosition> for BadgePosition {
    fn from(pos: SerializablePosition) -> Self {
        match pos {
            SerializablePosition::TopLeft => Self::TopLeft,
            SerializablePosition::TopRight => Self::TopRight,
            SerializablePosition::BottomLeft => Self::BottomLeft,
            SerializablePosition::BottomRight => Self::BottomRight,
        }
    }
}

/// Serializable version of [`BadgeShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SerializableShape {
    Circle,
    #[default]
    Pill,
}

impl From<BadgeShape> for SerializableShape {
    fn from(shape: BadgeShape) -> Self {
        match shape {
            BadgeShape::Circle => Self::Circle,
            BadgeShape::Pill => Self::Pill,
        }
    }
}

impl From<SerializableShape> for BadgeShape {
    fn from(shape: SerializableShape) -> Self {
        match shape {
            SerializableShape::Circle => Self::Circle,
            SerializableShape::Pill => Self::Pill,
        }
    }
}

/// Serializable version of [`Placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SerializablePlacement {
    #[default]
    Inner,
    Outer,
}

impl From<Placement> for SerializablePlacement {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Inner => Self::Inner,
            Placement::Outer => Self::Outer,
        }
    }
}

impl From<SerializablePlacement> for Placement {
    fn from(placement: SerializablePlacement) -> Self {
        match placement {
            SerializablePlacement::Inner => Self::Inner,
            SerializablePlacement::Outer => Self::Outer,
        }
    }
}

// ============================================================================
// BadgeProfile
// ============================================================================

/// All builder settings except the source image.
///
/// Missing fields take the builder defaults, so `{}` is a valid profile.
///
/// # JSON Format
///
/// ```json
/// {
///   "textColor": "white",
///   "badgeColor": "holo_red_light",
///   "borderColor": "white",
///   "badgeSize": 20.0,
///   "borderSize": 2.0,
///   "position": "top-right",
///   "shape": "pill",
///   "placement": "inner",
///   "count": 0,
///   "countCeiling": 999
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeProfile {
    /// Label color token.
    pub text_color: String,

    /// Fill color token.
    pub badge_color: String,

    /// Border color token.
    pub border_color: String,

    /// Badge size in density-independent units.
    pub badge_size: f32,

    /// Border width in density-independent units.
    pub border_size: f32,

    pub position: SerializablePosition,
    pub shape: SerializableShape,
    pub placement: SerializablePlacement,
    pub count: i32,
    pub count_ceiling: i32,
}

impl Default for BadgeProfile {
    fn default() -> Self {
        Self {
            text_color: "white".into(),
            badge_color: "holo_red_light".into(),
            border_color: "white".into(),
            badge_size: DEFAULT_BADGE_SIZE_DP,
            border_size: DEFAULT_BORDER_SIZE_DP,
            position: SerializablePosition::default(),
            shape: SerializableShape::default(),
            placement: SerializablePlacement::default(),
            count: 0,
            count_ceiling: DEFAULT_COUNT_CEILING as i32,
        }
    }
}

impl BadgeProfile {
    /// Creates a profile with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    pub fn with_position(mut self, position: SerializablePosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_shape(mut self, shape: SerializableShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_placement(mut self, placement: SerializablePlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

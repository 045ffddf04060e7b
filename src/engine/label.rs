//! Count to label formatting.

/// The text drawn inside a badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLabel {
    /// Empty for dots.
    pub text: String,

    /// A zero count is drawn as a plain dot with no text.
    pub is_dot: bool,
}

impl BadgeLabel {
    /// Returns true for labels drawn as a single glyph, such as `"7"`.
    pub fn is_single_char(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next().is_some() && chars.next().is_none()
    }
}

/// Formats `count` for display, clamping at `ceiling`.
///
/// - `0` becomes a dot
/// - counts above `ceiling` become `"<ceiling>+"`
/// - anything else is the decimal count
pub fn format_label(count: u32, ceiling: u32) -> BadgeLabel {
    if count == 0 {
        return BadgeLabel {
            text: String::new(),
            is_dot: true,
        };
    }

    let text = if count > ceiling {
        format!("{ceiling}+")
    } else {
        count.to_string()
    };

    BadgeLabel { text, is_dot: false }
}

//! Core value types for page measurement.

use std::fmt;

/// Axis-aligned bounding box, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// Position relative to the viewport
    pub x: f64,
    pub y: f64,
    /// Size of the box
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the position of the given page edge.
    pub fn edge(&self, side: Side) -> f64 {
        match side {
            Side::Bottom => self.bottom(),
            Side::Right => self.right(),
        }
    }
}

/// A page edge content can extend towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom,
    Right,
}

impl Side {
    /// The CSS margin property on this side.
    pub fn margin_property(&self) -> &'static str {
        match self {
            Side::Bottom => "margin-bottom",
            Side::Right => "margin-right",
        }
    }

    /// The axis along which this edge grows.
    pub fn axis(&self) -> Axis {
        match self {
            Side::Bottom => Axis::Height,
            Side::Right => Axis::Width,
        }
    }
}

/// A measured dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Height,
    Width,
}

impl Axis {
    /// The CSS property sizing an element along this axis.
    pub fn style_property(&self) -> &'static str {
        match self {
            Axis::Height => "height",
            Axis::Width => "width",
        }
    }

    /// The edge content on this axis extends towards.
    pub fn far_side(&self) -> Side {
        match self {
            Axis::Height => Side::Bottom,
            Axis::Width => Side::Right,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style_property())
    }
}

/// Which box-model size of an element to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    /// `offsetWidth` / `offsetHeight`
    Offset,
    /// `scrollWidth` / `scrollHeight`
    Scroll,
    /// `clientWidth` / `clientHeight`
    Client,
}

/// The record handed to the host callback on every notification.
///
/// Both fields always hold an integer followed by `px`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: String,
    pub height: String,
}

impl Dimensions {
    /// Build a record from raw pixel measurements.
    pub fn from_px(width: f64, height: f64) -> Self {
        Self {
            width: format_px(width),
            height: format_px(height),
        }
    }

    /// Replace any field the overrides provide.
    pub fn with_overrides(mut self, overrides: DimensionOverrides) -> Self {
        if let Some(width) = overrides.width.filter(|w| !w.is_empty()) {
            self.width = width;
        }
        if let Some(height) = overrides.height.filter(|h| !h.is_empty()) {
            self.height = height;
        }
        self
    }
}

/// Caller-supplied values that take the place of measured ones in a forced send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionOverrides {
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<String>,
}

/// Format a measurement as whole pixels.
///
/// Fractional layout sizes round up so the host never clips content.
pub fn format_px(value: f64) -> String {
    if value.is_finite() {
        format!("{}px", value.ceil() as i64)
    } else {
        "0px".to_string()
    }
}

/// Parse the integer prefix of a CSS value the way `parseInt(value, 10)` does.
///
/// `"12.5px"` gives `Some(12)`, `"auto"` gives `None`.
pub fn parse_css_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Units that size an element relative to its container or the viewport.
pub const RELATIVE_UNITS: [&str; 5] = ["%", "vh", "vw", "vmin", "vmax"];

/// Check whether a CSS length uses a relative unit (`50%`, `100vh`, ...).
pub fn is_relative_length(value: &str) -> bool {
    let s = value.trim();
    let unit_start = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(s.len());
    if unit_start == 0 {
        return false;
    }
    let unit = s[unit_start..].trim().to_ascii_lowercase();
    RELATIVE_UNITS.contains(&unit.as_str())
}

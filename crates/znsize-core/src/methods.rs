//! Strategy identifiers and engine options.

use std::fmt;
use std::str::FromStr;

use crate::errors::SizeError;
use crate::types::Axis;

/// Named height strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum HeightMethod {
    /// `body.offsetHeight` plus the body's vertical margins
    BodyOffset,
    /// `body.scrollHeight`
    BodyScroll,
    /// `documentElement.offsetHeight`
    DocumentElementOffset,
    /// `documentElement.scrollHeight`
    DocumentElementScroll,
    /// Largest bottom edge over every element on the page
    FurthestElement,
    /// Scroll height when overflowing, otherwise the unwrapped content height
    #[default]
    Content,
    /// Smallest of the four base measurements
    Min,
    /// Largest of the four base measurements
    Max,
}

impl HeightMethod {
    pub const ALL: [HeightMethod; 8] = [
        HeightMethod::BodyOffset,
        HeightMethod::BodyScroll,
        HeightMethod::DocumentElementOffset,
        HeightMethod::DocumentElementScroll,
        HeightMethod::FurthestElement,
        HeightMethod::Content,
        HeightMethod::Min,
        HeightMethod::Max,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeightMethod::BodyOffset => "bodyOffset",
            HeightMethod::BodyScroll => "bodyScroll",
            HeightMethod::DocumentElementOffset => "documentElementOffset",
            HeightMethod::DocumentElementScroll => "documentElementScroll",
            HeightMethod::FurthestElement => "furthestElement",
            HeightMethod::Content => "content",
            HeightMethod::Min => "min",
            HeightMethod::Max => "max",
        }
    }
}

/// Named width strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum WidthMethod {
    /// `body.offsetWidth`
    BodyOffset,
    /// `body.scrollWidth`
    BodyScroll,
    /// `documentElement.offsetWidth`
    DocumentElementOffset,
    /// `documentElement.scrollWidth`
    DocumentElementScroll,
    /// Largest right edge over the body's top-level elements
    FurthestElement,
    /// Left-offset compensated scroll width or unwrapped content width
    #[default]
    Content,
    /// Smallest of the four base measurements
    Min,
    /// Largest of the four base measurements
    Max,
    /// Larger of the body and document element scroll widths
    Scroll,
}

impl WidthMethod {
    pub const ALL: [WidthMethod; 9] = [
        WidthMethod::BodyOffset,
        WidthMethod::BodyScroll,
        WidthMethod::DocumentElementOffset,
        WidthMethod::DocumentElementScroll,
        WidthMethod::FurthestElement,
        WidthMethod::Content,
        WidthMethod::Min,
        WidthMethod::Max,
        WidthMethod::Scroll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WidthMethod::BodyOffset => "bodyOffset",
            WidthMethod::BodyScroll => "bodyScroll",
            WidthMethod::DocumentElementOffset => "documentElementOffset",
            WidthMethod::DocumentElementScroll => "documentElementScroll",
            WidthMethod::FurthestElement => "furthestElement",
            WidthMethod::Content => "content",
            WidthMethod::Min => "min",
            WidthMethod::Max => "max",
            WidthMethod::Scroll => "scroll",
        }
    }
}

impl FromStr for HeightMethod {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeightMethod::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| SizeError::UnknownMethod {
                axis: Axis::Height,
                name: s.to_string(),
            })
    }
}

impl FromStr for WidthMethod {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidthMethod::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| SizeError::UnknownMethod {
                axis: Axis::Width,
                name: s.to_string(),
            })
    }
}

impl fmt::Display for HeightMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for WidthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy selection for an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SizeOptions {
    pub height: HeightMethod,
    pub width: WidthMethod,
}

impl SizeOptions {
    /// Build options from optional strategy names, defaulting absent ones.
    pub fn from_names(height: Option<&str>, width: Option<&str>) -> Result<Self, SizeError> {
        Ok(Self {
            height: height.map(str::parse::<HeightMethod>).transpose()?.unwrap_or_default(),
            width: width.map(str::parse::<WidthMethod>).transpose()?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_content() {
        let options = SizeOptions::default();
        assert_eq!(options.height, HeightMethod::Content);
        assert_eq!(options.width, WidthMethod::Content);
    }

    #[test]
    fn test_names_roundtrip_through_from_str() {
        for method in HeightMethod::ALL {
            assert_eq!(method.name().parse::<HeightMethod>(), Ok(method));
        }
        for method in WidthMethod::ALL {
            assert_eq!(method.name().parse::<WidthMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_scroll_is_width_only() {
        assert!("scroll".parse::<WidthMethod>().is_ok());
        let err = "scroll".parse::<HeightMethod>().unwrap_err();
        assert_eq!(
            err,
            SizeError::UnknownMethod {
                axis: Axis::Height,
                name: "scroll".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unknown height method: scroll");
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        let options = SizeOptions::from_names(Some("max"), None).unwrap();
        assert_eq!(options.height, HeightMethod::Max);
        assert_eq!(options.width, WidthMethod::Content);

        assert!(SizeOptions::from_names(None, Some("eastToWest")).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_method_names() {
        for method in WidthMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.name()));
        }
        let options: SizeOptions =
            serde_json::from_str(r#"{"height":"documentElementScroll"}"#).unwrap();
        assert_eq!(options.height, HeightMethod::DocumentElementScroll);
        assert_eq!(options.width, WidthMethod::Content);
    }
}

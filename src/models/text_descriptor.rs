// src/models/text_descriptor.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// An effective font size rounded to two decimals, stored as a count of hundredths
/// so that it can be compared, ordered and used as a map key.
///
/// Serialized as a plain JSON number (e.g. `15.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct SizeKey(i64);

impl SizeKey {
    /// Rounds `size` to two decimals.
    pub fn from_size(size: f64) -> Self {
        SizeKey((size * 100.0).round() as i64)
    }

    /// The rounded size in px.
    pub fn value(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<f64> for SizeKey {
    fn from(size: f64) -> Self {
        SizeKey::from_size(size)
    }
}

impl From<SizeKey> for f64 {
    fn from(key: SizeKey) -> Self {
        key.value()
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Plain-data description of one `<text>` element, captured in document order.
///
/// Descriptors never hold references into a parsed tree, so they stay valid after
/// the document they came from is dropped and the source is parsed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDescriptor {
    /// Ordinal among the document's text elements, starting at 0.
    pub index: usize,
    /// Resolved font size in px (inline style, then class rule, then 12).
    pub font_size: f64,
    /// First family of the resolved `font-family`, quotes stripped.
    pub font_family: String,
    /// Raw `transform` attribute, empty when absent.
    pub transform: String,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Concatenated descendant text.
    pub text_content: String,
    /// Raw `class` attribute, empty when absent.
    pub class_name: String,
}

impl TextDescriptor {
    /// The font size as perceived after scaling: `font_size * max(scale_x, scale_y)`.
    pub fn effective_size(&self) -> f64 {
        self.font_size * self.scale_x.max(self.scale_y)
    }

    /// The effective size rounded for grouping.
    pub fn size_key(&self) -> SizeKey {
        SizeKey::from_size(self.effective_size())
    }

    /// True when the element is stretched by a non-identity scale.
    pub fn is_scaled(&self) -> bool {
        self.scale_x != 1.0 || self.scale_y != 1.0
    }

    /// Individual class names from the `class` attribute, in order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(font_size: f64, scale_x: f64, scale_y: f64) -> TextDescriptor {
        TextDescriptor {
            index: 0,
            font_size,
            font_family: "Arial".to_string(),
            transform: String::new(),
            scale_x,
            scale_y,
            text_content: String::new(),
            class_name: String::new(),
        }
    }

    #[test]
    fn test_effective_size_uses_larger_scale() {
        let d = descriptor(10.0, 2.0, 1.5);
        assert_eq!(d.effective_size(), 20.0);
        assert_eq!(descriptor(10.0, 1.0, 1.5).size_key(), SizeKey::from_size(15.0));
    }

    #[test]
    fn test_size_key_rounds_to_two_decimals() {
        assert_eq!(SizeKey::from_size(11.004), SizeKey::from_size(11.0));
        assert_eq!(SizeKey::from_size(23.499_9).to_string(), "23.50");
        assert!(SizeKey::from_size(11.0) < SizeKey::from_size(11.01));
    }

    #[test]
    fn test_size_key_serializes_as_number() {
        let json = serde_json::to_string(&SizeKey::from_size(23.5)).unwrap();
        assert_eq!(json, "23.5");
        let back: SizeKey = serde_json::from_str("11").unwrap();
        assert_eq!(back, SizeKey::from_size(11.0));
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let value = serde_json::to_value(descriptor(12.0, 1.0, 1.0)).unwrap();
        assert_eq!(value["fontSize"], 12.0);
        assert_eq!(value["scaleX"], 1.0);
        assert_eq!(value["className"], "");
    }
}

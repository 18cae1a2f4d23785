use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Horizontal extent assumed for a fragment whose width is unknown.
pub const DEFAULT_EXTENT: f64 = 0.5;

/// A run of decoded text at an absolute position on a page.
///
/// Coordinates are page units with y growing downward. Any field may be
/// missing; missing or non-finite positions read as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedFragment {
    /// Percent-escaped text.
    pub text: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default, alias = "sw")]
    pub width: Option<f64>,
}

/// One page worth of fragments, in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub fragments: Vec<PositionedFragment>,
}

impl PositionedFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x: Some(x),
            y: Some(y),
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Builds a fragment from unescaped glyph text.
    pub fn from_glyphs(raw: &str, x: f64, y: f64, width: f64) -> Self {
        Self::new(escape_fragment_text(raw), x, y).with_width(width)
    }

    pub fn x(&self) -> f64 {
        finite_or_zero(self.x)
    }

    pub fn y(&self) -> f64 {
        finite_or_zero(self.y)
    }

    pub fn extent(&self) -> f64 {
        self.width
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(DEFAULT_EXTENT)
    }

    pub fn decoded_text(&self) -> Cow<'_, str> {
        decode_fragment_text(&self.text)
    }
}

impl Page {
    pub fn new(fragments: Vec<PositionedFragment>) -> Self {
        Self { fragments }
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// URL-style escaping: everything but ASCII alphanumerics and `-_.~`.
pub fn escape_fragment_text(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Strict percent-decoding. A stray `%`, a truncated escape, or bytes that
/// do not form UTF-8 all yield the raw text unchanged.
pub fn decode_fragment_text(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') || !escapes_well_formed(raw) {
        return Cow::Borrowed(raw);
    }
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

fn escapes_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some(pair) if pair.iter().all(u8::is_ascii_hexdigit) => i += 3,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_escaped_text() {
        assert_eq!(decode_fragment_text("Software%20Engineer"), "Software Engineer");
        assert_eq!(decode_fragment_text("caf%C3%A9"), "café");
    }

    #[test]
    fn test_malformed_escape_falls_back_to_raw() {
        assert_eq!(decode_fragment_text("grew revenue 40%"), "grew revenue 40%");
        assert_eq!(decode_fragment_text("100%25 and %zz"), "100%25 and %zz");
    }

    #[test]
    fn test_invalid_utf8_falls_back_to_raw() {
        assert_eq!(decode_fragment_text("%FF%FE"), "%FF%FE");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_fragment_text("Rust"), Cow::Borrowed("Rust")));
    }

    #[test]
    fn test_escape_then_decode_preserves_percent_signs() {
        let escaped = escape_fragment_text("Cut costs 35%");
        assert_eq!(escaped, "Cut%20costs%2035%25");
        assert_eq!(decode_fragment_text(&escaped), "Cut costs 35%");
    }

    #[test]
    fn test_missing_and_non_finite_positions_read_as_zero() {
        let fragment = PositionedFragment {
            text: "x".to_string(),
            x: None,
            y: Some(f64::NAN),
            width: Some(-1.0),
        };
        assert_eq!(fragment.x(), 0.0);
        assert_eq!(fragment.y(), 0.0);
        assert_eq!(fragment.extent(), DEFAULT_EXTENT);
    }

    #[test]
    fn test_deserializes_space_width_alias() {
        let fragment: PositionedFragment =
            serde_json::from_str(r#"{"text": "Go", "x": 1.5, "sw": 0.4}"#).unwrap();
        assert_eq!(fragment.width, Some(0.4));
        assert_eq!(fragment.y, None);
    }
}

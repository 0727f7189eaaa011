//! Font attribute values.

use serde::{Deserialize, Serialize};

/// Font applied to a run of text.
///
/// Bold and italic are traits of the font itself, the way host text engines
/// model them. Underline and strikethrough are separate attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(default = "Font::default_name")]
    pub name: String,
    #[serde(default = "Font::default_size")]
    pub size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    /// Point size used when nothing else is configured
    pub const STANDARD_SIZE: f32 = 16.0;

    /// Name of the host's system font
    pub const SYSTEM_NAME: &'static str = "system";

    /// Smallest size a font can be stepped down to
    pub const MIN_SIZE: f32 = 1.0;

    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            size: size.max(Self::MIN_SIZE),
            bold: false,
            italic: false,
        }
    }

    fn default_name() -> String {
        Self::SYSTEM_NAME.to_string()
    }

    fn default_size() -> f32 {
        Self::STANDARD_SIZE
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size.max(Self::MIN_SIZE);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Self::SYSTEM_NAME, Self::STANDARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font() {
        let font = Font::default();
        assert_eq!(font.name, "system");
        assert_eq!(font.size, 16.0);
        assert!(!font.bold);
        assert!(!font.italic);
    }

    #[test]
    fn test_size_never_below_minimum() {
        assert_eq!(Font::new("Arial", -4.0).size, Font::MIN_SIZE);
        assert_eq!(Font::default().with_size(0.0).size, Font::MIN_SIZE);
    }

    #[test]
    fn test_builder() {
        let font = Font::default().with_name("Georgia").bold(true).italic(true);
        assert_eq!(font.name, "Georgia");
        assert!(font.bold && font.italic);
    }

    #[test]
    fn test_deserialize_partial() {
        let font: Font = serde_json::from_str(r#"{"name":"Menlo"}"#).unwrap();
        assert_eq!(font.name, "Menlo");
        assert_eq!(font.size, Font::STANDARD_SIZE);
    }
}

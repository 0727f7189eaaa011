//! Attribute keys, values and the attribute map.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorKind};
use super::font::Font;
use super::paragraph::ParagraphStyle;

/// Identifies one kind of styling that can be applied to a range of text.
///
/// Keys the crate does not understand are kept as [`AttributeKey::Custom`] so
/// that archived documents round-trip without losing them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    Font,
    ForegroundColor,
    BackgroundColor,
    UnderlineStyle,
    UnderlineColor,
    StrikethroughStyle,
    StrikethroughColor,
    StrokeColor,
    ParagraphStyle,
    Link,
    Attachment,
    Custom(String),
}

impl AttributeKey {
    /// Stable name used in archived documents
    pub fn name(&self) -> &str {
        match self {
            AttributeKey::Font => "font",
            AttributeKey::ForegroundColor => "foreground_color",
            AttributeKey::BackgroundColor => "background_color",
            AttributeKey::UnderlineStyle => "underline_style",
            AttributeKey::UnderlineColor => "underline_color",
            AttributeKey::StrikethroughStyle => "strikethrough_style",
            AttributeKey::StrikethroughColor => "strikethrough_color",
            AttributeKey::StrokeColor => "stroke_color",
            AttributeKey::ParagraphStyle => "paragraph_style",
            AttributeKey::Link => "link",
            AttributeKey::Attachment => "attachment",
            AttributeKey::Custom(name) => name,
        }
    }

    /// Resolve a key name; unknown names become [`AttributeKey::Custom`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "font" => AttributeKey::Font,
            "foreground_color" => AttributeKey::ForegroundColor,
            "background_color" => AttributeKey::BackgroundColor,
            "underline_style" => AttributeKey::UnderlineStyle,
            "underline_color" => AttributeKey::UnderlineColor,
            "strikethrough_style" => AttributeKey::StrikethroughStyle,
            "strikethrough_color" => AttributeKey::StrikethroughColor,
            "stroke_color" => AttributeKey::StrokeColor,
            "paragraph_style" => AttributeKey::ParagraphStyle,
            "link" => AttributeKey::Link,
            "attachment" => AttributeKey::Attachment,
            other => AttributeKey::Custom(other.to_string()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, AttributeKey::Custom(_))
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Line decoration used for underline and strikethrough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    None,
    Single,
    Thick,
    Double,
}

impl LineStyle {
    pub fn is_visible(&self) -> bool {
        !matches!(self, LineStyle::None)
    }
}

/// An inline image inserted by pasting or dropping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub name: String,
    /// File type of `data`, such as `png` or `jpeg`
    pub format: String,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    /// Placeholder character that carries the attachment in the text
    pub const REPLACEMENT_CHAR: char = '\u{FFFC}';

    pub fn new(name: impl Into<String>, format: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            data,
        }
    }
}

/// A value stored under an [`AttributeKey`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Font(Font),
    Color(Color),
    Line(LineStyle),
    ParagraphStyle(ParagraphStyle),
    Link(String),
    Attachment(ImageAttachment),
    /// Opaque value of a custom key
    Raw(serde_json::Value),
}

/// Typed projection out of an [`AttributeValue`].
///
/// A value of the wrong variant projects to `None`, it is never an error.
pub trait AttributeType: Sized {
    fn from_value(value: &AttributeValue) -> Option<Self>;
}

impl AttributeType for Font {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Font(font) => Some(font.clone()),
            _ => None,
        }
    }
}

impl AttributeType for Color {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Color(color) => Some(*color),
            _ => None,
        }
    }
}

impl AttributeType for LineStyle {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Line(style) => Some(*style),
            _ => None,
        }
    }
}

impl AttributeType for ParagraphStyle {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::ParagraphStyle(style) => Some(style.clone()),
            _ => None,
        }
    }
}

impl AttributeType for String {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Link(url) => Some(url.clone()),
            _ => None,
        }
    }
}

impl AttributeType for ImageAttachment {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Attachment(image) => Some(image.clone()),
            _ => None,
        }
    }
}

impl AttributeType for serde_json::Value {
    fn from_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Raw(raw) => Some(raw.clone()),
            _ => None,
        }
    }
}

// =============================================================================
// AttributeMap
// =============================================================================

/// The attributes in effect at one position, keyed by [`AttributeKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    entries: BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &AttributeKey) -> Option<&AttributeValue> {
        self.entries.get(key)
    }

    /// Typed lookup; `None` if absent or of another type
    pub fn get_as<T: AttributeType>(&self, key: &AttributeKey) -> Option<T> {
        self.entries.get(key).and_then(T::from_value)
    }

    pub fn contains_key(&self, key: &AttributeKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: AttributeKey, value: AttributeValue) -> Option<AttributeValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &AttributeKey) -> Option<AttributeValue> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &AttributeKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, AttributeKey, AttributeValue> {
        self.entries.iter()
    }

    /// Builder-style insert
    pub fn with(mut self, key: AttributeKey, value: AttributeValue) -> Self {
        self.entries.insert(key, value);
        self
    }

    /// Copy entries of `other` that this map does not define
    pub fn fill_missing_from(&mut self, other: &AttributeMap) {
        for (key, value) in other.iter() {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    pub fn font(&self) -> Option<Font> {
        self.get_as(&AttributeKey::Font)
    }

    pub fn color(&self, kind: ColorKind) -> Option<Color> {
        self.get_as(&kind.attribute_key())
    }

    pub fn set_color(&mut self, kind: ColorKind, color: Option<Color>) {
        match color {
            Some(color) => self.insert(kind.attribute_key(), AttributeValue::Color(color)),
            None => self.remove(&kind.attribute_key()),
        };
    }

    pub fn paragraph_style(&self) -> Option<ParagraphStyle> {
        self.get_as(&AttributeKey::ParagraphStyle)
    }

    /// Update the font in place, starting from `fallback` if there is none
    pub fn update_font(&mut self, fallback: &Font, update: impl FnOnce(&mut Font)) {
        let mut font = self.font().unwrap_or_else(|| fallback.clone());
        update(&mut font);
        self.insert(AttributeKey::Font, AttributeValue::Font(font));
    }
}

impl FromIterator<(AttributeKey, AttributeValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (AttributeKey, AttributeValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AttributeMap {
    type Item = (AttributeKey, AttributeValue);
    type IntoIter = btree_map::IntoIter<AttributeKey, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a AttributeKey, &'a AttributeValue);
    type IntoIter = btree_map::Iter<'a, AttributeKey, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
